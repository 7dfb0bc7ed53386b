// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::GalleryImage;
use tracing::debug;

use crate::diesel_schema::gallery;
use crate::error::PersistenceError;

backend_fn! {
/// Lists gallery images, most recently added first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_gallery_images(conn: &mut _) -> Result<Vec<GalleryImage>, PersistenceError> {
    let rows: Vec<(i64, String)> = gallery::table
        .select((gallery::id, gallery::image))
        .order_by(gallery::id.desc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded gallery images");
    Ok(rows
        .into_iter()
        .map(|(id, image)| GalleryImage { id, image })
        .collect())
}
}
