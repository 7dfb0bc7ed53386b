// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::NewGalleryImage;
use tracing::info;

use crate::backend::InsertedId;
use crate::diesel_schema::gallery;
use crate::error::PersistenceError;
use crate::mutations::expect_one_row;

backend_fn! {
/// Inserts a gallery image and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_gallery_image(
    conn: &mut _,
    image: &NewGalleryImage,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(gallery::table)
        .values(gallery::image.eq(&image.image))
        .execute(conn)?;

    let id: i64 = conn.last_insert_id()?;

    // Inline images can be megabytes of base64; log the size only.
    info!(id, bytes = image.image.len(), "Added gallery image");
    Ok(id)
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no image has this id, or an
/// error if the update fails.
pub fn update_gallery_image(
    conn: &mut _,
    id: i64,
    image: &NewGalleryImage,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(gallery::table.filter(gallery::id.eq(id)))
        .set(gallery::image.eq(&image.image))
        .execute(conn)?;

    expect_one_row(rows_affected, "Gallery image", id)?;
    info!(id, "Replaced gallery image");
    Ok(())
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no image has this id, or an
/// error if the delete fails.
pub fn delete_gallery_image(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(gallery::table.filter(gallery::id.eq(id))).execute(conn)?;

    expect_one_row(rows_affected, "Gallery image", id)?;
    info!(id, "Deleted gallery image");
    Ok(())
}
}
