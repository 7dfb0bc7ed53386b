// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::NewWorkshop;
use tracing::info;

use crate::backend::InsertedId;
use crate::diesel_schema::classes;
use crate::error::PersistenceError;
use crate::mutations::expect_one_row;

backend_fn! {
/// Inserts a workshop and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_workshop(conn: &mut _, workshop: &NewWorkshop) -> Result<i64, PersistenceError> {
    diesel::insert_into(classes::table)
        .values((
            classes::name.eq(&workshop.name),
            classes::instructor.eq(&workshop.instructor),
            classes::date.eq(&workshop.date),
            classes::spots.eq(workshop.spots),
            classes::level.eq(workshop.level.as_deref()),
            classes::description.eq(workshop.description.as_deref()),
            classes::duration.eq(workshop.duration.as_deref()),
            classes::price.eq(workshop.price.as_deref()),
            classes::image.eq(workshop.image.as_deref()),
            classes::url.eq(workshop.url.as_deref()),
        ))
        .execute(conn)?;

    let id: i64 = conn.last_insert_id()?;

    info!(id, name = %workshop.name, date = %workshop.date, "Created workshop");
    Ok(id)
}
}

backend_fn! {
/// Replaces every column of the workshop with the given id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no workshop has this id, or an
/// error if the update fails.
pub fn update_workshop(
    conn: &mut _,
    id: i64,
    workshop: &NewWorkshop,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(classes::table.filter(classes::id.eq(id)))
        .set((
            classes::name.eq(&workshop.name),
            classes::instructor.eq(&workshop.instructor),
            classes::date.eq(&workshop.date),
            classes::spots.eq(workshop.spots),
            classes::level.eq(workshop.level.as_deref()),
            classes::description.eq(workshop.description.as_deref()),
            classes::duration.eq(workshop.duration.as_deref()),
            classes::price.eq(workshop.price.as_deref()),
            classes::image.eq(workshop.image.as_deref()),
            classes::url.eq(workshop.url.as_deref()),
        ))
        .execute(conn)?;

    expect_one_row(rows_affected, "Workshop", id)?;
    info!(id, "Updated workshop");
    Ok(())
}
}

backend_fn! {
/// Deletes the workshop with the given id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no workshop has this id, or an
/// error if the delete fails.
pub fn delete_workshop(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(classes::table.filter(classes::id.eq(id))).execute(conn)?;

    expect_one_row(rows_affected, "Workshop", id)?;
    info!(id, "Deleted workshop");
    Ok(())
}
}
