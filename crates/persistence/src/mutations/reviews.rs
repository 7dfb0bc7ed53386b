// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::NewReview;
use tracing::info;

use crate::backend::InsertedId;
use crate::diesel_schema::reviews;
use crate::error::PersistenceError;
use crate::mutations::expect_one_row;

backend_fn! {
/// Inserts a review and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the rating violates
/// the table's range check.
pub fn create_review(conn: &mut _, review: &NewReview) -> Result<i64, PersistenceError> {
    diesel::insert_into(reviews::table)
        .values((
            reviews::name.eq(&review.name),
            reviews::review.eq(&review.review),
            reviews::rating.eq(review.rating),
            reviews::date.eq(&review.date),
            reviews::role.eq(review.role.as_deref()),
        ))
        .execute(conn)?;

    let id: i64 = conn.last_insert_id()?;

    info!(id, rating = review.rating, "Created review");
    Ok(id)
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no review has this id, or an
/// error if the update fails.
pub fn update_review(conn: &mut _, id: i64, review: &NewReview) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(reviews::table.filter(reviews::id.eq(id)))
        .set((
            reviews::name.eq(&review.name),
            reviews::review.eq(&review.review),
            reviews::rating.eq(review.rating),
            reviews::date.eq(&review.date),
            reviews::role.eq(review.role.as_deref()),
        ))
        .execute(conn)?;

    expect_one_row(rows_affected, "Review", id)?;
    info!(id, "Updated review");
    Ok(())
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no review has this id, or an
/// error if the delete fails.
pub fn delete_review(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(reviews::table.filter(reviews::id.eq(id))).execute(conn)?;

    expect_one_row(rows_affected, "Review", id)?;
    info!(id, "Deleted review");
    Ok(())
}
}
