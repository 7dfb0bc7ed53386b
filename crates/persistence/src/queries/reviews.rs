// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::Review;
use tracing::debug;

use crate::diesel_schema::reviews;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = reviews)]
struct ReviewRow {
    id: i64,
    name: String,
    review: String,
    rating: i32,
    date: String,
    role: Option<String>,
}

backend_fn! {
/// Lists all reviews in the order they were added. A missing role loads
/// as an empty string.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reviews(conn: &mut _) -> Result<Vec<Review>, PersistenceError> {
    let rows: Vec<ReviewRow> = reviews::table
        .select(ReviewRow::as_select())
        .order_by(reviews::id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded reviews");
    Ok(rows
        .into_iter()
        .map(|row| Review {
            id: row.id,
            name: row.name,
            review: row.review,
            rating: row.rating,
            date: row.date,
            role: row.role.unwrap_or_default(),
        })
        .collect())
}
}
