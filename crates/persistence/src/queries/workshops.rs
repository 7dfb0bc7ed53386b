// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::Workshop;
use tracing::debug;

use crate::diesel_schema::classes;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = classes)]
struct WorkshopRow {
    id: i64,
    name: String,
    instructor: String,
    date: String,
    spots: Option<i32>,
    level: Option<String>,
    description: Option<String>,
    duration: Option<String>,
    price: Option<String>,
    image: Option<String>,
    url: Option<String>,
}

impl From<WorkshopRow> for Workshop {
    fn from(row: WorkshopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            instructor: row.instructor,
            date: row.date,
            spots: row.spots,
            level: row.level,
            description: row.description,
            duration: row.duration,
            price: row.price,
            image: row.image,
            url: row.url,
        }
    }
}

backend_fn! {
/// Lists all workshops, soonest first.
///
/// Dates are stored as ISO 8601 text, so text ordering is date ordering.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_workshops(conn: &mut _) -> Result<Vec<Workshop>, PersistenceError> {
    let rows: Vec<WorkshopRow> = classes::table
        .select(WorkshopRow::as_select())
        .order_by((classes::date.asc(), classes::id.asc()))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded workshops");
    Ok(rows.into_iter().map(Workshop::from).collect())
}
}
