// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::{DEFAULT_FAQ_CATEGORY, Faq};
use tracing::debug;

use crate::diesel_schema::faqs;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = faqs)]
struct FaqRow {
    id: i64,
    question: String,
    answer: String,
    category: Option<String>,
}

backend_fn! {
/// Lists all FAQs in the order they were added.
///
/// Rows without a category load as [`DEFAULT_FAQ_CATEGORY`].
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_faqs(conn: &mut _) -> Result<Vec<Faq>, PersistenceError> {
    let rows: Vec<FaqRow> = faqs::table
        .select(FaqRow::as_select())
        .order_by(faqs::id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded FAQs");
    Ok(rows
        .into_iter()
        .map(|row| Faq {
            id: row.id,
            question: row.question,
            answer: row.answer,
            category: row
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_FAQ_CATEGORY.to_string()),
        })
        .collect())
}
}
