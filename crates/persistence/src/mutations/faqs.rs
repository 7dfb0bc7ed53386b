// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::NewFaq;
use tracing::info;

use crate::backend::InsertedId;
use crate::diesel_schema::faqs;
use crate::error::PersistenceError;
use crate::mutations::expect_one_row;

backend_fn! {
/// Inserts an FAQ and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_faq(conn: &mut _, faq: &NewFaq) -> Result<i64, PersistenceError> {
    diesel::insert_into(faqs::table)
        .values((
            faqs::question.eq(&faq.question),
            faqs::answer.eq(&faq.answer),
            faqs::category.eq(Some(faq.category.as_str())),
        ))
        .execute(conn)?;

    let id: i64 = conn.last_insert_id()?;

    info!(id, category = %faq.category, "Created FAQ");
    Ok(id)
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no FAQ has this id, or an error
/// if the update fails.
pub fn update_faq(conn: &mut _, id: i64, faq: &NewFaq) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(faqs::table.filter(faqs::id.eq(id)))
        .set((
            faqs::question.eq(&faq.question),
            faqs::answer.eq(&faq.answer),
            faqs::category.eq(Some(faq.category.as_str())),
        ))
        .execute(conn)?;

    expect_one_row(rows_affected, "FAQ", id)?;
    info!(id, "Updated FAQ");
    Ok(())
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no FAQ has this id, or an error
/// if the delete fails.
pub fn delete_faq(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(faqs::table.filter(faqs::id.eq(id))).execute(conn)?;

    expect_one_row(rows_affected, "FAQ", id)?;
    info!(id, "Deleted FAQ");
    Ok(())
}
}
