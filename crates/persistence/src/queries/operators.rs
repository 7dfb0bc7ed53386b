// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session queries.
//!
//! Operators are the studio staff allowed into the dashboard. Sessions are
//! returned as stored; deciding whether one has expired is the caller's job.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{OperatorData, SessionData};
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = operators)]
struct OperatorRow {
    operator_id: i64,
    login_name: String,
    display_name: String,
    password_hash: String,
    created_at: String,
    last_login_at: Option<String>,
}

impl From<OperatorRow> for OperatorData {
    fn from(row: OperatorRow) -> Self {
        Self {
            operator_id: row.operator_id,
            login_name: row.login_name,
            display_name: row.display_name,
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    operator_id: i64,
    created_at: String,
    expires_at: String,
}

backend_fn! {
/// Retrieves an operator by login name.
///
/// The `login_name` is normalized to uppercase for case-insensitive lookup.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the operator is not found.
pub fn get_operator_by_login(
    conn: &mut _,
    login_name: &str,
) -> Result<Option<OperatorData>, PersistenceError> {
    let normalized_login: String = login_name.trim().to_uppercase();

    debug!("Looking up operator by login_name: {}", normalized_login);

    let row: Option<OperatorRow> = operators::table
        .filter(operators::login_name.eq(&normalized_login))
        .select(OperatorRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(OperatorData::from))
}
}

backend_fn! {
/// Retrieves an operator by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the operator is not found.
pub fn get_operator_by_id(
    conn: &mut _,
    operator_id: i64,
) -> Result<Option<OperatorData>, PersistenceError> {
    debug!("Looking up operator by ID: {}", operator_id);

    let row: Option<OperatorRow> = operators::table
        .filter(operators::operator_id.eq(operator_id))
        .select(OperatorRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(OperatorData::from))
}
}

backend_fn! {
/// Counts the total number of operators.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_operators(conn: &mut _) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    let count: i64 = operators::table
        .select(count(operators::operator_id))
        .first(conn)?;

    debug!("Total operators: {}", count);
    Ok(count)
}
}

backend_fn! {
/// Retrieves a session by token, expired or not.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        operator_id: row.operator_id,
        created_at: row.created_at,
        expires_at: row.expires_at,
    }))
}
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
