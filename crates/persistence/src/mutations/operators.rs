// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session mutations.
//!
//! Timestamps are produced by the caller (or `now_iso8601`) rather than the
//! database so both backends store identical ISO 8601 text.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::{MysqlConnection, SqliteConnection};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::{debug, info};

use crate::backend::InsertedId;
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;

/// Current UTC time as ISO 8601 text.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_iso8601() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

backend_fn! {
/// Creates a new operator.
///
/// The `login_name` is normalized to uppercase for case-insensitive uniqueness.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name (will be normalized)
/// * `display_name` - The display name
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `PersistenceError::LoginNameTaken` if the login name already
/// exists, or an error if hashing or the insert fails.
pub fn create_operator(
    conn: &mut _,
    login_name: &str,
    display_name: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.trim().to_uppercase();

    info!(
        "Creating operator with login_name: {}, display_name: {}",
        normalized_login, display_name
    );

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;
    let created_at: String = now_iso8601()?;

    let inserted: Result<usize, diesel::result::Error> = diesel::insert_into(operators::table)
        .values((
            operators::login_name.eq(&normalized_login),
            operators::display_name.eq(display_name),
            operators::password_hash.eq(&password_hash),
            operators::created_at.eq(&created_at),
        ))
        .execute(conn);

    match inserted {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::LoginNameTaken(normalized_login));
        }
        Err(e) => return Err(e.into()),
    }

    let operator_id: i64 = conn.last_insert_id()?;

    info!(operator_id, "Operator created successfully");
    Ok(operator_id)
}
}

backend_fn! {
/// Records a successful sign-in.
///
/// # Errors
///
/// Returns `PersistenceError::OperatorNotFound` if the operator does not
/// exist, or an error if the update fails.
pub fn update_last_login(conn: &mut _, operator_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for operator ID: {}", operator_id);

    let now: String = now_iso8601()?;
    let rows_affected: usize = diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::last_login_at.eq(Some(now)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OperatorNotFound(format!(
            "Operator with ID {operator_id} not found"
        )));
    }

    Ok(())
}
}

backend_fn! {
/// Creates a new session for an operator.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `operator_id` - The operator ID
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    operator_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for operator ID: {} with expiration: {}",
        operator_id, expires_at
    );

    let created_at: String = now_iso8601()?;
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::operator_id.eq(operator_id),
            sessions::created_at.eq(&created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.last_insert_id()?;

    debug!(session_id, operator_id, "Session created");
    Ok(session_id)
}
}

backend_fn! {
/// Deletes a session by token. Signing out twice is not an error.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes every session that expired before `now`.
///
/// `now` must use the same ISO 8601 form as the stored `expires_at` values,
/// which then compare correctly as text.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    if rows_affected > 0 {
        info!("Deleted {} expired sessions", rows_affected);
    }
    Ok(rows_affected)
}
}
