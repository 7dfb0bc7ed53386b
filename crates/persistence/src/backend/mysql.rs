// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `MySQL`/`MariaDB` connection setup for the hosted database.
//!
//! Schema lives in `migrations_mysql/` and must stay equivalent to the
//! `SQLite` schema in `migrations/`. `cargo xtask verify-migrations`
//! checks this; `cargo xtask test-mariadb` runs the ignored backend tests
//! against a throwaway container.

use diesel::sql_types::Integer;
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

#[derive(QueryableByName)]
struct ForeignKeyCheck {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

/// Connects, migrates, and confirms foreign keys are enforced.
///
/// The URL carries the auth token, so it is never logged here.
///
/// # Errors
///
/// Returns an error if connection, migration or the foreign key check fails.
pub fn open(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    info!("Running MySQL database migrations");
    conn.run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    verify_foreign_key_enforcement(&mut conn)?;

    Ok(conn)
}

/// # Errors
///
/// Returns an error if `foreign_key_checks` is off or cannot be read.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    let check: ForeignKeyCheck = diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks")
        .get_result(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to verify foreign key enforcement: {e}"))
        })?;

    if check.fk_checks != 1 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("MySQL foreign key enforcement is enabled");
    Ok(())
}
