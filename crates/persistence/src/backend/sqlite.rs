// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local `SQLite` databases: development, single-host deployments, and
//! every test.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How a local database journals its writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journal {
    /// `SQLite`'s own choice. In-memory databases cannot use WAL.
    Default,
    /// Write-ahead logging, so the public pages keep reading while the
    /// dashboard writes.
    Wal,
}

impl Journal {
    /// WAL for files, the default for `:memory:` and `mode=memory` URIs.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        if path == ":memory:" || path.contains("mode=memory") {
            Self::Default
        } else {
            Self::Wal
        }
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens `database_url`, applies the connection pragmas, migrates, and
/// confirms foreign keys are enforced.
///
/// `database_url` may be a path, a `file:` URI, or `:memory:`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, configured or
/// migrated.
pub fn open(database_url: &str, journal: Journal) -> Result<SqliteConnection, PersistenceError> {
    info!(database = %database_url, ?journal, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Diesel has no PRAGMA DSL.
    let mut pragmas: Vec<&str> = vec!["PRAGMA foreign_keys = ON"];
    if journal == Journal::Wal {
        pragmas.push("PRAGMA journal_mode = WAL");
    }
    for pragma in pragmas {
        diesel::sql_query(pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    verify_foreign_key_enforcement(&mut conn)?;

    Ok(conn)
}

/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;

    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}
