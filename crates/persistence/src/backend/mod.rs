// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific connection setup.
//!
//! Everything that cannot be written once in Diesel DSL lives here: opening
//! and migrating a connection, `SQLite` pragmas, and reading back the id of
//! the row just inserted. Loaders and mutators in `queries/` and
//! `mutations/` are written once and expanded per backend by `backend_fn!`.

pub mod mysql;
pub mod sqlite;

use diesel::dsl::sql;
use diesel::sql_types::BigInt;
use diesel::{MysqlConnection, RunQueryDsl, SqliteConnection};

use crate::error::PersistenceError;

/// Reads back the id the database assigned to the last `INSERT` on this
/// connection. Mutators call it right after inserting.
pub trait InsertedId {
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_insert_id(&mut self) -> Result<i64, PersistenceError>;
}

impl InsertedId for SqliteConnection {
    fn last_insert_id(&mut self) -> Result<i64, PersistenceError> {
        Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(self)?)
    }
}

impl InsertedId for MysqlConnection {
    fn last_insert_id(&mut self) -> Result<i64, PersistenceError> {
        Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(self)?)
    }
}
