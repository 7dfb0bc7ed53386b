// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens `Persistence::new_in_memory()`, so
//! connection setup and migrations are exercised throughout. These tests
//! cover the factory paths explicitly.

use diesel::sql_types::Text;
use diesel::{QueryableByName, RunQueryDsl};

use crate::backend::sqlite::Journal;
use crate::{BackendConnection, DatabaseConfig, Persistence, PersistenceError};

#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

fn journal_mode(persistence: &mut Persistence) -> String {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => {
            diesel::sql_query("PRAGMA journal_mode")
                .get_result::<JournalModeRow>(conn)
                .unwrap()
                .journal_mode
        }
        BackendConnection::Mysql(_) => panic!("expected a SQLite connection"),
    }
}

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_operator("op1", "Operator One", "password").unwrap();

    assert_eq!(db1.count_operators().unwrap(), 1, "db1 should have 1 operator");
    assert_eq!(db2.count_operators().unwrap(), 0, "db2 should be isolated");
}

#[test]
fn test_connect_opens_memory_database_without_token() {
    let config: DatabaseConfig = DatabaseConfig::new(Some(String::from(":memory:")), None).unwrap();
    let mut persistence: Persistence = Persistence::connect(&config).unwrap();

    assert!(persistence.list_workshops().unwrap().is_empty());
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_connect_creates_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studio.db");
    let config: DatabaseConfig =
        DatabaseConfig::new(Some(path.to_string_lossy().into_owned()), None).unwrap();

    {
        let mut persistence: Persistence = Persistence::connect(&config).unwrap();
        persistence
            .create_gallery_image(&earthen_domain::NewGalleryImage {
                image: String::from("/uploads/bowl.jpg"),
            })
            .unwrap();
    }

    // Reopening runs migrations again and keeps the data.
    let mut reopened: Persistence = Persistence::connect(&config).unwrap();
    assert_eq!(reopened.list_gallery_images().unwrap().len(), 1);
}

#[test]
fn test_journal_follows_database_location() {
    assert_eq!(Journal::for_path(":memory:"), Journal::Default);
    assert_eq!(
        Journal::for_path("file:memdb_earthen_7?mode=memory&cache=shared"),
        Journal::Default
    );
    assert_eq!(Journal::for_path("/var/lib/earthen/studio.db"), Journal::Wal);
    assert_eq!(Journal::for_path("file:studio.db"), Journal::Wal);
}

#[test]
fn test_file_database_uses_wal_and_memory_does_not() {
    let dir = tempfile::tempdir().unwrap();
    let mut on_disk: Persistence = Persistence::new_with_file(dir.path().join("wal.db")).unwrap();
    let mut in_memory: Persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(journal_mode(&mut on_disk), "wal");
    assert_eq!(journal_mode(&mut in_memory), "memory");
}
