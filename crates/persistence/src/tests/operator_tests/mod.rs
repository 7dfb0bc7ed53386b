// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for operator and session persistence.

use crate::{Persistence, PersistenceError, SessionData};

#[test]
fn test_create_operator_normalizes_login_and_hashes_password() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let operator_id: i64 = persistence
        .create_operator("potter", "Studio Potter", "correct-horse-battery")
        .unwrap();

    let operator = persistence.get_operator_by_login("Potter").unwrap().unwrap();
    assert_eq!(operator.operator_id, operator_id);
    assert_eq!(operator.login_name, "POTTER");
    assert_ne!(operator.password_hash, "correct-horse-battery");
    assert!(
        Persistence::verify_password("correct-horse-battery", &operator.password_hash).unwrap()
    );
    assert!(!Persistence::verify_password("wrong", &operator.password_hash).unwrap());
}

#[test]
fn test_duplicate_login_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence.create_operator("potter", "One", "password").unwrap();
    let result = persistence.create_operator("POTTER", "Two", "password");

    assert_eq!(
        result,
        Err(PersistenceError::LoginNameTaken(String::from("POTTER")))
    );
}

#[test]
fn test_update_last_login() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let operator_id: i64 = persistence.create_operator("potter", "Potter", "pw").unwrap();

    persistence.update_last_login(operator_id).unwrap();

    let operator = persistence.get_operator_by_id(operator_id).unwrap().unwrap();
    assert!(operator.last_login_at.is_some());
    assert!(matches!(
        persistence.update_last_login(operator_id + 100),
        Err(PersistenceError::OperatorNotFound(_))
    ));
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let operator_id: i64 = persistence.create_operator("potter", "Potter", "pw").unwrap();

    persistence
        .create_session("session_abc", operator_id, "2099-01-01T00:00:00.000000000Z")
        .unwrap();

    let session: SessionData = persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.operator_id, operator_id);
    assert_eq!(session.expires_at, "2099-01-01T00:00:00.000000000Z");

    persistence.delete_session("session_abc").unwrap();
    assert!(persistence.get_session_by_token("session_abc").unwrap().is_none());

    // Signing out twice is harmless.
    persistence.delete_session("session_abc").unwrap();
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let operator_id: i64 = persistence.create_operator("potter", "Potter", "pw").unwrap();

    persistence
        .create_session("old", operator_id, "2020-01-01T00:00:00.000000000Z")
        .unwrap();
    persistence
        .create_session("live", operator_id, "2099-01-01T00:00:00.000000000Z")
        .unwrap();

    let removed: usize = persistence
        .delete_expired_sessions("2026-10-19T00:00:00.000000000Z")
        .unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn test_session_requires_existing_operator() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_session("orphan", 999, "2099-01-01T00:00:00.000000000Z");
    assert!(result.is_err(), "foreign key should reject unknown operator");
}
