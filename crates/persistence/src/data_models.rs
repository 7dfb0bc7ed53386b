// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// An admin operator as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A sign-in session as stored.
///
/// Timestamps are ISO 8601 in UTC. Expiry is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub expires_at: String,
}
