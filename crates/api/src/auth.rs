// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sign-in and session handling for the admin dashboard.
//!
//! Credential checks sit behind [`AuthProvider`] so the dashboard does not
//! care where an identity came from. The built-in [`CredentialsProvider`]
//! checks a login name and password against the `operators` table. Sessions
//! are opaque tokens stored server-side with an expiry.

use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use earthen_persistence::{OperatorData, Persistence, SessionData};

use crate::error::{ApiError, AuthError};
use crate::password_policy::PasswordPolicy;

/// A login name and password as submitted on the sign-in form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login_name: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login_name", &self.login_name)
            .field("password", &"***")
            .finish()
    }
}

/// The signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Identity {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
}

impl From<&OperatorData> for Identity {
    fn from(operator: &OperatorData) -> Self {
        Self {
            operator_id: operator.operator_id,
            login_name: operator.login_name.clone(),
            display_name: operator.display_name.clone(),
        }
    }
}

/// Turns submitted credentials into an identity.
pub trait AuthProvider: Send + Sync {
    /// Returns the identity the credentials belong to, or `None` if they
    /// are not valid.
    ///
    /// # Errors
    ///
    /// Returns an error only when the check itself could not be made.
    fn verify(
        &self,
        persistence: &mut Persistence,
        credentials: &Credentials,
    ) -> Result<Option<Identity>, AuthError>;
}

/// Checks login name and password against stored bcrypt hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialsProvider;

impl AuthProvider for CredentialsProvider {
    fn verify(
        &self,
        persistence: &mut Persistence,
        credentials: &Credentials,
    ) -> Result<Option<Identity>, AuthError> {
        let Some(operator) = persistence.get_operator_by_login(&credentials.login_name)? else {
            debug!(login_name = %credentials.login_name, "Unknown operator");
            return Ok(None);
        };

        if !Persistence::verify_password(&credentials.password, &operator.password_hash)? {
            debug!(login_name = %operator.login_name, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(Identity::from(&operator)))
    }
}

/// A resolved session. It may already be expired; callers decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// A session is expired once its expiry lies before `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at < now
    }
}

/// Creates, resolves and ends sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionService {
    lifetime: Duration,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIFETIME)
    }
}

impl SessionService {
    /// How long a session lasts unless configured otherwise.
    pub const DEFAULT_LIFETIME: Duration = Duration::hours(8);

    #[must_use]
    pub const fn new(lifetime: Duration) -> Self {
        Self { lifetime }
    }

    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Starts a session for `identity` and records the login.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored, or if its expiry
    /// falls outside the representable date range.
    pub fn create(
        &self,
        persistence: &mut Persistence,
        identity: &Identity,
    ) -> Result<Session, AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let expires_at: OffsetDateTime = now.checked_add(self.lifetime).ok_or_else(|| {
            AuthError::SessionStore {
                message: format!("Session lifetime {} is out of range", self.lifetime),
            }
        })?;
        let token: String = generate_session_token(now);

        persistence.create_session(&token, identity.operator_id, &format_timestamp(expires_at)?)?;
        persistence.update_last_login(identity.operator_id)?;

        info!(login_name = %identity.login_name, "Session created");
        Ok(Session {
            token,
            identity: identity.clone(),
            expires_at,
        })
    }

    /// Looks up the session behind `token`.
    ///
    /// Returns `None` for an unknown token or a session whose operator no
    /// longer exists. Expired sessions are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a malformed
    /// expiry.
    pub fn current_session(
        &self,
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<Option<Session>, AuthError> {
        let Some(session): Option<SessionData> = persistence.get_session_by_token(token)? else {
            return Ok(None);
        };
        let Some(operator) = persistence.get_operator_by_id(session.operator_id)? else {
            return Ok(None);
        };

        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT).map_err(|e| {
                AuthError::SessionStore {
                    message: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        Ok(Some(Session {
            token: session.session_token,
            identity: Identity::from(&operator),
            expires_at,
        }))
    }

    /// Ends the session behind `token`. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn sign_out(&self, persistence: &mut Persistence, token: &str) -> Result<(), AuthError> {
        persistence.delete_session(token)?;
        info!("Session ended");
        Ok(())
    }

    /// Deletes every session that expired before now.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn purge_expired(&self, persistence: &mut Persistence) -> Result<usize, AuthError> {
        let now: String = format_timestamp(OffsetDateTime::now_utc())?;
        let removed: usize = persistence.delete_expired_sessions(&now)?;
        if removed > 0 {
            debug!(removed, "Purged expired sessions");
        }
        Ok(removed)
    }
}

/// Verifies `credentials` with `provider` and opens a session.
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if the credentials are not
/// valid, or a store error if the session cannot be created.
pub fn sign_in(
    provider: &dyn AuthProvider,
    sessions: &SessionService,
    persistence: &mut Persistence,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    let Some(identity) = provider.verify(persistence, credentials)? else {
        warn!(login_name = %credentials.login_name, "Sign-in rejected");
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Invalid login name or password"),
        });
    };

    sessions.create(persistence, &identity)
}

/// Creates the first admin when no operator exists yet.
///
/// Returns `true` when an operator was created and `false` when one
/// already existed.
///
/// # Errors
///
/// Returns `ApiError::PasswordPolicyViolation` if the password is too weak,
/// or `ApiError::Internal` if the operator cannot be stored.
pub fn provision_admin(
    persistence: &mut Persistence,
    policy: &PasswordPolicy,
    login_name: &str,
    password: &str,
) -> Result<bool, ApiError> {
    let existing: i64 = persistence
        .count_operators()
        .map_err(crate::error::translate_persistence_error)?;
    if existing > 0 {
        debug!(existing, "Operators already provisioned");
        return Ok(false);
    }

    let display_name: &str = login_name.trim();
    policy.validate(password, login_name, display_name)?;

    persistence
        .create_operator(login_name, display_name, password)
        .map_err(crate::error::translate_persistence_error)?;

    info!(login_name = %display_name, "Provisioned admin operator");
    Ok(true)
}

fn format_timestamp(at: OffsetDateTime) -> Result<String, AuthError> {
    at.format(&Iso8601::DEFAULT)
        .map_err(|e| AuthError::SessionStore {
            message: format!("Failed to format timestamp: {e}"),
        })
}

fn generate_session_token(now: OffsetDateTime) -> String {
    format!(
        "session_{}_{:016x}{:016x}",
        now.unix_timestamp_nanos(),
        rand::random::<u64>(),
        rand::random::<u64>()
    )
}
