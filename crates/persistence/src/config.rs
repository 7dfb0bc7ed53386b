// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database connection settings.
//!
//! The site is configured with a connection URL and an auth token. A URL that
//! points at a local file (`file:...`, `:memory:`, or a bare path) opens
//! `SQLite` and needs no token. Anything hosted (`mysql://...`) must come with
//! a token, which is handed to the server as the connection password.

use url::Url;

/// Environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the database auth token.
pub const DATABASE_AUTH_TOKEN_ENV: &str = "DATABASE_AUTH_TOKEN";

/// Problems with the database settings, detected before any connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("database URL is not configured (set DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("database auth token is required for {host} (set DATABASE_AUTH_TOKEN)")]
    MissingAuthToken { host: String },
    #[error("unsupported database URL scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),
}

/// Where the connection goes, resolved from the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// A `SQLite` file, `file:` URI, or `:memory:`.
    Sqlite { path: String },
    /// A hosted `MySQL`/`MariaDB` database. `url` carries the auth token.
    Mysql { url: String },
}

/// Validated database settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    target: DatabaseTarget,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.redacted())
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the scheme of `url` when it has the `scheme://` form.
fn scheme_of(url: &str) -> Option<&str> {
    url.split_once("://").map(|(scheme, _)| scheme)
}

impl DatabaseConfig {
    /// Builds settings from a raw URL and optional auth token.
    ///
    /// Both values are trimmed and blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing, if its scheme is not
    /// supported, or if a hosted URL comes without a token.
    pub fn new(url: Option<String>, auth_token: Option<String>) -> Result<Self, ConfigError> {
        let url: String = non_blank(url).ok_or(ConfigError::MissingDatabaseUrl)?;
        let auth_token: Option<String> = non_blank(auth_token);

        let target: DatabaseTarget = match scheme_of(&url) {
            None | Some("file") => DatabaseTarget::Sqlite { path: url },
            Some("sqlite") => DatabaseTarget::Sqlite {
                path: url.trim_start_matches("sqlite://").to_string(),
            },
            Some("mysql") => {
                let mut parsed: Url =
                    Url::parse(&url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
                let host: String = parsed.host_str().unwrap_or_default().to_string();
                let token: String = auth_token.ok_or(ConfigError::MissingAuthToken { host })?;
                parsed
                    .set_password(Some(&token))
                    .map_err(|()| ConfigError::InvalidUrl(String::from("cannot carry a token")))?;
                DatabaseTarget::Mysql {
                    url: parsed.to_string(),
                }
            }
            Some(other) => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        };

        Ok(Self { target })
    }

    /// Reads [`DATABASE_URL_ENV`] and [`DATABASE_AUTH_TOKEN_ENV`].
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::new`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            std::env::var(DATABASE_URL_ENV).ok(),
            std::env::var(DATABASE_AUTH_TOKEN_ENV).ok(),
        )
    }

    #[must_use]
    pub const fn target(&self) -> &DatabaseTarget {
        &self.target
    }

    /// Whether the database lives on this machine.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self.target, DatabaseTarget::Sqlite { .. })
    }

    /// The connection target with any credentials masked, for logging.
    #[must_use]
    pub fn redacted(&self) -> String {
        match &self.target {
            DatabaseTarget::Sqlite { path } => path.clone(),
            DatabaseTarget::Mysql { url } => Url::parse(url).map_or_else(
                |_| String::from("mysql://<invalid>"),
                |mut parsed| {
                    let _ = parsed.set_password(Some("***"));
                    parsed.to_string()
                },
            ),
        }
    }
}
