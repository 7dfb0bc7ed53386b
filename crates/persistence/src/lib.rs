// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Earthen Vessels studio site.
//!
//! Stores the five kinds of site content (workshops, FAQs, reviews, gallery
//! images, newsletter posts) along with the operators and sessions used to
//! sign in to the dashboard. Built on Diesel.
//!
//! ## Database Backends
//!
//! - **`SQLite`**: local files, development, and every unit test
//! - **`MariaDB`/`MySQL`**: the hosted database, reached with a URL and an
//!   auth token
//!
//! The backend is chosen once, from the configured URL, by
//! [`Persistence::connect`]. See [`DatabaseConfig`] for the rules.
//!
//! ## Migrations
//!
//! Schema lives in two embedded migration directories that must stay
//! equivalent:
//!
//! - `migrations/`: `SQLite`
//! - `migrations_mysql/`: `MySQL`/`MariaDB`
//!
//! ```bash
//! cargo xtask verify-migrations
//! cargo xtask test-mariadb
//! ```

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::{
    Faq, GalleryImage, NewFaq, NewGalleryImage, NewNewsletterPost, NewReview, NewWorkshop,
    NewsletterPost, Review, Workshop,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so tests
/// never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively in the Persistence adapter
/// - The generated functions are completely monomorphic
///
/// # Usage
///
/// ```ignore
/// backend_fn! {
///     pub fn my_query(conn: &mut _, param: i64) -> Result<String, PersistenceError> {
///         // Function body using conn - same for both backends
///         diesel_schema::table::table
///             .filter(diesel_schema::table::id.eq(param))
///             .first::<String>(conn)
///             .map_err(Into::into)
///     }
/// }
/// ```
///
/// This generates:
/// - `my_query_sqlite(&mut SqliteConnection, i64) -> Result<String, PersistenceError>`
/// - `my_query_mysql(&mut MysqlConnection, i64) -> Result<String, PersistenceError>`
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod config;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use config::{
    ConfigError, DATABASE_AUTH_TOKEN_ENV, DATABASE_URL_ENV, DatabaseConfig, DatabaseTarget,
};
pub use data_models::{OperatorData, SessionData};
pub use error::PersistenceError;
pub use mutations::operators::now_iso8601;

use backend::mysql;
use backend::sqlite::{self, Journal};
use queries::operators as operators_queries;

/// Connection held by [`Persistence`], one variant per supported backend.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for site content, operators, and sessions.
///
/// Backend selection happens once at construction time and is transparent to
/// callers.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

/// Dispatches a generated `_sqlite`/`_mysql` function pair on the active
/// connection.
macro_rules! dispatch {
    ($self:ident, $module:ident :: $name:ident ( $($arg:expr),* $(,)? )) => {
        pastey::paste! {
            match &mut $self.conn {
                BackendConnection::Sqlite(conn) => $module::[<$name _sqlite>](conn $(, $arg)*),
                BackendConnection::Mysql(conn) => $module::[<$name _mysql>](conn $(, $arg)*),
            }
        }
    };
}

impl Persistence {
    /// Opens the configured database and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached, migrated, or does
    /// not enforce foreign keys.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        info!(database = %config.redacted(), "Connecting to database");
        match config.target() {
            DatabaseTarget::Sqlite { path } => Self::open_sqlite(path),
            DatabaseTarget::Mysql { url } => Self::new_with_mysql(url),
        }
    }

    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call gets its own named shared-cache database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self::open_sqlite(&format!("file:memdb_earthen_{db_id}?mode=memory&cache=shared"))
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        Self::open_sqlite(path_str)
    }

    /// Creates a new persistence adapter with a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        Ok(Self {
            conn: BackendConnection::Mysql(mysql::open(database_url)?),
        })
    }

    fn open_sqlite(path: &str) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = sqlite::open(path, Journal::for_path(path))?;
        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => sqlite::verify_foreign_key_enforcement(conn),
            BackendConnection::Mysql(conn) => mysql::verify_foreign_key_enforcement(conn),
        }
    }

    // ========================================================================
    // Workshops
    // ========================================================================

    /// Lists all workshops ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_workshops(&mut self) -> Result<Vec<Workshop>, PersistenceError> {
        dispatch!(self, queries::list_workshops())
    }

    /// Inserts a workshop and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_workshop(&mut self, workshop: &NewWorkshop) -> Result<i64, PersistenceError> {
        dispatch!(self, mutations::create_workshop(workshop))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no workshop has this id.
    pub fn update_workshop(
        &mut self,
        id: i64,
        workshop: &NewWorkshop,
    ) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::update_workshop(id, workshop))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no workshop has this id.
    pub fn delete_workshop(&mut self, id: i64) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::delete_workshop(id))
    }

    // ========================================================================
    // FAQs
    // ========================================================================

    /// Lists all FAQs in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_faqs(&mut self) -> Result<Vec<Faq>, PersistenceError> {
        dispatch!(self, queries::list_faqs())
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_faq(&mut self, faq: &NewFaq) -> Result<i64, PersistenceError> {
        dispatch!(self, mutations::create_faq(faq))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no FAQ has this id.
    pub fn update_faq(&mut self, id: i64, faq: &NewFaq) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::update_faq(id, faq))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no FAQ has this id.
    pub fn delete_faq(&mut self, id: i64) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::delete_faq(id))
    }

    // ========================================================================
    // Reviews
    // ========================================================================

    /// Lists all reviews in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_reviews(&mut self) -> Result<Vec<Review>, PersistenceError> {
        dispatch!(self, queries::list_reviews())
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_review(&mut self, review: &NewReview) -> Result<i64, PersistenceError> {
        dispatch!(self, mutations::create_review(review))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no review has this id.
    pub fn update_review(&mut self, id: i64, review: &NewReview) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::update_review(id, review))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no review has this id.
    pub fn delete_review(&mut self, id: i64) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::delete_review(id))
    }

    // ========================================================================
    // Gallery
    // ========================================================================

    /// Lists gallery images, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_gallery_images(&mut self) -> Result<Vec<GalleryImage>, PersistenceError> {
        dispatch!(self, queries::list_gallery_images())
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_gallery_image(
        &mut self,
        image: &NewGalleryImage,
    ) -> Result<i64, PersistenceError> {
        dispatch!(self, mutations::create_gallery_image(image))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no image has this id.
    pub fn update_gallery_image(
        &mut self,
        id: i64,
        image: &NewGalleryImage,
    ) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::update_gallery_image(id, image))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no image has this id.
    pub fn delete_gallery_image(&mut self, id: i64) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::delete_gallery_image(id))
    }

    // ========================================================================
    // Newsletter
    // ========================================================================

    /// Lists newsletter posts, latest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_newsletter_posts(&mut self) -> Result<Vec<NewsletterPost>, PersistenceError> {
        dispatch!(self, queries::list_newsletter_posts())
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_newsletter_post_by_slug(
        &mut self,
        slug: &str,
    ) -> Result<Option<NewsletterPost>, PersistenceError> {
        dispatch!(self, queries::get_newsletter_post_by_slug(slug))
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_newsletter_post(
        &mut self,
        post: &NewNewsletterPost,
    ) -> Result<i64, PersistenceError> {
        dispatch!(self, mutations::create_newsletter_post(post))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no post has this id.
    pub fn update_newsletter_post(
        &mut self,
        id: i64,
        post: &NewNewsletterPost,
    ) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::update_newsletter_post(id, post))
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no post has this id.
    pub fn delete_newsletter_post(&mut self, id: i64) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::delete_newsletter_post(id))
    }

    // ========================================================================
    // Operators & Sessions
    // ========================================================================

    /// Creates a new operator with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::LoginNameTaken` if the login exists.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        dispatch!(
            self,
            mutations::create_operator(login_name, display_name, password)
        )
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        dispatch!(self, operators_queries::get_operator_by_login(login_name))
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        dispatch!(self, operators_queries::get_operator_by_id(operator_id))
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        dispatch!(self, operators_queries::count_operators())
    }

    /// # Errors
    ///
    /// Returns an error if the operator does not exist.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::update_last_login(operator_id))
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be parsed.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        dispatch!(
            self,
            mutations::create_session(session_token, operator_id, expires_at)
        )
    }

    /// Looks up a session by token without checking its expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        dispatch!(self, operators_queries::get_session_by_token(session_token))
    }

    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        dispatch!(self, mutations::delete_session(session_token))
    }

    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        dispatch!(self, mutations::delete_expired_sessions(now))
    }
}
