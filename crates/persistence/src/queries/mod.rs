// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loaders for the persistence layer.
//!
//! Each loader issues one ordered `SELECT` and maps rows into domain
//! records, filling defaults for optional columns that older rows lack.
//!
//! ## Module Organization
//!
//! - `workshops`: classes ordered by date
//! - `faqs`, `reviews`: insertion order
//! - `gallery`: newest first
//! - `newsletter`: latest post first, plus lookup by slug
//! - `operators`: operators and sessions for sign-in
//!
//! All functions are generated as `_sqlite` and `_mysql` variants by
//! `backend_fn!` and dispatched from the `Persistence` adapter.

pub mod faqs;
pub mod gallery;
pub mod newsletter;
pub mod operators;
pub mod reviews;
pub mod workshops;

pub use faqs::{list_faqs_mysql, list_faqs_sqlite};
pub use gallery::{list_gallery_images_mysql, list_gallery_images_sqlite};
pub use newsletter::{
    get_newsletter_post_by_slug_mysql, get_newsletter_post_by_slug_sqlite,
    list_newsletter_posts_mysql, list_newsletter_posts_sqlite,
};
pub use reviews::{list_reviews_mysql, list_reviews_sqlite};
pub use workshops::{list_workshops_mysql, list_workshops_sqlite};
