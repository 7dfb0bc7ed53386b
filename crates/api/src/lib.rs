// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Back-office operations for the studio site.
//!
//! Admin form actions, sign-in and sessions, image uploads and newsletter
//! document conversion. Everything here is transport-agnostic; the server
//! crate maps results and errors onto HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod actions;
mod auth;
mod convert;
mod error;
mod password_policy;
mod upload;

#[cfg(test)]
mod tests;

pub use actions::{
    add_faq, add_gallery_image, add_newsletter_post, add_review, add_workshop, delete_faq,
    delete_gallery_image, delete_newsletter_post, delete_review, delete_workshop, update_faq,
    update_gallery_image, update_newsletter_post, update_review, update_workshop,
};
pub use auth::{
    AuthProvider, Credentials, CredentialsProvider, Identity, Session, SessionService,
    provision_admin, sign_in,
};
pub use convert::{ConversionError, DocumentConverter, DocxConverter, html_to_markdown};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use upload::{
    DEFAULT_MAX_UPLOAD_BYTES, ImageStorage, StoredImage, UploadError, UploadPolicy, UploadedFile,
};
