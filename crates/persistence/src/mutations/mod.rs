// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutators for the persistence layer.
//!
//! Every mutator is a single parameterized statement. Inputs arrive already
//! validated by the domain crate. Updates replace every column of the row,
//! so an absent optional value clears the stored one.
//!
//! Update and delete report `PersistenceError::NotFound` when no row has
//! the given id.

pub mod faqs;
pub mod gallery;
pub mod newsletter;
pub mod operators;
pub mod reviews;
pub mod workshops;

pub use faqs::{
    create_faq_mysql, create_faq_sqlite, delete_faq_mysql, delete_faq_sqlite, update_faq_mysql,
    update_faq_sqlite,
};
pub use gallery::{
    create_gallery_image_mysql, create_gallery_image_sqlite, delete_gallery_image_mysql,
    delete_gallery_image_sqlite, update_gallery_image_mysql, update_gallery_image_sqlite,
};
pub use newsletter::{
    create_newsletter_post_mysql, create_newsletter_post_sqlite, delete_newsletter_post_mysql,
    delete_newsletter_post_sqlite, update_newsletter_post_mysql, update_newsletter_post_sqlite,
};
pub use operators::{
    create_operator_mysql, create_operator_sqlite, create_session_mysql, create_session_sqlite,
    delete_expired_sessions_mysql, delete_expired_sessions_sqlite, delete_session_mysql,
    delete_session_sqlite, update_last_login_mysql, update_last_login_sqlite,
};
pub use reviews::{
    create_review_mysql, create_review_sqlite, delete_review_mysql, delete_review_sqlite,
    update_review_mysql, update_review_sqlite,
};
pub use workshops::{
    create_workshop_mysql, create_workshop_sqlite, delete_workshop_mysql, delete_workshop_sqlite,
    update_workshop_mysql, update_workshop_sqlite,
};

use crate::error::PersistenceError;

/// Maps a zero row count from an update or delete to `NotFound`.
pub(crate) fn expect_one_row(
    rows_affected: usize,
    entity: &str,
    id: i64,
) -> Result<(), PersistenceError> {
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("{entity} {id} not found")));
    }
    Ok(())
}
