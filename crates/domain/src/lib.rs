// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod display;
mod error;
mod forms;
mod outcome;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use display::{
    DEFAULT_WORKSHOP_DURATION, DEFAULT_WORKSHOP_IMAGE, DEFAULT_WORKSHOP_LEVEL,
    DEFAULT_WORKSHOP_PRICE, WorkshopCard,
};
pub use error::DomainError;
pub use forms::{FaqForm, GalleryForm, NewsletterForm, RecordIdForm, ReviewForm, WorkshopForm};
pub use outcome::ActionOutcome;
pub use types::{
    DEFAULT_FAQ_CATEGORY, Faq, GalleryImage, NewFaq, NewGalleryImage, NewNewsletterPost,
    NewReview, NewWorkshop, NewsletterPost, Review, Workshop,
};
pub use validation::{
    MAX_RATING, MIN_RATING, parse_record_id, validate_faq_form, validate_gallery_form,
    validate_newsletter_form, validate_review_form, validate_workshop_form,
};
