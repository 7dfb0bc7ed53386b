// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Component state for the public site and the admin dashboard.
//!
//! These types hold what the browser components keep between renders: the
//! slide a carousel shows, which FAQ answers are open, and what an admin
//! form is editing. None of it is persisted; a page load starts fresh.

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

mod accordion;
mod carousel;
mod form;
mod table;

#[cfg(test)]
mod tests;

pub use accordion::Accordion;
pub use carousel::{
    AutoAdvance, Carousel, HERO_INTERVAL, REVIEW_INTERVAL, SharedCarousel, WORKSHOP_INTERVAL,
};
pub use form::{FAQ_CATEGORIES, FormFields, FormMode, FormState, FormSubmission};
pub use table::{AdminRow, AdminTable, FormRecord};
