// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Category assigned to FAQs submitted without one.
pub const DEFAULT_FAQ_CATEGORY: &str = "General";

/// A scheduled pottery class.
///
/// Only `name`, `instructor` and `date` are guaranteed. Rows written by
/// older revisions of the site may carry none of the optional columns, so
/// every display default is applied later by [`crate::WorkshopCard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: i64,
    pub name: String,
    pub instructor: String,
    pub date: String,
    pub spots: Option<i32>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

/// A validated workshop ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkshop {
    pub name: String,
    pub instructor: String,
    pub date: String,
    pub spots: Option<i32>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Always populated; [`DEFAULT_FAQ_CATEGORY`] when the row has none.
    pub category: String,
}

/// A validated FAQ ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub name: String,
    pub review: String,
    /// Between [`crate::MIN_RATING`] and [`crate::MAX_RATING`].
    pub rating: i32,
    pub date: String,
    /// Empty when the reviewer gave no role.
    pub role: String,
}

/// A validated review ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub name: String,
    pub review: String,
    pub rating: i32,
    pub date: String,
    pub role: Option<String>,
}

/// A gallery image. `image` is either a URL or a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGalleryImage {
    pub image: String,
}

/// A newsletter post with a markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNewsletterPost {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub content: String,
    pub image: Option<String>,
}
