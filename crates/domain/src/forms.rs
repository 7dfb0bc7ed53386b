// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw admin form submissions.
//!
//! Every field arrives as text exactly as the browser posted it. Nothing in
//! here is trusted until it has passed through the matching
//! `validate_*_form` function.

use serde::{Deserialize, Serialize};

/// Workshop add/update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopForm {
    /// Present on update submissions only.
    pub id: Option<String>,
    /// Older admin screens post the class name as `title`.
    #[serde(alias = "title")]
    pub name: String,
    pub instructor: String,
    pub date: String,
    pub spots: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqForm {
    pub id: Option<String>,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub id: Option<String>,
    pub name: String,
    pub review: String,
    pub rating: String,
    pub date: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryForm {
    pub id: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterForm {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub content: String,
    pub image: Option<String>,
}

/// Delete form. Only the record id is posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordIdForm {
    pub id: Option<String>,
}
