// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use earthen_domain::{Faq, GalleryImage, NewsletterPost, Review, Workshop};

use crate::form::FormFields;

/// A record that can be listed in an admin table and edited in a form.
pub trait FormRecord {
    /// Dashboard path segment, e.g. `workshops`.
    const ENTITY: &'static str;
    /// Table column headings, matching [`FormRecord::table_cells`].
    const COLUMNS: &'static [&'static str];

    fn record_id(&self) -> i64;

    /// Field values used to prefill the edit form.
    fn form_fields(&self) -> FormFields;

    fn table_cells(&self) -> Vec<String>;
}

/// One table row with its Edit and Delete target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    pub id: i64,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<AdminRow>,
}

impl AdminTable {
    /// One row per record, in the order given.
    #[must_use]
    pub fn from_records<R: FormRecord>(records: &[R]) -> Self {
        Self {
            columns: R::COLUMNS.to_vec(),
            rows: records
                .iter()
                .map(|record| AdminRow {
                    id: record.record_id(),
                    cells: record.table_cells(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn row(&self, id: i64) -> Option<&AdminRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn fields<const N: usize>(pairs: [(&str, &str); N]) -> FormFields {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn or_empty(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

impl FormRecord for Workshop {
    const ENTITY: &'static str = "workshops";
    const COLUMNS: &'static [&'static str] = &["Name", "Instructor", "Date", "Spots", "Level"];

    fn record_id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        let spots: String = self.spots.map_or_else(String::new, |s| s.to_string());
        fields([
            ("name", self.name.as_str()),
            ("instructor", self.instructor.as_str()),
            ("date", self.date.as_str()),
            ("spots", spots.as_str()),
            ("level", or_empty(self.level.as_ref())),
            ("description", or_empty(self.description.as_ref())),
            ("duration", or_empty(self.duration.as_ref())),
            ("price", or_empty(self.price.as_ref())),
            ("image", or_empty(self.image.as_ref())),
            ("url", or_empty(self.url.as_ref())),
        ])
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.instructor.clone(),
            self.date.clone(),
            self.spots.map_or_else(String::new, |s| s.to_string()),
            self.level.clone().unwrap_or_default(),
        ]
    }
}

impl FormRecord for Faq {
    const ENTITY: &'static str = "faqs";
    const COLUMNS: &'static [&'static str] = &["Question", "Category", "Answer"];

    fn record_id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        fields([
            ("question", self.question.as_str()),
            ("answer", self.answer.as_str()),
            ("category", self.category.as_str()),
        ])
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.question.clone(),
            self.category.clone(),
            self.answer.clone(),
        ]
    }
}

impl FormRecord for Review {
    const ENTITY: &'static str = "reviews";
    const COLUMNS: &'static [&'static str] = &["Name", "Role", "Rating", "Date", "Review"];

    fn record_id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        let rating: String = self.rating.to_string();
        fields([
            ("name", self.name.as_str()),
            ("review", self.review.as_str()),
            ("rating", rating.as_str()),
            ("date", self.date.as_str()),
            ("role", self.role.as_str()),
        ])
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.clone(),
            self.rating.to_string(),
            self.date.clone(),
            self.review.clone(),
        ]
    }
}

impl FormRecord for GalleryImage {
    const ENTITY: &'static str = "gallery";
    const COLUMNS: &'static [&'static str] = &["Image"];

    fn record_id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        fields([("image", self.image.as_str())])
    }

    // Inline images are shown as a label rather than their base64 payload.
    fn table_cells(&self) -> Vec<String> {
        let label: String = match self.image.split_once(";base64,") {
            Some((mime, _)) if self.image.starts_with("data:") => {
                format!("Inline {}", mime.trim_start_matches("data:"))
            }
            _ => self.image.clone(),
        };
        vec![label]
    }
}

impl FormRecord for NewsletterPost {
    const ENTITY: &'static str = "newsletter";
    const COLUMNS: &'static [&'static str] = &["Title", "Slug", "Date"];

    fn record_id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        fields([
            ("title", self.title.as_str()),
            ("slug", self.slug.as_str()),
            ("date", self.date.as_str()),
            ("content", self.content.as_str()),
            ("image", or_empty(self.image.as_ref())),
        ])
    }

    fn table_cells(&self) -> Vec<String> {
        vec![self.title.clone(), self.slug.clone(), self.date.clone()]
    }
}
