// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local state of an admin add/edit form.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use earthen_domain::{ActionOutcome, DEFAULT_FAQ_CATEGORY, Faq};

use crate::table::FormRecord;

/// Categories offered by the FAQ form's select, in display order.
pub const FAQ_CATEGORIES: [&str; 5] = [
    DEFAULT_FAQ_CATEGORY,
    "Care",
    "Shipping",
    "Custom",
    "Workshops",
];

/// Field name to raw input value.
pub type FormFields = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: i64 },
}

/// What the form asks the server to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Add { fields: FormFields },
    Update { id: i64, fields: FormFields },
    Delete { id: i64 },
}

impl FormSubmission {
    /// `add`, `update` or `delete`.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }

    /// Dashboard path the submission is posted to for records of type `R`.
    #[must_use]
    pub fn path<R: FormRecord>(&self) -> String {
        format!("/dashboard/{}/{}", R::ENTITY, self.action())
    }

    /// Form-encoded pairs, with `id` included for updates and deletes.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            Self::Add { fields } => fields.into_iter().collect(),
            Self::Update { id, fields } => std::iter::once((String::from("id"), id.to_string()))
                .chain(fields.into_iter().filter(|(name, _)| name != "id"))
                .collect(),
            Self::Delete { id } => vec![(String::from("id"), id.to_string())],
        }
    }
}

/// An admin form for records of type `R`.
///
/// Starts empty in add mode. Choosing "Edit" on a table row fills the fields
/// from that record and switches to edit mode; submitting or cancelling
/// returns to an empty add form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<R> {
    mode: FormMode,
    fields: FormFields,
    last_outcome: Option<ActionOutcome>,
    record: PhantomData<R>,
}

impl<R: FormRecord> Default for FormState<R> {
    fn default() -> Self {
        Self {
            mode: FormMode::Add,
            fields: FormFields::new(),
            last_outcome: None,
            record: PhantomData,
        }
    }
}

impl<R: FormRecord> FormState<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// The current value of `name`, empty when unset.
    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Loads `record` into the form for editing.
    pub fn edit(&mut self, record: &R) {
        self.mode = FormMode::Edit {
            id: record.record_id(),
        };
        self.fields = record.form_fields();
    }

    pub fn cancel(&mut self) {
        self.mode = FormMode::Add;
        self.fields.clear();
    }

    /// Takes the current input as a submission and resets the form.
    pub fn submit(&mut self) -> FormSubmission {
        let fields: FormFields = std::mem::take(&mut self.fields);
        let submission: FormSubmission = match self.mode {
            FormMode::Add => FormSubmission::Add { fields },
            FormMode::Edit { id } => FormSubmission::Update { id, fields },
        };
        self.mode = FormMode::Add;
        submission
    }

    /// Delete request for a table row. The form itself is left alone.
    #[must_use]
    pub const fn delete(&self, id: i64) -> FormSubmission {
        FormSubmission::Delete { id }
    }

    /// Stores the server's answer for inline display.
    pub fn record_outcome(&mut self, outcome: ActionOutcome) {
        self.last_outcome = Some(outcome);
    }

    #[must_use]
    pub const fn last_outcome(&self) -> Option<&ActionOutcome> {
        self.last_outcome.as_ref()
    }
}

impl FormState<Faq> {
    /// The category the select shows. A blank or unlisted value falls back
    /// to the default category.
    #[must_use]
    pub fn category(&self) -> &'static str {
        FAQ_CATEGORIES
            .into_iter()
            .find(|c| *c == self.field("category"))
            .unwrap_or(DEFAULT_FAQ_CATEGORY)
    }

    /// Picks a category. Values outside [`FAQ_CATEGORIES`] are ignored and
    /// `false` is returned.
    pub fn select_category(&mut self, category: &str) -> bool {
        if FAQ_CATEGORIES.contains(&category) {
            self.set_field("category", category);
            true
        } else {
            false
        }
    }
}
