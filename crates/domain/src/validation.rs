// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::forms::{FaqForm, GalleryForm, NewsletterForm, ReviewForm, WorkshopForm};
use crate::types::{
    DEFAULT_FAQ_CATEGORY, NewFaq, NewGalleryImage, NewNewsletterPost, NewReview, NewWorkshop,
};

/// Lowest accepted review rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted review rating.
pub const MAX_RATING: i32 = 5;

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

// Blank optional inputs are treated as absent.
fn optional(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_integer(field: &'static str, value: &str) -> Result<i64, DomainError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Parses a record id posted by an update or delete form.
///
/// # Errors
///
/// Returns `DomainError::InvalidRecordId` if the id is missing, not an
/// integer, or not positive.
pub fn parse_record_id(value: Option<&str>) -> Result<i64, DomainError> {
    let raw: &str = value.map(str::trim).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::InvalidRecordId(raw.to_string())),
    }
}

/// Validates a workshop form.
///
/// # Errors
///
/// Returns an error if `name`, `instructor` or `date` is blank, or if
/// `spots` is present but not a non-negative whole number.
pub fn validate_workshop_form(form: &WorkshopForm) -> Result<NewWorkshop, DomainError> {
    let spots: Option<i32> = match optional(form.spots.as_ref()) {
        Some(raw) => {
            let parsed: i64 = parse_integer("spots", &raw)?;
            let spots: i32 = i32::try_from(parsed)
                .ok()
                .filter(|s| *s >= 0)
                .ok_or(DomainError::InvalidNumber {
                    field: "spots",
                    value: raw,
                })?;
            Some(spots)
        }
        None => None,
    };

    Ok(NewWorkshop {
        name: required("name", &form.name)?,
        instructor: required("instructor", &form.instructor)?,
        date: required("date", &form.date)?,
        spots,
        level: optional(form.level.as_ref()),
        description: optional(form.description.as_ref()),
        duration: optional(form.duration.as_ref()),
        price: optional(form.price.as_ref()),
        image: optional(form.image.as_ref()),
        url: optional(form.url.as_ref()),
    })
}

/// Validates an FAQ form, defaulting a blank category to
/// [`DEFAULT_FAQ_CATEGORY`].
///
/// # Errors
///
/// Returns an error if `question` or `answer` is blank.
pub fn validate_faq_form(form: &FaqForm) -> Result<NewFaq, DomainError> {
    Ok(NewFaq {
        question: required("question", &form.question)?,
        answer: required("answer", &form.answer)?,
        category: optional(form.category.as_ref())
            .unwrap_or_else(|| DEFAULT_FAQ_CATEGORY.to_string()),
    })
}

/// Validates a review form.
///
/// # Errors
///
/// Returns an error if `name`, `review`, `rating` or `date` is blank, if the
/// rating is not a whole number, or if it falls outside
/// `MIN_RATING..=MAX_RATING`.
pub fn validate_review_form(form: &ReviewForm) -> Result<NewReview, DomainError> {
    let name: String = required("name", &form.name)?;
    let review: String = required("review", &form.review)?;
    let raw_rating: String = required("rating", &form.rating)?;
    let rating: i64 = parse_integer("rating", &raw_rating)?;
    let rating: i32 = i32::try_from(rating)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or(DomainError::RatingOutOfRange { rating })?;

    Ok(NewReview {
        name,
        review,
        rating,
        date: required("date", &form.date)?,
        role: optional(form.role.as_ref()),
    })
}

/// Validates a gallery form.
///
/// # Errors
///
/// Returns an error if `image` is blank.
pub fn validate_gallery_form(form: &GalleryForm) -> Result<NewGalleryImage, DomainError> {
    Ok(NewGalleryImage {
        image: required("image", &form.image)?,
    })
}

/// Validates a newsletter form.
///
/// # Errors
///
/// Returns an error if `title`, `slug`, `date` or `content` is blank.
pub fn validate_newsletter_form(form: &NewsletterForm) -> Result<NewNewsletterPost, DomainError> {
    let title: String = required("title", &form.title)?;
    let slug: String = required("slug", &form.slug)?;
    let date: String = required("date", &form.date)?;

    // Markdown keeps its leading indentation; only blankness is rejected.
    if form.content.trim().is_empty() {
        return Err(DomainError::MissingField { field: "content" });
    }

    Ok(NewNewsletterPost {
        title,
        slug,
        date,
        content: form.content.clone(),
        image: optional(form.image.as_ref()),
    })
}
