// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin add, update and delete actions.
//!
//! Each action validates the posted form first and only then touches the
//! database, issuing exactly one statement. A rejected form never reaches
//! persistence.

use earthen_domain::{
    ActionOutcome, FaqForm, GalleryForm, NewFaq, NewGalleryImage, NewNewsletterPost, NewReview,
    NewWorkshop, NewsletterForm, RecordIdForm, ReviewForm, WorkshopForm, parse_record_id,
    validate_faq_form, validate_gallery_form, validate_newsletter_form, validate_review_form,
    validate_workshop_form,
};
use earthen_persistence::Persistence;
use tracing::{info, warn};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};

fn record_id(id: Option<&String>) -> Result<i64, ApiError> {
    parse_record_id(id.map(String::as_str)).map_err(|e| {
        warn!(error = %e, "Rejected record id");
        translate_domain_error(e)
    })
}

fn rejected(entity: &str, err: earthen_domain::DomainError) -> ApiError {
    warn!(entity, error = %err, "Rejected admin form");
    translate_domain_error(err)
}

/// Adds a workshop.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the form fails validation, or
/// `ApiError::Internal` if the insert fails.
pub fn add_workshop(
    persistence: &mut Persistence,
    form: &WorkshopForm,
) -> Result<ActionOutcome, ApiError> {
    let workshop: NewWorkshop =
        validate_workshop_form(form).map_err(|e| rejected("workshop", e))?;
    let id: i64 = persistence
        .create_workshop(&workshop)
        .map_err(translate_persistence_error)?;

    info!(id, name = %workshop.name, "Added workshop");
    Ok(ActionOutcome::created(id))
}

/// Replaces the workshop named by `form.id`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a bad id or form,
/// `ApiError::ResourceNotFound` if no workshop has that id, or
/// `ApiError::Internal` if the update fails.
pub fn update_workshop(
    persistence: &mut Persistence,
    form: &WorkshopForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    let workshop: NewWorkshop =
        validate_workshop_form(form).map_err(|e| rejected("workshop", e))?;
    persistence
        .update_workshop(id, &workshop)
        .map_err(translate_persistence_error)?;

    info!(id, "Updated workshop");
    Ok(ActionOutcome::ok())
}

/// Deletes the workshop named by `form.id`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a bad id,
/// `ApiError::ResourceNotFound` if no workshop has that id, or
/// `ApiError::Internal` if the delete fails.
pub fn delete_workshop(
    persistence: &mut Persistence,
    form: &RecordIdForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    persistence
        .delete_workshop(id)
        .map_err(translate_persistence_error)?;

    info!(id, "Deleted workshop");
    Ok(ActionOutcome::ok())
}

/// Adds an FAQ. A blank category is stored as `General`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the form fails validation, or
/// `ApiError::Internal` if the insert fails.
pub fn add_faq(persistence: &mut Persistence, form: &FaqForm) -> Result<ActionOutcome, ApiError> {
    let faq: NewFaq = validate_faq_form(form).map_err(|e| rejected("faq", e))?;
    let id: i64 = persistence
        .create_faq(&faq)
        .map_err(translate_persistence_error)?;

    info!(id, category = %faq.category, "Added FAQ");
    Ok(ActionOutcome::created(id))
}

/// Replaces the FAQ named by `form.id`.
///
/// # Errors
///
/// See [`update_workshop`].
pub fn update_faq(persistence: &mut Persistence, form: &FaqForm) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    let faq: NewFaq = validate_faq_form(form).map_err(|e| rejected("faq", e))?;
    persistence
        .update_faq(id, &faq)
        .map_err(translate_persistence_error)?;

    info!(id, "Updated FAQ");
    Ok(ActionOutcome::ok())
}

/// Deletes the FAQ named by `form.id`.
///
/// # Errors
///
/// See [`delete_workshop`].
pub fn delete_faq(
    persistence: &mut Persistence,
    form: &RecordIdForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    persistence
        .delete_faq(id)
        .map_err(translate_persistence_error)?;

    info!(id, "Deleted FAQ");
    Ok(ActionOutcome::ok())
}

/// Adds a review.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the form fails validation (including
/// a rating outside 1 to 5), or `ApiError::Internal` if the insert fails.
pub fn add_review(
    persistence: &mut Persistence,
    form: &ReviewForm,
) -> Result<ActionOutcome, ApiError> {
    let review: NewReview = validate_review_form(form).map_err(|e| rejected("review", e))?;
    let id: i64 = persistence
        .create_review(&review)
        .map_err(translate_persistence_error)?;

    info!(id, rating = review.rating, "Added review");
    Ok(ActionOutcome::created(id))
}

/// Replaces the review named by `form.id`.
///
/// # Errors
///
/// See [`update_workshop`].
pub fn update_review(
    persistence: &mut Persistence,
    form: &ReviewForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    let review: NewReview = validate_review_form(form).map_err(|e| rejected("review", e))?;
    persistence
        .update_review(id, &review)
        .map_err(translate_persistence_error)?;

    info!(id, "Updated review");
    Ok(ActionOutcome::ok())
}

/// Deletes the review named by `form.id`.
///
/// # Errors
///
/// See [`delete_workshop`].
pub fn delete_review(
    persistence: &mut Persistence,
    form: &RecordIdForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    persistence
        .delete_review(id)
        .map_err(translate_persistence_error)?;

    info!(id, "Deleted review");
    Ok(ActionOutcome::ok())
}

/// Adds a gallery image. The image is a URL, either public or `data:`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if no image is given, or
/// `ApiError::Internal` if the insert fails.
pub fn add_gallery_image(
    persistence: &mut Persistence,
    form: &GalleryForm,
) -> Result<ActionOutcome, ApiError> {
    let image: NewGalleryImage = validate_gallery_form(form).map_err(|e| rejected("gallery", e))?;
    let id: i64 = persistence
        .create_gallery_image(&image)
        .map_err(translate_persistence_error)?;

    info!(id, "Added gallery image");
    Ok(ActionOutcome::created(id))
}

/// Replaces the gallery image named by `form.id`.
///
/// # Errors
///
/// See [`update_workshop`].
pub fn update_gallery_image(
    persistence: &mut Persistence,
    form: &GalleryForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    let image: NewGalleryImage = validate_gallery_form(form).map_err(|e| rejected("gallery", e))?;
    persistence
        .update_gallery_image(id, &image)
        .map_err(translate_persistence_error)?;

    info!(id, "Updated gallery image");
    Ok(ActionOutcome::ok())
}

/// Deletes the gallery image named by `form.id`.
///
/// # Errors
///
/// See [`delete_workshop`].
pub fn delete_gallery_image(
    persistence: &mut Persistence,
    form: &RecordIdForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    persistence
        .delete_gallery_image(id)
        .map_err(translate_persistence_error)?;

    info!(id, "Deleted gallery image");
    Ok(ActionOutcome::ok())
}

/// Adds a newsletter post.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the form fails validation, or
/// `ApiError::Internal` if the insert fails.
pub fn add_newsletter_post(
    persistence: &mut Persistence,
    form: &NewsletterForm,
) -> Result<ActionOutcome, ApiError> {
    let post: NewNewsletterPost =
        validate_newsletter_form(form).map_err(|e| rejected("newsletter", e))?;
    let id: i64 = persistence
        .create_newsletter_post(&post)
        .map_err(translate_persistence_error)?;

    info!(id, slug = %post.slug, "Added newsletter post");
    Ok(ActionOutcome::created(id))
}

/// Replaces the newsletter post named by `form.id`.
///
/// # Errors
///
/// See [`update_workshop`].
pub fn update_newsletter_post(
    persistence: &mut Persistence,
    form: &NewsletterForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    let post: NewNewsletterPost =
        validate_newsletter_form(form).map_err(|e| rejected("newsletter", e))?;
    persistence
        .update_newsletter_post(id, &post)
        .map_err(translate_persistence_error)?;

    info!(id, slug = %post.slug, "Updated newsletter post");
    Ok(ActionOutcome::ok())
}

/// Deletes the newsletter post named by `form.id`.
///
/// # Errors
///
/// See [`delete_workshop`].
pub fn delete_newsletter_post(
    persistence: &mut Persistence,
    form: &RecordIdForm,
) -> Result<ActionOutcome, ApiError> {
    let id: i64 = record_id(form.id.as_ref())?;
    persistence
        .delete_newsletter_post(id)
        .map_err(translate_persistence_error)?;

    info!(id, "Deleted newsletter post");
    Ok(ActionOutcome::ok())
}
