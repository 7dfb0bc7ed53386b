// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Image uploads from the admin dashboard.
//!
//! Every check runs on the buffered upload before anything is stored, so a
//! rejected file leaves nothing behind.

use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Default ceiling for uploaded images.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file provided")]
    NoFile,
    #[error("File must be an image")]
    NotAnImage,
    #[error("File size must be less than {limit}")]
    TooLarge { limit: String },
    #[error("Failed to upload file")]
    Storage(String),
}

/// A file as received from a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where accepted images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStorage {
    /// Returned to the caller as a `data:` URL; nothing is written.
    Inline,
    /// Written to `dir` under a generated name and served from
    /// `public_prefix`.
    Filesystem { dir: PathBuf, public_prefix: String },
}

/// Response body for a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    pub url: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub storage: ImageStorage,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            storage: ImageStorage::Inline,
        }
    }
}

impl UploadPolicy {
    /// The error for a file larger than `max_bytes`.
    #[must_use]
    pub fn too_large(&self) -> UploadError {
        UploadError::TooLarge {
            limit: describe_limit(self.max_bytes),
        }
    }

    /// Checks a size, possibly of a file still being received.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::TooLarge` once `size` exceeds `max_bytes`.
    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size > self.max_bytes {
            warn!(size, max = self.max_bytes, "Rejected oversized upload");
            return Err(self.too_large());
        }
        Ok(())
    }

    /// Checks `file` and stores it.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NoFile` when no file or an empty file was sent,
    /// `UploadError::NotAnImage` when the content type is not `image/*`,
    /// `UploadError::TooLarge` when it exceeds `max_bytes`, and
    /// `UploadError::Storage` when writing to disk fails.
    pub fn store(&self, file: Option<UploadedFile>) -> Result<StoredImage, UploadError> {
        let file: UploadedFile = file
            .filter(|f| !f.bytes.is_empty())
            .ok_or(UploadError::NoFile)?;

        let content_type: String = file
            .content_type
            .clone()
            .filter(|t| t.starts_with("image/"))
            .ok_or_else(|| {
                warn!(content_type = ?file.content_type, "Rejected non-image upload");
                UploadError::NotAnImage
            })?;

        self.check_size(file.bytes.len())?;

        match &self.storage {
            ImageStorage::Inline => {
                let encoded: String = STANDARD.encode(&file.bytes);
                info!(size = file.bytes.len(), %content_type, "Encoded inline image");
                Ok(StoredImage {
                    url: format!("data:{content_type};base64,{encoded}"),
                    filename: file.filename.unwrap_or_else(|| String::from("image")),
                    content_type,
                })
            }
            ImageStorage::Filesystem { dir, public_prefix } => {
                let stored_name: String =
                    format!("{}.{}", uuid::Uuid::new_v4(), extension_for(&content_type));

                std::fs::create_dir_all(dir)
                    .and_then(|()| std::fs::write(dir.join(&stored_name), &file.bytes))
                    .map_err(|e| {
                        warn!(error = %e, dir = %dir.display(), "Failed to store upload");
                        UploadError::Storage(e.to_string())
                    })?;

                info!(file = %stored_name, size = file.bytes.len(), "Stored uploaded image");
                Ok(StoredImage {
                    url: format!("{}/{stored_name}", public_prefix.trim_end_matches('/')),
                    filename: file.filename.unwrap_or(stored_name),
                    content_type,
                })
            }
        }
    }
}

/// Formats a byte ceiling for the size error, e.g. `2MB` or `512KB`.
fn describe_limit(max_bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if max_bytes >= MB && max_bytes.is_multiple_of(MB) {
        format!("{}MB", max_bytes / MB)
    } else {
        format!("{}KB", max_bytes.div_ceil(1024))
    }
}

/// File extension derived from an `image/*` content type.
fn extension_for(content_type: &str) -> String {
    let subtype: &str = content_type
        .trim_start_matches("image/")
        .split(['+', ';'])
        .next()
        .unwrap_or_default();

    match subtype {
        "jpeg" | "pjpeg" => String::from("jpg"),
        other if !other.is_empty() && other.chars().all(|c| c.is_ascii_alphanumeric()) => {
            other.to_ascii_lowercase()
        }
        _ => String::from("img"),
    }
}
