// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while validating submitted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or blank.
    MissingField {
        /// The form field name.
        field: &'static str,
    },
    /// A numeric field could not be parsed.
    InvalidNumber {
        /// The form field name.
        field: &'static str,
        /// The submitted value.
        value: String,
    },
    /// A review rating fell outside the accepted range.
    RatingOutOfRange {
        /// The submitted rating.
        rating: i64,
    },
    /// A record identifier was missing or not a positive integer.
    InvalidRecordId(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} must be a whole number, got '{value}'")
            }
            Self::RatingOutOfRange { rating } => {
                write!(f, "Rating must be between 1 and 5, got {rating}")
            }
            Self::InvalidRecordId(value) => write!(f, "Invalid record id: '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}
