// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password rules for studio admin accounts.
//!
//! Applied when the first admin is provisioned from the environment, before
//! the password is hashed and stored.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// The password repeats the login or display name.
    #[error("Password must not match {field}")]
    MatchesAccountName { field: &'static str },
}

/// Length and character-class requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// How many of the four character classes must appear.
    pub min_classes: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 12,
            min_classes: 3,
        }
    }
}

impl PasswordPolicy {
    /// Checks `password` for the account identified by `login_name` and
    /// `display_name`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(
        &self,
        password: &str,
        login_name: &str,
        display_name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let found: usize = Self::character_classes(password);
        if found < self.min_classes {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_classes,
                found,
            });
        }

        if password.eq_ignore_ascii_case(login_name.trim()) {
            return Err(PasswordPolicyError::MatchesAccountName {
                field: "login_name",
            });
        }
        if password.eq_ignore_ascii_case(display_name.trim()) {
            return Err(PasswordPolicyError::MatchesAccountName {
                field: "display_name",
            });
        }

        Ok(())
    }

    /// Counts uppercase, lowercase, digit and symbol classes present.
    fn character_classes(password: &str) -> usize {
        let checks: [fn(&char) -> bool; 4] = [
            char::is_ascii_uppercase,
            char::is_ascii_lowercase,
            char::is_ascii_digit,
            |c: &char| !c.is_alphanumeric() && !c.is_whitespace(),
        ];

        checks
            .iter()
            .filter(|check| password.chars().any(|c| check(&c)))
            .count()
    }
}
