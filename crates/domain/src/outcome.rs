// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Result of an admin action as reported back to the form that submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    /// Id of the created record, for add actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            id: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn created(id: i64) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(message.into()),
        }
    }
}
