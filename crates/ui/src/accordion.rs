// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

/// Which FAQ entries are expanded. Any number may be open at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    open: BTreeSet<i64>,
}

impl Accordion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `id` if closed, closes it if open. Returns whether it is now
    /// open.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.open.remove(&id) {
            false
        } else {
            self.open.insert(id);
            true
        }
    }

    #[must_use]
    pub fn is_open(&self, id: i64) -> bool {
        self.open.contains(&id)
    }

    /// Open ids in ascending order.
    #[must_use]
    pub fn open_ids(&self) -> Vec<i64> {
        self.open.iter().copied().collect()
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }
}
