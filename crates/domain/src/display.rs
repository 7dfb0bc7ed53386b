// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Workshop;
use serde::Serialize;

pub const DEFAULT_WORKSHOP_DURATION: &str = "3 hours";
pub const DEFAULT_WORKSHOP_PRICE: &str = "$85";
pub const DEFAULT_WORKSHOP_LEVEL: &str = "All Levels";
pub const DEFAULT_WORKSHOP_IMAGE: &str = "https://images.unsplash.com/photo-1578662996442-48f60103fc96?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

/// A workshop as shown on the public site.
///
/// Every optional column of [`Workshop`] that the public cards display is
/// filled with a studio default here. The stored record is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkshopCard {
    pub id: i64,
    pub name: String,
    pub instructor: String,
    pub date: String,
    pub spots: Option<i32>,
    pub level: String,
    pub description: String,
    pub duration: String,
    pub price: String,
    pub image: String,
    pub url: Option<String>,
}

impl WorkshopCard {
    #[must_use]
    pub fn from_workshop(workshop: &Workshop) -> Self {
        let description: String = workshop.description.clone().unwrap_or_else(|| {
            default_description(workshop.level.as_deref(), &workshop.instructor)
        });

        Self {
            id: workshop.id,
            name: workshop.name.clone(),
            instructor: workshop.instructor.clone(),
            date: workshop.date.clone(),
            spots: workshop.spots,
            level: workshop
                .level
                .clone()
                .unwrap_or_else(|| DEFAULT_WORKSHOP_LEVEL.to_string()),
            description,
            duration: workshop
                .duration
                .clone()
                .unwrap_or_else(|| DEFAULT_WORKSHOP_DURATION.to_string()),
            price: workshop
                .price
                .clone()
                .unwrap_or_else(|| DEFAULT_WORKSHOP_PRICE.to_string()),
            image: workshop
                .image
                .clone()
                .unwrap_or_else(|| DEFAULT_WORKSHOP_IMAGE.to_string()),
            url: workshop.url.clone(),
        }
    }
}

fn default_description(level: Option<&str>, instructor: &str) -> String {
    let class: String = level.map_or_else(
        || String::from("pottery class"),
        |l| format!("{} pottery class", l.to_lowercase()),
    );
    format!(
        "Join our {class} with {instructor}. Learn the fundamentals of pottery in a hands-on workshop."
    )
}
