// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod initialization_tests;
mod operator_tests;
mod review_tests;
mod workshop_tests;

use earthen_domain::{NewNewsletterPost, NewReview, NewWorkshop};

pub fn create_test_workshop(name: &str, date: &str) -> NewWorkshop {
    NewWorkshop {
        name: String::from(name),
        instructor: String::from("Maya"),
        date: String::from(date),
        spots: None,
        level: None,
        description: None,
        duration: None,
        price: None,
        image: None,
        url: None,
    }
}

pub fn create_test_review(name: &str, rating: i32) -> NewReview {
    NewReview {
        name: String::from(name),
        review: String::from("Wonderful teachers and a calm studio."),
        rating,
        date: String::from("2026-02-01"),
        role: None,
    }
}

pub fn create_test_post(slug: &str, date: &str) -> NewNewsletterPost {
    NewNewsletterPost {
        title: format!("Post {slug}"),
        slug: String::from(slug),
        date: String::from(date),
        content: String::from("# Kiln news\n\nFiring on Friday."),
        image: None,
    }
}
