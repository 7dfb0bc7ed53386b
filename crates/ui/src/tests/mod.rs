// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod accordion;
mod carousel;

use earthen_domain::{Faq, GalleryImage, Workshop};

pub fn create_test_faq(id: i64, question: &str) -> Faq {
    Faq {
        id,
        question: String::from(question),
        answer: String::from("Yes."),
        category: String::from("Care"),
    }
}

pub fn create_test_workshop(id: i64) -> Workshop {
    Workshop {
        id,
        name: String::from("Wheel Basics"),
        instructor: String::from("Maya"),
        date: String::from("2026-03-14"),
        spots: Some(8),
        level: Some(String::from("Beginner")),
        description: None,
        duration: None,
        price: Some(String::from("$90")),
        image: None,
        url: None,
    }
}

pub fn create_test_image(id: i64, image: &str) -> GalleryImage {
    GalleryImage {
        id,
        image: String::from(image),
    }
}
