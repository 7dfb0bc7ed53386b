// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_WORKSHOP_DURATION, DEFAULT_WORKSHOP_IMAGE, DEFAULT_WORKSHOP_LEVEL,
    DEFAULT_WORKSHOP_PRICE, Workshop, WorkshopCard,
};

fn bare_workshop() -> Workshop {
    Workshop {
        id: 7,
        name: String::from("Wheel Basics"),
        instructor: String::from("Maya"),
        date: String::from("2026-03-14"),
        spots: None,
        level: None,
        description: None,
        duration: None,
        price: None,
        image: None,
        url: None,
    }
}

#[test]
fn test_card_fills_every_display_default() {
    let card: WorkshopCard = WorkshopCard::from_workshop(&bare_workshop());

    assert_eq!(card.level, DEFAULT_WORKSHOP_LEVEL);
    assert_eq!(card.duration, DEFAULT_WORKSHOP_DURATION);
    assert_eq!(card.price, DEFAULT_WORKSHOP_PRICE);
    assert_eq!(card.image, DEFAULT_WORKSHOP_IMAGE);
    assert_eq!(
        card.description,
        "Join our pottery class with Maya. Learn the fundamentals of pottery in a hands-on workshop."
    );
    assert_eq!(card.spots, None);
}

#[test]
fn test_card_description_mentions_lowercased_level() {
    let mut workshop: Workshop = bare_workshop();
    workshop.level = Some(String::from("Beginner"));

    let card: WorkshopCard = WorkshopCard::from_workshop(&workshop);

    assert_eq!(card.level, "Beginner");
    assert!(card.description.starts_with("Join our beginner pottery class with Maya."));
}

#[test]
fn test_card_keeps_stored_values() {
    let mut workshop: Workshop = bare_workshop();
    workshop.description = Some(String::from("Throw a set of mugs."));
    workshop.duration = Some(String::from("2 hours"));
    workshop.price = Some(String::from("$60"));
    workshop.image = Some(String::from("/uploads/mugs.jpg"));
    workshop.spots = Some(4);

    let card: WorkshopCard = WorkshopCard::from_workshop(&workshop);

    assert_eq!(card.description, "Throw a set of mugs.");
    assert_eq!(card.duration, "2 hours");
    assert_eq!(card.price, "$60");
    assert_eq!(card.image, "/uploads/mugs.jpg");
    assert_eq!(card.spots, Some(4));
}
