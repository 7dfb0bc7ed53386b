// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_workshop;
use crate::{Persistence, PersistenceError};
use earthen_domain::{NewWorkshop, Workshop};

#[test]
fn test_create_workshop_then_list_includes_it() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut workshop: NewWorkshop = create_test_workshop("Wheel Basics", "2026-03-14");
    workshop.spots = Some(8);
    workshop.level = Some(String::from("Beginner"));

    let id: i64 = persistence.create_workshop(&workshop).unwrap();
    let workshops: Vec<Workshop> = persistence.list_workshops().unwrap();

    assert_eq!(workshops.len(), 1);
    let stored: &Workshop = &workshops[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, "Wheel Basics");
    assert_eq!(stored.spots, Some(8));
    assert_eq!(stored.level.as_deref(), Some("Beginner"));
    assert_eq!(stored.price, None);
}

#[test]
fn test_workshops_are_ordered_by_date() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .create_workshop(&create_test_workshop("Summer Glaze", "2026-07-01"))
        .unwrap();
    persistence
        .create_workshop(&create_test_workshop("Winter Mugs", "2026-01-15"))
        .unwrap();
    persistence
        .create_workshop(&create_test_workshop("Spring Bowls", "2026-04-20"))
        .unwrap();

    let names: Vec<String> = persistence
        .list_workshops()
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();

    assert_eq!(names, vec!["Winter Mugs", "Spring Bowls", "Summer Glaze"]);
}

#[test]
fn test_update_workshop_changes_only_that_record() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first: i64 = persistence
        .create_workshop(&create_test_workshop("Wheel Basics", "2026-03-14"))
        .unwrap();
    let second: i64 = persistence
        .create_workshop(&create_test_workshop("Hand Building", "2026-03-21"))
        .unwrap();

    let mut changed: NewWorkshop = create_test_workshop("Wheel Basics II", "2026-03-14");
    changed.price = Some(String::from("$95"));
    persistence.update_workshop(first, &changed).unwrap();

    let workshops: Vec<Workshop> = persistence.list_workshops().unwrap();
    let updated = workshops.iter().find(|w| w.id == first).unwrap();
    let untouched = workshops.iter().find(|w| w.id == second).unwrap();

    assert_eq!(updated.name, "Wheel Basics II");
    assert_eq!(updated.price.as_deref(), Some("$95"));
    assert_eq!(untouched.name, "Hand Building");
    assert_eq!(untouched.price, None);
}

#[test]
fn test_update_workshop_clears_omitted_optionals() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut workshop: NewWorkshop = create_test_workshop("Wheel Basics", "2026-03-14");
    workshop.image = Some(String::from("/uploads/wheel.jpg"));
    let id: i64 = persistence.create_workshop(&workshop).unwrap();

    persistence
        .update_workshop(id, &create_test_workshop("Wheel Basics", "2026-03-14"))
        .unwrap();

    assert_eq!(persistence.list_workshops().unwrap()[0].image, None);
}

#[test]
fn test_delete_workshop_removes_exactly_one() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let keep: i64 = persistence
        .create_workshop(&create_test_workshop("Keep", "2026-03-14"))
        .unwrap();
    let remove: i64 = persistence
        .create_workshop(&create_test_workshop("Remove", "2026-03-15"))
        .unwrap();

    persistence.delete_workshop(remove).unwrap();

    let ids: Vec<i64> = persistence
        .list_workshops()
        .unwrap()
        .into_iter()
        .map(|w| w.id)
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn test_update_and_delete_unknown_workshop_report_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let update = persistence.update_workshop(404, &create_test_workshop("Ghost", "2026-01-01"));
    assert!(matches!(update, Err(PersistenceError::NotFound(_))));

    let delete = persistence.delete_workshop(404);
    assert!(matches!(delete, Err(PersistenceError::NotFound(_))));
}
