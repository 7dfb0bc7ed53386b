// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_review;
use crate::{Persistence, PersistenceError};
use earthen_domain::{NewReview, Review};

#[test]
fn test_create_review_loads_empty_role_when_absent() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let id: i64 = persistence.create_review(&create_test_review("Sam", 5)).unwrap();

    let reviews: Vec<Review> = persistence.list_reviews().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, id);
    assert_eq!(reviews[0].rating, 5);
    assert_eq!(reviews[0].role, "");
}

#[test]
fn test_create_review_keeps_role() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut review: NewReview = create_test_review("Priya", 4);
    review.role = Some(String::from("Weekly student"));
    persistence.create_review(&review).unwrap();

    assert_eq!(persistence.list_reviews().unwrap()[0].role, "Weekly student");
}

#[test]
fn test_rating_outside_range_is_rejected_by_schema() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_review(&create_test_review("Sam", 9));
    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    assert!(persistence.list_reviews().unwrap().is_empty());
}

#[test]
fn test_update_and_delete_review() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first: i64 = persistence.create_review(&create_test_review("Sam", 3)).unwrap();
    let second: i64 = persistence.create_review(&create_test_review("Ana", 4)).unwrap();

    persistence
        .update_review(first, &create_test_review("Sam", 5))
        .unwrap();
    persistence.delete_review(second).unwrap();

    let reviews: Vec<Review> = persistence.list_reviews().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, first);
    assert_eq!(reviews[0].rating, 5);
}
