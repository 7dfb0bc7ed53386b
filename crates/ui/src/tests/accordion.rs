// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Accordion;

#[test]
fn test_toggle_opens_and_closes() {
    let mut accordion: Accordion = Accordion::new();

    assert!(accordion.toggle(7));
    assert!(accordion.is_open(7));
    assert!(!accordion.toggle(7));
    assert!(!accordion.is_open(7));
}

#[test]
fn test_double_toggle_is_identity() {
    let mut accordion: Accordion = Accordion::new();
    accordion.toggle(1);
    accordion.toggle(4);
    let before: Accordion = accordion.clone();

    accordion.toggle(4);
    accordion.toggle(4);
    accordion.toggle(9);
    accordion.toggle(9);

    assert_eq!(accordion, before);
}

#[test]
fn test_several_items_stay_open() {
    let mut accordion: Accordion = Accordion::new();
    accordion.toggle(5);
    accordion.toggle(2);
    accordion.toggle(8);

    assert_eq!(accordion.open_ids(), vec![2, 5, 8]);

    accordion.close_all();
    assert!(accordion.open_ids().is_empty());
}
