// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use travelease_domain::DiscountKind;

use crate::{DiscountData, NewDiscount, Persistence, PersistenceError};

fn new_discount(code: &str, kind: DiscountKind, amount: Option<i64>) -> NewDiscount {
    NewDiscount {
        code: code.to_string(),
        discount_type: kind,
        amount,
        expiry_date: Some(time::macros::date!(2026 - 12 - 31)),
        is_active: true,
    }
}

#[test]
fn test_create_discount_uppercases_code() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_discount(&new_discount(" summer10 ", DiscountKind::Percentage, Some(10)))
        .unwrap();

    let discount: DiscountData = persistence
        .get_discount_by_code("Summer10")
        .unwrap()
        .unwrap();
    assert_eq!(discount.code, "SUMMER10");
    assert_eq!(discount.discount_type, "percentage");
    assert_eq!(discount.amount, Some(10));
    assert_eq!(discount.expiry_date.as_deref(), Some("2026-12-31"));
    assert!(discount.is_active);
}

#[test]
fn test_duplicate_code_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_discount(&new_discount("FLAT500", DiscountKind::Fixed, None))
        .unwrap();

    let result = persistence.create_discount(&new_discount("flat500", DiscountKind::Fixed, None));
    assert_eq!(
        result,
        Err(PersistenceError::DuplicateDiscountCode(String::from(
            "FLAT500"
        )))
    );
}

#[test]
fn test_list_count_and_delete_discounts() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: i64 = persistence
        .create_discount(&new_discount("FIRST", DiscountKind::Fixed, Some(250)))
        .unwrap();
    let mut inactive: NewDiscount = new_discount("SECOND", DiscountKind::Percentage, None);
    inactive.is_active = false;
    let second: i64 = persistence.create_discount(&inactive).unwrap();

    let ids: Vec<i64> = persistence
        .list_discounts()
        .unwrap()
        .iter()
        .map(|d| d.discount_id)
        .collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(persistence.count_discounts(false).unwrap(), 2);
    assert_eq!(persistence.count_discounts(true).unwrap(), 1);

    persistence.delete_discount(first).unwrap();
    assert!(persistence.get_discount_by_code("FIRST").unwrap().is_none());
    assert!(matches!(
        persistence.delete_discount(first),
        Err(PersistenceError::NotFound(_))
    ));
}
