// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for voucher inserts, lookups, updates, and soft-delete
//! visibility.

use crate::tests::{create_test_voucher, test_now};
use crate::{Persistence, PersistenceError};
use rust_decimal::Decimal;
use voucher_domain::Voucher;

#[test]
fn test_insert_assigns_identifier_and_round_trips() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let inserted: Voucher = persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();

    assert!(inserted.voucher_id > 0);

    let loaded: Voucher = persistence.get_voucher(inserted.voucher_id).unwrap();
    assert_eq!(loaded, inserted);
}

#[test]
fn test_insert_rejects_duplicate_live_code() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();
    let result = persistence.insert_voucher(&create_test_voucher("SAVE20"));

    assert_eq!(
        result.unwrap_err(),
        PersistenceError::DuplicateCode(String::from("SAVE20"))
    );
}

#[test]
fn test_deleted_voucher_frees_its_code() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut first: Voucher = persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();
    first.is_deleted = true;
    first.is_active = false;
    persistence.update_voucher(&first).unwrap();

    let second: Voucher = persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();

    assert_ne!(second.voucher_id, first.voucher_id);
}

#[test]
fn test_get_voucher_hides_deleted_rows() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut voucher: Voucher = persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();
    voucher.is_deleted = true;
    voucher.is_active = false;
    persistence.update_voucher(&voucher).unwrap();

    assert_eq!(
        persistence.get_voucher(voucher.voucher_id).unwrap_err(),
        PersistenceError::VoucherNotFound(voucher.voucher_id)
    );
    assert!(persistence.find_voucher_by_code("SAVE20").unwrap().is_none());
}

#[test]
fn test_deletion_is_terminal() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut voucher: Voucher = persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();
    voucher.is_deleted = true;
    voucher.is_active = false;
    persistence.update_voucher(&voucher).unwrap();

    // A second update cannot match the deleted row
    voucher.is_deleted = false;
    assert_eq!(
        persistence.update_voucher(&voucher).unwrap_err(),
        PersistenceError::VoucherNotFound(voucher.voucher_id)
    );
}

#[test]
fn test_update_never_writes_used_count() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let voucher: Voucher = persistence
        .insert_voucher(&create_test_voucher("SAVE20"))
        .unwrap();
    persistence
        .record_redemption(
            voucher.voucher_id,
            "user-1",
            None,
            Decimal::from(10),
            test_now(),
        )
        .unwrap();

    // Stale in-memory state claims zero uses; the update must not
    // roll the counter back.
    let mut stale: Voucher = voucher.clone();
    stale.discount_value = Decimal::from(25);
    stale.used_count = 0;
    persistence.update_voucher(&stale).unwrap();

    let reloaded: Voucher = persistence.get_voucher(voucher.voucher_id).unwrap();
    assert_eq!(reloaded.used_count, 1);
    assert_eq!(reloaded.discount_value, Decimal::from(25));
}

#[test]
fn test_update_missing_voucher_reports_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut voucher: Voucher = create_test_voucher("SAVE20").with_id(999);
    voucher.discount_value = Decimal::from(5);

    assert_eq!(
        persistence.update_voucher(&voucher).unwrap_err(),
        PersistenceError::VoucherNotFound(999)
    );
}

#[test]
fn test_diesel_not_found_converts_to_database_error() {
    // Absent rows go through .optional() in the query layer, so the
    // raw diesel NotFound only surfaces as a generic database error.
    let err: PersistenceError = diesel::result::Error::NotFound.into();

    assert!(matches!(err, PersistenceError::DatabaseError(_)));
}

#[test]
fn test_list_vouchers_scopes_by_organization() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut org_one = create_test_voucher("ORG-ONE");
    org_one.organization_id = Some(String::from("org-1"));
    let mut org_two = create_test_voucher("ORG-TWO");
    org_two.organization_id = Some(String::from("org-2"));
    persistence.insert_voucher(&org_one).unwrap();
    persistence.insert_voucher(&org_two).unwrap();

    let scoped: Vec<Voucher> = persistence.list_vouchers(Some("org-1")).unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].code, "ORG-ONE");

    let all: Vec<Voucher> = persistence.list_vouchers(None).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_round_trip_preserves_optional_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut voucher = create_test_voucher("RICH");
    voucher.min_order_amount = Some(Decimal::new(4_999, 2));
    voucher.max_discount_amount = Some(Decimal::from(300));
    voucher.usage_limit = Some(100);
    voucher.valid_until = Some(test_now() + time::Duration::days(30));
    voucher.assigned_to_user_id = Some(String::from("user-7"));
    voucher.applicable_category_ids = vec![String::from("cat-1"), String::from("cat-2")];

    let inserted: Voucher = persistence.insert_voucher(&voucher).unwrap();
    let loaded: Voucher = persistence.get_voucher(inserted.voucher_id).unwrap();

    assert_eq!(loaded.min_order_amount, Some(Decimal::new(4_999, 2)));
    assert_eq!(loaded.max_discount_amount, Some(Decimal::from(300)));
    assert_eq!(loaded.usage_limit, Some(100));
    assert_eq!(loaded.valid_until, voucher.valid_until);
    assert_eq!(loaded.assigned_to_user_id, Some(String::from("user-7")));
    assert_eq!(loaded.applicable_category_ids, voucher.applicable_category_ids);
}
