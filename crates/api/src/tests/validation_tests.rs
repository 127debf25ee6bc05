// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the public validation handler.

use rust_decimal::Decimal;
use voucher_domain::{DiscountType, RejectionCode};
use voucher_persistence::Persistence;

use crate::handlers::{delete_voucher, set_voucher_status, validate_voucher_at};
use crate::tests::{
    InMemoryCatalog, admin_actor, create_request, live_product, seeded, test_now, validate_request,
};

#[test]
fn test_valid_voucher_computes_discount() {
    let (mut persistence, voucher) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    let response = validate_voucher_at(
        &mut persistence,
        &catalog,
        validate_request("SAVE20"),
        test_now(),
    )
    .unwrap();

    assert!(response.valid);
    assert_eq!(response.discount_amount, Some(Decimal::new(2_000, 2)));
    let summary = response.voucher.unwrap();
    assert_eq!(summary.voucher_id, voucher.voucher_id);
    assert_eq!(summary.code, "SAVE20");
    assert_eq!(response.rejection_code, None);
}

#[test]
fn test_unknown_code_rejects_as_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let catalog = InMemoryCatalog::empty();

    let response = validate_voucher_at(
        &mut persistence,
        &catalog,
        validate_request("NOSUCH"),
        test_now(),
    )
    .unwrap();

    assert!(!response.valid);
    assert_eq!(response.rejection_code, Some(RejectionCode::NotFound));
    assert_eq!(response.message.as_deref(), Some("This voucher does not exist"));
}

#[test]
fn test_malformed_code_is_indistinguishable_from_unknown() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let catalog = InMemoryCatalog::empty();

    let response = validate_voucher_at(
        &mut persistence,
        &catalog,
        validate_request("no spaces allowed!"),
        test_now(),
    )
    .unwrap();

    assert_eq!(response.rejection_code, Some(RejectionCode::NotFound));
    assert_eq!(response.message.as_deref(), Some("This voucher does not exist"));
}

#[test]
fn test_code_lookup_normalizes_case_and_whitespace() {
    let (mut persistence, _) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    let response = validate_voucher_at(
        &mut persistence,
        &catalog,
        validate_request("  save20  "),
        test_now(),
    )
    .unwrap();

    assert!(response.valid);
}

#[test]
fn test_deleted_voucher_rejects_as_not_found() {
    let (mut persistence, voucher) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    delete_voucher(
        &mut persistence,
        &admin_actor(),
        voucher.voucher_id,
        test_now(),
    )
    .unwrap();

    let response = validate_voucher_at(
        &mut persistence,
        &catalog,
        validate_request("SAVE20"),
        test_now(),
    )
    .unwrap();

    assert_eq!(response.rejection_code, Some(RejectionCode::NotFound));
}

#[test]
fn test_inactive_voucher_rejects_as_inactive() {
    let (mut persistence, voucher) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    set_voucher_status(
        &mut persistence,
        &admin_actor(),
        voucher.voucher_id,
        false,
        test_now(),
    )
    .unwrap();

    let response = validate_voucher_at(
        &mut persistence,
        &catalog,
        validate_request("SAVE20"),
        test_now(),
    )
    .unwrap();

    assert_eq!(response.rejection_code, Some(RejectionCode::Inactive));
}

#[test]
fn test_organization_mismatch_rejects() {
    let (mut persistence, _) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    let mut request = validate_request("SAVE20");
    request.organization_id = Some(String::from("org-2"));

    let response =
        validate_voucher_at(&mut persistence, &catalog, request, test_now()).unwrap();

    assert_eq!(
        response.rejection_code,
        Some(RejectionCode::OrganizationMismatch)
    );
}

#[test]
fn test_free_item_without_cart_prices_from_catalog() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let catalog = InMemoryCatalog::with_products(vec![live_product("prod-9")]);

    let mut create = create_request("FREEBIE");
    create.discount_type = DiscountType::FreeItem;
    create.discount_value = Decimal::ZERO;
    create.free_item_product_id = Some(String::from("prod-9"));
    crate::handlers::create_voucher(
        &mut persistence,
        &catalog,
        &admin_actor(),
        create,
        test_now(),
    )
    .unwrap();

    // Id lists only; no cart payload yet
    let mut request = validate_request("FREEBIE");
    request.items.clear();
    request.product_ids = vec![String::from("prod-9")];

    let response =
        validate_voucher_at(&mut persistence, &catalog, request, test_now()).unwrap();

    assert!(response.valid);
    assert_eq!(response.discount_amount, Some(Decimal::new(1_500, 2)));
    assert_eq!(response.free_item_product_id.as_deref(), Some("prod-9"));
}

#[test]
fn test_anonymous_user_validates_unrestricted_voucher() {
    let (mut persistence, _) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    let mut request = validate_request("SAVE20");
    request.user_id = None;

    let response =
        validate_voucher_at(&mut persistence, &catalog, request, test_now()).unwrap();

    assert!(response.valid);
}
