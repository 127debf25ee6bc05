// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the redemption handler.

use rust_decimal::Decimal;
use voucher_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::{create_voucher, get_voucher, redeem_voucher, set_voucher_status};
use crate::request_response::RedeemVoucherRequest;
use crate::tests::{
    InMemoryCatalog, admin_actor, create_request, seeded, test_now, validate_request,
};

fn redeem_request(code: &str) -> RedeemVoucherRequest {
    let validation = validate_request(code);
    RedeemVoucherRequest {
        code: validation.code,
        user_id: validation.user_id,
        organization_id: validation.organization_id,
        order_id: Some(String::from("order-1")),
        order_amount: validation.order_amount,
        product_ids: validation.product_ids,
        category_ids: validation.category_ids,
        items: validation.items,
    }
}

#[test]
fn test_redeem_records_usage_and_advances_counter() {
    let (mut persistence, voucher) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    let response = redeem_voucher(
        &mut persistence,
        &catalog,
        redeem_request("SAVE20"),
        test_now(),
    )
    .unwrap();

    assert!(response.usage_id > 0);
    assert_eq!(response.voucher_id, voucher.voucher_id);
    assert_eq!(response.discount_amount, Decimal::new(2_000, 2));

    let reloaded = get_voucher(&mut persistence, &admin_actor(), voucher.voucher_id).unwrap();
    assert_eq!(reloaded.used_count, 1);
}

#[test]
fn test_redeem_requires_a_user() {
    let (mut persistence, _) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    let mut request = redeem_request("SAVE20");
    request.user_id = None;

    let err = redeem_voucher(&mut persistence, &catalog, request, test_now()).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "user_id"
    ));
}

#[test]
fn test_redeem_rejected_voucher_reports_rejection_rule() {
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

    let err = redeem_voucher(
        &mut persistence,
        &catalog,
        redeem_request("SAVE20"),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "INACTIVE"
    ));
}

#[test]
fn test_redeem_respects_per_user_limit() {
    let (mut persistence, _) = seeded("SAVE20");
    let catalog = InMemoryCatalog::empty();

    redeem_voucher(
        &mut persistence,
        &catalog,
        redeem_request("SAVE20"),
        test_now(),
    )
    .unwrap();

    // Default per-user limit is 1
    let err = redeem_voucher(
        &mut persistence,
        &catalog,
        redeem_request("SAVE20"),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "USER_USAGE_LIMIT_REACHED"
    ));
}

#[test]
fn test_redeem_respects_overall_limit() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let catalog = InMemoryCatalog::empty();

    let mut request = create_request("LIMITED");
    request.usage_limit = Some(1);
    create_voucher(
        &mut persistence,
        &catalog,
        &admin_actor(),
        request,
        test_now(),
    )
    .unwrap();

    let mut first = redeem_request("LIMITED");
    first.user_id = Some(String::from("user-1"));
    redeem_voucher(&mut persistence, &catalog, first, test_now()).unwrap();

    let mut second = redeem_request("LIMITED");
    second.user_id = Some(String::from("user-2"));
    let err = redeem_voucher(&mut persistence, &catalog, second, test_now()).unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "USAGE_LIMIT_REACHED"
    ));
}
