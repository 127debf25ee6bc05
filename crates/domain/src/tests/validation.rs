// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::tests::helpers::{catalog_product, test_now};
use crate::types::DiscountType;
use crate::validation::{
    validate_discount_value, validate_free_item_config, validate_usage_limits,
    validate_validity_window, validate_voucher_code,
};
use rust_decimal::Decimal;
use time::Duration;

#[test]
fn test_validate_voucher_code_normalizes_case_and_whitespace() {
    let normalized: String = validate_voucher_code("  summer-sale_26 ").unwrap();
    assert_eq!(normalized, "SUMMER-SALE_26");
}

#[test]
fn test_validate_voucher_code_rejects_too_short() {
    let err = validate_voucher_code("AB").unwrap_err();
    assert!(matches!(err, DomainError::InvalidCode(_)));
}

#[test]
fn test_validate_voucher_code_rejects_too_long() {
    let long: String = "A".repeat(31);
    let err = validate_voucher_code(&long).unwrap_err();
    assert!(matches!(err, DomainError::InvalidCode(_)));
}

#[test]
fn test_validate_voucher_code_accepts_boundary_lengths() {
    assert!(validate_voucher_code("ABC").is_ok());
    assert!(validate_voucher_code(&"A".repeat(30)).is_ok());
}

#[test]
fn test_validate_voucher_code_rejects_invalid_characters() {
    let err = validate_voucher_code("SAVE 20%").unwrap_err();
    assert!(matches!(err, DomainError::InvalidCode(_)));
}

#[test]
fn test_validate_discount_value_percentage_bounds() {
    assert!(validate_discount_value(DiscountType::Percentage, Decimal::from(100)).is_ok());
    assert!(validate_discount_value(DiscountType::Percentage, Decimal::from(101)).is_err());
    assert!(validate_discount_value(DiscountType::Percentage, Decimal::ZERO).is_err());
    assert!(validate_discount_value(DiscountType::Percentage, Decimal::from(-5)).is_err());
}

#[test]
fn test_validate_discount_value_fixed_amount_must_be_positive() {
    assert!(validate_discount_value(DiscountType::FixedAmount, Decimal::from(1)).is_ok());
    assert!(validate_discount_value(DiscountType::FixedAmount, Decimal::ZERO).is_err());
    assert!(validate_discount_value(DiscountType::Refund, Decimal::from(-10)).is_err());
}

#[test]
fn test_validate_discount_value_ignores_value_for_free_types() {
    assert!(validate_discount_value(DiscountType::FreeItem, Decimal::ZERO).is_ok());
    assert!(validate_discount_value(DiscountType::FreeShipping, Decimal::ZERO).is_ok());
}

#[test]
fn test_validate_validity_window_rejects_inverted_window() {
    let from = test_now();
    let err = validate_validity_window(from, Some(from - Duration::hours(1))).unwrap_err();
    assert!(matches!(err, DomainError::InvalidValidityWindow(_)));
}

#[test]
fn test_validate_validity_window_rejects_equal_bounds() {
    let from = test_now();
    assert!(validate_validity_window(from, Some(from)).is_err());
}

#[test]
fn test_validate_validity_window_accepts_open_ended() {
    assert!(validate_validity_window(test_now(), None).is_ok());
}

#[test]
fn test_validate_usage_limits_floor_against_used_count() {
    // Below the recorded usage fails
    let err = validate_usage_limits(Some(4), 1, 5).unwrap_err();
    assert_eq!(
        err,
        DomainError::UsageLimitBelowUsedCount {
            usage_limit: 4,
            used_count: 5,
        }
    );

    // Equal to the recorded usage is allowed
    assert!(validate_usage_limits(Some(5), 1, 5).is_ok());
}

#[test]
fn test_validate_usage_limits_rejects_non_positive_limits() {
    assert!(validate_usage_limits(Some(0), 1, 0).is_err());
    assert!(validate_usage_limits(None, 0, 0).is_err());
}

#[test]
fn test_validate_free_item_config_requires_product() {
    let err = validate_free_item_config(None, None, 1).unwrap_err();
    assert_eq!(err, DomainError::MissingFreeItemProduct);
}

#[test]
fn test_validate_free_item_config_rejects_missing_catalog_product() {
    let err = validate_free_item_config(None, Some("prod-9"), 1).unwrap_err();
    assert_eq!(
        err,
        DomainError::FreeItemProductUnavailable(String::from("prod-9"))
    );
}

#[test]
fn test_validate_free_item_config_rejects_deleted_catalog_product() {
    let mut product = catalog_product("prod-9");
    product.is_deleted = true;
    let err = validate_free_item_config(Some(&product), Some("prod-9"), 1).unwrap_err();
    assert!(matches!(err, DomainError::FreeItemProductUnavailable(_)));
}

#[test]
fn test_validate_free_item_config_rejects_zero_quantity() {
    let product = catalog_product("prod-9");
    let err = validate_free_item_config(Some(&product), Some("prod-9"), 0).unwrap_err();
    assert_eq!(err, DomainError::InvalidFreeItemQuantity(0));
}

#[test]
fn test_validate_free_item_config_accepts_valid_config() {
    let product = catalog_product("prod-9");
    assert!(validate_free_item_config(Some(&product), Some("prod-9"), 2).is_ok());
}
