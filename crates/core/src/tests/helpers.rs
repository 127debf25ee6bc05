// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for core tests.

use crate::command::CreateVoucherParams;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use voucher_audit::Actor;
use voucher_domain::{DiscountType, Voucher};

pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap() // 2026-01-01T00:00:00Z
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

/// Minimal valid parameters for a 20% voucher.
pub fn create_params(code: &str) -> CreateVoucherParams {
    CreateVoucherParams {
        code: code.to_string(),
        organization_id: Some(String::from("org-1")),
        organization_name: Some(String::from("Acme Store")),
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(20),
        min_order_amount: None,
        max_discount_amount: None,
        applicable_product_ids: Vec::new(),
        applicable_category_ids: Vec::new(),
        free_item_product_id: None,
        free_item_variant_id: None,
        free_item_quantity: None,
        free_item_product: None,
        usage_limit: None,
        usage_limit_per_user: None,
        valid_from: test_now(),
        valid_until: None,
        is_active: None,
        assigned_to_user_id: None,
        created_by: String::from("admin-1"),
        created_by_name: Some(String::from("Admin")),
    }
}

/// A persisted voucher as loaded before update/delete/toggle commands.
pub fn existing_voucher() -> Voucher {
    Voucher {
        voucher_id: 7,
        code: String::from("SAVE20"),
        organization_id: Some(String::from("org-1")),
        organization_name: Some(String::from("Acme Store")),
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(20),
        min_order_amount: None,
        max_discount_amount: None,
        applicable_product_ids: Vec::new(),
        applicable_category_ids: Vec::new(),
        free_item_product_id: None,
        free_item_variant_id: None,
        free_item_quantity: 1,
        usage_limit: Some(100),
        usage_limit_per_user: 1,
        used_count: 5,
        valid_from: test_now() - Duration::days(1),
        valid_until: None,
        is_active: true,
        is_deleted: false,
        assigned_to_user_id: None,
        created_by: String::from("admin-1"),
        created_by_name: Some(String::from("Admin")),
        created_at: test_now() - Duration::days(1),
        updated_at: test_now() - Duration::days(1),
    }
}
