// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for domain tests.

use crate::types::{CartItem, CatalogProduct, DiscountType, OrderContext, ProductVariant, Voucher};
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

/// A fixed validation instant so tests are deterministic.
pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap() // 2026-01-01T00:00:00Z
}

/// An active, unrestricted 20% voucher with an open window.
pub fn percentage_voucher() -> Voucher {
    Voucher {
        voucher_id: 1,
        code: String::from("SAVE20"),
        organization_id: None,
        organization_name: None,
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(20),
        min_order_amount: None,
        max_discount_amount: None,
        applicable_product_ids: Vec::new(),
        applicable_category_ids: Vec::new(),
        free_item_product_id: None,
        free_item_variant_id: None,
        free_item_quantity: 1,
        usage_limit: None,
        usage_limit_per_user: 1,
        used_count: 0,
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

/// An order with a single generic item totalling `amount`.
pub fn order(amount: i64) -> OrderContext {
    OrderContext {
        user_id: Some(String::from("user-1")),
        organization_id: None,
        order_amount: Decimal::from(amount),
        product_ids: Vec::new(),
        category_ids: Vec::new(),
        items: vec![CartItem {
            product_id: String::from("prod-1"),
            variant_id: None,
            category_ids: vec![String::from("cat-1")],
            unit_price: Decimal::from(amount),
            quantity: 1,
        }],
    }
}

/// A catalog product with two variants priced 40 and 60.
pub fn catalog_product(product_id: &str) -> CatalogProduct {
    CatalogProduct {
        product_id: product_id.to_string(),
        is_deleted: false,
        base_price: Decimal::from(50),
        variants: vec![
            ProductVariant {
                variant_id: String::from("var-a"),
                price: Decimal::from(40),
            },
            ProductVariant {
                variant_id: String::from("var-b"),
                price: Decimal::from(60),
            },
        ],
    }
}
