// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for capability computation.

use rust_decimal::Decimal;
use time::OffsetDateTime;
use voucher_domain::{DiscountType, Voucher};

use crate::capabilities::compute_voucher_capabilities;
use crate::request_response::Capability;
use crate::tests::{admin_actor, manager_actor, test_now};

fn voucher(organization_id: Option<&str>) -> Voucher {
    Voucher {
        voucher_id: 7,
        code: String::from("SAVE20"),
        organization_id: organization_id.map(String::from),
        organization_name: None,
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::new(20, 0),
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
        valid_from: test_now(),
        valid_until: None,
        is_active: true,
        is_deleted: false,
        assigned_to_user_id: None,
        created_by: String::from("admin-1"),
        created_by_name: None,
        created_at: test_now(),
        updated_at: test_now(),
    }
}

#[test]
fn test_deleted_voucher_denies_everything() {
    let mut deleted = voucher(Some("org-1"));
    deleted.is_deleted = true;
    deleted.updated_at = OffsetDateTime::from_unix_timestamp(1_767_312_000).unwrap();

    let caps = compute_voucher_capabilities(&admin_actor(), &deleted);
    assert_eq!(caps.can_update, Capability::Denied);
    assert_eq!(caps.can_delete, Capability::Denied);
    assert_eq!(caps.can_toggle_status, Capability::Denied);
}

#[test]
fn test_admin_manages_any_scope() {
    let caps = compute_voucher_capabilities(&admin_actor(), &voucher(None));
    assert_eq!(caps.can_update, Capability::Allowed);
    assert_eq!(caps.can_delete, Capability::Allowed);
    assert_eq!(caps.can_toggle_status, Capability::Allowed);
}

#[test]
fn test_manager_scoping() {
    let own = compute_voucher_capabilities(&manager_actor(), &voucher(Some("org-1")));
    assert_eq!(own.can_update, Capability::Allowed);

    let foreign = compute_voucher_capabilities(&manager_actor(), &voucher(Some("org-2")));
    assert_eq!(foreign.can_update, Capability::Denied);

    let global = compute_voucher_capabilities(&manager_actor(), &voucher(None));
    assert_eq!(global.can_toggle_status, Capability::Denied);
}
