// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod initialization_tests;
mod voucher_store_tests;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use voucher_audit::{Actor, AuditEntry, AuditSeverity};
use voucher_domain::{DiscountType, NewVoucher};

pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap() // 2026-01-01T00:00:00Z
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("admin"))
}

pub fn create_test_voucher(code: &str) -> NewVoucher {
    NewVoucher {
        code: code.to_string(),
        organization_id: Some(String::from("org-1")),
        organization_name: Some(String::from("Acme Store")),
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(20),
        min_order_amount: None,
        max_discount_amount: None,
        applicable_product_ids: vec![String::from("prod-1")],
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
        created_by: String::from("test-actor"),
        created_by_name: Some(String::from("Test Actor")),
        created_at: test_now(),
        updated_at: test_now(),
    }
}

pub fn create_test_audit_entry(action: &str) -> AuditEntry {
    AuditEntry::new(
        action.to_string(),
        AuditSeverity::Medium,
        format!("Test entry for {action}"),
        create_test_actor(),
        Some(String::from("org-1")),
        serde_json::json!({"source": "test"}),
    )
}
