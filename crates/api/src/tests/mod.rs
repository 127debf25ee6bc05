// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API layer tests.

mod capabilities_tests;
mod code_tests;
mod redemption_tests;
mod validation_tests;

use std::collections::HashMap;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use voucher_domain::{CatalogProduct, DiscountType};
use voucher_persistence::Persistence;

use crate::auth::{AuthenticatedActor, Role};
use crate::catalog::{CatalogError, ProductCatalog};
use crate::request_response::{
    CartItemInput, CreateVoucherRequest, ValidateVoucherRequest, VoucherResponse,
};

/// A fixed instant for deterministic tests: 2026-01-01T00:00:00Z.
fn test_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap()
}

fn admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::PlatformAdmin, Vec::new())
}

fn manager_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("manager-1"),
        Role::OrgManager,
        vec![String::from("org-1")],
    )
}

/// An in-memory catalog fixture keyed by product identifier.
struct InMemoryCatalog {
    products: HashMap<String, CatalogProduct>,
}

impl InMemoryCatalog {
    fn empty() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    fn with_products(products: Vec<CatalogProduct>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|p| (p.product_id.clone(), p))
                .collect(),
        }
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, product_id: &str) -> Result<Option<CatalogProduct>, CatalogError> {
        Ok(self.products.get(product_id).cloned())
    }
}

fn live_product(product_id: &str) -> CatalogProduct {
    CatalogProduct {
        product_id: product_id.to_string(),
        is_deleted: false,
        base_price: Decimal::new(1_500, 2),
        variants: Vec::new(),
    }
}

fn create_request(code: &str) -> CreateVoucherRequest {
    CreateVoucherRequest {
        code: Some(code.to_string()),
        code_prefix: None,
        organization_id: Some(String::from("org-1")),
        organization_name: Some(String::from("Org One")),
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::new(20, 0),
        min_order_amount: None,
        max_discount_amount: None,
        applicable_product_ids: Vec::new(),
        applicable_category_ids: Vec::new(),
        free_item_product_id: None,
        free_item_variant_id: None,
        free_item_quantity: None,
        usage_limit: None,
        usage_limit_per_user: None,
        valid_from: test_now(),
        valid_until: None,
        is_active: None,
        assigned_to_user_id: None,
    }
}

fn validate_request(code: &str) -> ValidateVoucherRequest {
    ValidateVoucherRequest {
        code: code.to_string(),
        user_id: Some(String::from("user-1")),
        organization_id: Some(String::from("org-1")),
        order_amount: Decimal::new(10_000, 2),
        product_ids: Vec::new(),
        category_ids: Vec::new(),
        items: vec![CartItemInput {
            product_id: String::from("prod-1"),
            variant_id: None,
            category_ids: vec![String::from("cat-1")],
            unit_price: Decimal::new(10_000, 2),
            quantity: 1,
        }],
    }
}

/// Creates a persistence instance with one voucher named by `code`.
fn seeded(code: &str) -> (Persistence, VoucherResponse) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let catalog = InMemoryCatalog::empty();
    let voucher = crate::handlers::create_voucher(
        &mut persistence,
        &catalog,
        &admin_actor(),
        create_request(code),
        test_now(),
    )
    .unwrap();
    (persistence, voucher)
}
