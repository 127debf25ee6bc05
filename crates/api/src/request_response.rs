// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! These types define the API contract and are deliberately separate
//! from domain types: domain evolution must not silently change the
//! wire format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use voucher_domain::{CartItem, DiscountType, RejectionCode, ValidationOutcome, Voucher, VoucherSummary};

/// Request to create a voucher.
///
/// When `code` is absent, a code is generated from `code_prefix` (or a
/// default prefix when that is absent too).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVoucherRequest {
    /// The voucher code. Generated when absent.
    #[serde(default)]
    pub code: Option<String>,
    /// Prefix for generated codes.
    #[serde(default)]
    pub code_prefix: Option<String>,
    /// The owning organization. Absent means platform-global.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Denormalized organization display name.
    #[serde(default)]
    pub organization_name: Option<String>,
    /// The discount mechanics.
    pub discount_type: DiscountType,
    /// The discount value.
    pub discount_value: Decimal,
    /// Minimum order amount required to redeem.
    #[serde(default)]
    pub min_order_amount: Option<Decimal>,
    /// Cap on the computed discount.
    #[serde(default)]
    pub max_discount_amount: Option<Decimal>,
    /// Product restriction. Empty means unrestricted.
    #[serde(default)]
    pub applicable_product_ids: Vec<String>,
    /// Category restriction. Empty means unrestricted.
    #[serde(default)]
    pub applicable_category_ids: Vec<String>,
    /// The granted product for free-item vouchers.
    #[serde(default)]
    pub free_item_product_id: Option<String>,
    /// Optional specific variant of the granted product.
    #[serde(default)]
    pub free_item_variant_id: Option<String>,
    /// Granted quantity. Defaults to 1.
    #[serde(default)]
    pub free_item_quantity: Option<i64>,
    /// Overall redemption cap.
    #[serde(default)]
    pub usage_limit: Option<i64>,
    /// Per-user redemption cap. Defaults to 1.
    #[serde(default)]
    pub usage_limit_per_user: Option<i64>,
    /// Start of the validity window.
    #[serde(with = "time::serde::iso8601")]
    pub valid_from: OffsetDateTime,
    /// End of the validity window.
    #[serde(default, with = "time::serde::iso8601::option")]
    pub valid_until: Option<OffsetDateTime>,
    /// Initial activation state. Defaults to active.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// The only user who may redeem, for refund vouchers.
    #[serde(default)]
    pub assigned_to_user_id: Option<String>,
}

/// Request to partially update a voucher.
///
/// Absent fields are left untouched. Clearing a nullable field is
/// requested through its `clear_*` flag, which wins over a supplied
/// value. `discount_type` is accepted on the wire only to be rejected:
/// the type of a voucher is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateVoucherRequest {
    /// Present only in invalid requests; always rejected.
    #[serde(default)]
    pub discount_type: Option<DiscountType>,
    /// New discount value.
    #[serde(default)]
    pub discount_value: Option<Decimal>,
    #[serde(default)]
    pub min_order_amount: Option<Decimal>,
    #[serde(default)]
    pub clear_min_order_amount: bool,
    #[serde(default)]
    pub max_discount_amount: Option<Decimal>,
    #[serde(default)]
    pub clear_max_discount_amount: bool,
    #[serde(default)]
    pub applicable_product_ids: Option<Vec<String>>,
    #[serde(default)]
    pub applicable_category_ids: Option<Vec<String>>,
    #[serde(default)]
    pub free_item_variant_id: Option<String>,
    #[serde(default)]
    pub clear_free_item_variant_id: bool,
    #[serde(default)]
    pub free_item_quantity: Option<i64>,
    #[serde(default)]
    pub usage_limit: Option<i64>,
    #[serde(default)]
    pub clear_usage_limit: bool,
    #[serde(default)]
    pub usage_limit_per_user: Option<i64>,
    #[serde(default, with = "time::serde::iso8601::option")]
    pub valid_from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::iso8601::option")]
    pub valid_until: Option<OffsetDateTime>,
    #[serde(default)]
    pub clear_valid_until: bool,
    #[serde(default)]
    pub assigned_to_user_id: Option<String>,
    #[serde(default)]
    pub clear_assigned_to_user_id: bool,
}

/// A single cart line in a validation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemInput {
    /// The catalog product identifier.
    pub product_id: String,
    /// The specific variant, when the product has variants.
    #[serde(default)]
    pub variant_id: Option<String>,
    /// The categories the product belongs to.
    #[serde(default)]
    pub category_ids: Vec<String>,
    /// The unit price of this line.
    pub unit_price: Decimal,
    /// The quantity of this line.
    pub quantity: i64,
}

impl CartItemInput {
    /// Converts this input into the domain cart item.
    #[must_use]
    pub fn into_domain(self) -> CartItem {
        CartItem {
            product_id: self.product_id,
            variant_id: self.variant_id,
            category_ids: self.category_ids,
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }
}

/// Request to validate a voucher against an order.
///
/// `product_ids` and `category_ids` are supplied separately from
/// `items` so applicability can be checked before a full cart payload
/// exists; `items` carry the prices the discount is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateVoucherRequest {
    /// The voucher code as typed by the shopper.
    pub code: String,
    /// The redeeming user, when authenticated.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The storefront organization the order is placed in.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// The order total before discount.
    pub order_amount: Decimal,
    /// The products in the order, for applicability checks.
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// The categories the ordered products belong to.
    #[serde(default)]
    pub category_ids: Vec<String>,
    /// The cart contents.
    #[serde(default)]
    pub items: Vec<CartItemInput>,
}

/// The outcome of a validation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateVoucherResponse {
    /// Whether the voucher applies to this order.
    pub valid: bool,
    /// The voucher summary, present when valid.
    #[serde(default)]
    pub voucher: Option<VoucherSummary>,
    /// The computed discount, present when valid.
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    /// The granted product for free-item vouchers, present when valid.
    #[serde(default)]
    pub free_item_product_id: Option<String>,
    /// The typed rejection code, present when rejected.
    #[serde(default)]
    pub rejection_code: Option<RejectionCode>,
    /// The human-readable rejection message, present when rejected.
    #[serde(default)]
    pub message: Option<String>,
}

impl ValidateVoucherResponse {
    /// Builds a response from a pipeline outcome.
    #[must_use]
    pub fn from_outcome(outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Valid {
                voucher,
                discount_amount,
                free_item_product_id,
            } => Self {
                valid: true,
                voucher: Some(voucher),
                discount_amount: Some(discount_amount),
                free_item_product_id,
                rejection_code: None,
                message: None,
            },
            ValidationOutcome::Rejected { code, message } => Self::rejected(code, message),
        }
    }

    /// Builds a rejection response.
    #[must_use]
    pub const fn rejected(code: RejectionCode, message: String) -> Self {
        Self {
            valid: false,
            voucher: None,
            discount_amount: None,
            free_item_product_id: None,
            rejection_code: Some(code),
            message: Some(message),
        }
    }
}

/// Request to record a redemption after checkout completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemVoucherRequest {
    /// The voucher code as typed by the shopper.
    pub code: String,
    /// The redeeming user, when authenticated.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The storefront organization the order is placed in.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// The completed order, when known.
    #[serde(default)]
    pub order_id: Option<String>,
    /// The order total before discount.
    pub order_amount: Decimal,
    /// The products in the order, for applicability checks.
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// The categories the ordered products belong to.
    #[serde(default)]
    pub category_ids: Vec<String>,
    /// The cart contents.
    #[serde(default)]
    pub items: Vec<CartItemInput>,
}

/// The result of recording a redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemVoucherResponse {
    /// The ledger row recording this redemption.
    pub usage_id: i64,
    /// The voucher that was redeemed.
    pub voucher_id: i64,
    /// The discount granted.
    pub discount_amount: Decimal,
}

/// A full voucher as returned to back-office callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherResponse {
    pub voucher_id: i64,
    pub code: String,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub max_discount_amount: Option<Decimal>,
    pub applicable_product_ids: Vec<String>,
    pub applicable_category_ids: Vec<String>,
    pub free_item_product_id: Option<String>,
    pub free_item_variant_id: Option<String>,
    pub free_item_quantity: i64,
    pub usage_limit: Option<i64>,
    pub usage_limit_per_user: i64,
    pub used_count: i64,
    #[serde(with = "time::serde::iso8601")]
    pub valid_from: OffsetDateTime,
    #[serde(default, with = "time::serde::iso8601::option")]
    pub valid_until: Option<OffsetDateTime>,
    pub is_active: bool,
    pub assigned_to_user_id: Option<String>,
    pub created_by: String,
    pub created_by_name: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    pub updated_at: OffsetDateTime,
}

impl VoucherResponse {
    /// Builds a response from a domain voucher.
    #[must_use]
    pub fn from_voucher(voucher: Voucher) -> Self {
        Self {
            voucher_id: voucher.voucher_id,
            code: voucher.code,
            organization_id: voucher.organization_id,
            organization_name: voucher.organization_name,
            discount_type: voucher.discount_type,
            discount_value: voucher.discount_value,
            min_order_amount: voucher.min_order_amount,
            max_discount_amount: voucher.max_discount_amount,
            applicable_product_ids: voucher.applicable_product_ids,
            applicable_category_ids: voucher.applicable_category_ids,
            free_item_product_id: voucher.free_item_product_id,
            free_item_variant_id: voucher.free_item_variant_id,
            free_item_quantity: voucher.free_item_quantity,
            usage_limit: voucher.usage_limit,
            usage_limit_per_user: voucher.usage_limit_per_user,
            used_count: voucher.used_count,
            valid_from: voucher.valid_from,
            valid_until: voucher.valid_until,
            is_active: voucher.is_active,
            assigned_to_user_id: voucher.assigned_to_user_id,
            created_by: voucher.created_by,
            created_by_name: voucher.created_by_name,
            created_at: voucher.created_at,
            updated_at: voucher.updated_at,
        }
    }
}

/// Whether an action is available to the current actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Converts a boolean permission check into a capability.
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }
}

/// Capabilities of the current actor against one voucher.
///
/// Capabilities are advisory gating for user interfaces; every handler
/// still enforces authorization itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherCapabilities {
    pub can_update: Capability,
    pub can_delete: Capability,
    pub can_toggle_status: Capability,
}

/// An audit log entry as returned to back-office callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntryResponse {
    pub entry_id: i64,
    pub action: String,
    pub severity: String,
    pub message: String,
    pub actor_id: String,
    pub actor_type: String,
    pub organization_id: Option<String>,
    pub metadata: serde_json::Value,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}
