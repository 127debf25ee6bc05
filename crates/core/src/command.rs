// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::OffsetDateTime;
use voucher_domain::{CatalogProduct, DiscountType};

/// The full set of inputs for creating a voucher.
///
/// The `code` must already be resolved (supplied-and-normalized or
/// generated) by the caller; `apply_create` re-validates its format.
/// For FreeItem vouchers the caller resolves the configured product
/// against the catalog and passes the result in, keeping the transition
/// free of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVoucherParams {
    /// The resolved voucher code.
    pub code: String,
    /// The owning organization. `None` means platform-global.
    pub organization_id: Option<String>,
    /// Denormalized organization display name.
    pub organization_name: Option<String>,
    /// The discount mechanics.
    pub discount_type: DiscountType,
    /// The discount value, validated against the type.
    pub discount_value: Decimal,
    /// Minimum order amount required to redeem.
    pub min_order_amount: Option<Decimal>,
    /// Cap on the computed discount (Percentage only).
    pub max_discount_amount: Option<Decimal>,
    /// Product restriction. Empty means unrestricted.
    pub applicable_product_ids: Vec<String>,
    /// Category restriction. Empty means unrestricted.
    pub applicable_category_ids: Vec<String>,
    /// The granted product (FreeItem only).
    pub free_item_product_id: Option<String>,
    /// Optional specific variant of the granted product.
    pub free_item_variant_id: Option<String>,
    /// Granted quantity. Defaults to 1.
    pub free_item_quantity: Option<i64>,
    /// The resolved catalog product for FreeItem validation.
    pub free_item_product: Option<CatalogProduct>,
    /// Overall redemption cap.
    pub usage_limit: Option<i64>,
    /// Per-user redemption cap. Defaults to 1.
    pub usage_limit_per_user: Option<i64>,
    /// Start of the validity window.
    pub valid_from: OffsetDateTime,
    /// End of the validity window.
    pub valid_until: Option<OffsetDateTime>,
    /// Initial activation state. Defaults to active.
    pub is_active: Option<bool>,
    /// The only user who may redeem (Refund only).
    pub assigned_to_user_id: Option<String>,
    /// Identifier of the creating actor.
    pub created_by: String,
    /// Denormalized display name of the creating actor.
    pub created_by_name: Option<String>,
}

/// An update to a single optional field.
///
/// Distinguishes "leave the field alone" from "clear it" from "set it".
/// Only nullable constraint fields support `Clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the current value untouched.
    Keep,
    /// Clear the current value.
    Clear,
    /// Replace the current value.
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldUpdate<T> {
    /// Whether this update leaves the field untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Resolves the update against the current value.
    #[must_use]
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

/// Partial changes to an existing voucher.
///
/// Absent fields are left untouched. `discount_type` is deliberately not
/// representable; the type of a voucher is immutable. `used_count` is
/// owned by redemption recording and equally absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoucherChanges {
    /// New discount value, re-validated against the existing type.
    pub discount_value: Option<Decimal>,
    pub min_order_amount: FieldUpdate<Decimal>,
    pub max_discount_amount: FieldUpdate<Decimal>,
    pub applicable_product_ids: Option<Vec<String>>,
    pub applicable_category_ids: Option<Vec<String>>,
    pub free_item_variant_id: FieldUpdate<String>,
    pub free_item_quantity: Option<i64>,
    pub usage_limit: FieldUpdate<i64>,
    pub usage_limit_per_user: Option<i64>,
    pub valid_from: Option<OffsetDateTime>,
    pub valid_until: FieldUpdate<OffsetDateTime>,
    pub assigned_to_user_id: FieldUpdate<String>,
}

/// A command represents caller intent as data only.
///
/// Commands are the only way to request lifecycle changes. The target
/// voucher is the one the command is applied to; commands carry no
/// identifiers of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new voucher.
    CreateVoucher {
        /// The creation inputs.
        params: CreateVoucherParams,
    },
    /// Partially update an existing voucher.
    UpdateVoucher {
        /// The fields to change.
        changes: VoucherChanges,
    },
    /// Soft-delete a voucher. Terminal.
    DeleteVoucher,
    /// Activate or deactivate a voucher.
    SetVoucherStatus {
        /// The new activation state.
        is_active: bool,
    },
}
