// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The ordered voucher validation pipeline.
//!
//! Checks run in a fixed order and short-circuit on the first failure.
//! A failed check is a rejection outcome, never an error: callers always
//! receive a `ValidationOutcome` they can render to the shopper.

use crate::discount::calculate_discount;
use crate::types::{CatalogProduct, DiscountType, OrderContext, Voucher, VoucherSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Why a voucher was rejected for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    /// No non-deleted voucher with the given code exists.
    NotFound,
    /// The voucher is deactivated.
    Inactive,
    /// The validity window has not opened yet.
    NotStarted,
    /// The validity window has closed.
    Expired,
    /// The overall usage limit is exhausted.
    UsageLimitReached,
    /// The per-user usage limit is exhausted, or the voucher is assigned
    /// to a different user.
    UserUsageLimitReached,
    /// The voucher requires an authenticated user.
    LoginRequired,
    /// The voucher belongs to a different organization.
    OrganizationMismatch,
    /// The order total is below the required minimum.
    MinOrderNotMet,
    /// The order does not contain applicable products, categories, or
    /// the configured free item.
    ProductsNotApplicable,
}

impl RejectionCode {
    /// The canonical wire representation of this rejection code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Inactive => "INACTIVE",
            Self::NotStarted => "NOT_STARTED",
            Self::Expired => "EXPIRED",
            Self::UsageLimitReached => "USAGE_LIMIT_REACHED",
            Self::UserUsageLimitReached => "USER_USAGE_LIMIT_REACHED",
            Self::LoginRequired => "LOGIN_REQUIRED",
            Self::OrganizationMismatch => "ORGANIZATION_MISMATCH",
            Self::MinOrderNotMet => "MIN_ORDER_NOT_MET",
            Self::ProductsNotApplicable => "PRODUCTS_NOT_APPLICABLE",
        }
    }
}

impl std::fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of running a voucher through the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every check passed; the voucher applies to the order.
    Valid {
        /// The redacted voucher view.
        voucher: VoucherSummary,
        /// The computed discount, rounded to 2 decimal places.
        discount_amount: Decimal,
        /// The granted product for FreeItem vouchers.
        free_item_product_id: Option<String>,
    },
    /// A check failed; the voucher does not apply.
    Rejected {
        /// The typed rejection reason.
        code: RejectionCode,
        /// A shopper-facing message.
        message: String,
    },
}

impl ValidationOutcome {
    /// Builds a rejection outcome.
    #[must_use]
    pub fn rejected(code: RejectionCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            message: message.into(),
        }
    }

    /// Whether the outcome is `Valid`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Runs the ordered validation checks for a loaded voucher and computes
/// the discount when every check passes.
///
/// The `NotFound` case is the caller's: this function is only reachable
/// once a non-deleted voucher has been loaded by code.
///
/// # Arguments
///
/// * `voucher` - The loaded voucher
/// * `order` - The order context to validate against
/// * `user_redemption_count` - Prior ledger rows for (voucher, user);
///   pass 0 when the caller is anonymous
/// * `free_item_product` - The resolved catalog product for FreeItem
///   vouchers, or `None` when the lookup missed
/// * `now` - The validation instant
#[must_use]
pub fn evaluate_voucher(
    voucher: &Voucher,
    order: &OrderContext,
    user_redemption_count: i64,
    free_item_product: Option<&CatalogProduct>,
    now: OffsetDateTime,
) -> ValidationOutcome {
    // 1. Active flag
    if !voucher.is_active {
        return ValidationOutcome::rejected(RejectionCode::Inactive, "This voucher is not active");
    }

    // 2. Window not yet open
    if now < voucher.valid_from {
        return ValidationOutcome::rejected(
            RejectionCode::NotStarted,
            format!(
                "This voucher is not valid until {}",
                voucher.valid_from.date()
            ),
        );
    }

    // 3. Window closed. The bound itself still validates.
    if let Some(until) = voucher.valid_until {
        if now > until {
            return ValidationOutcome::rejected(
                RejectionCode::Expired,
                "This voucher has expired",
            );
        }
    }

    // 4. Overall usage cap
    if let Some(limit) = voucher.usage_limit {
        if voucher.used_count >= limit {
            return ValidationOutcome::rejected(
                RejectionCode::UsageLimitReached,
                "This voucher has reached its usage limit",
            );
        }
    }

    // 5. Per-user usage cap
    if order.user_id.is_some() && user_redemption_count >= voucher.usage_limit_per_user {
        return ValidationOutcome::rejected(
            RejectionCode::UserUsageLimitReached,
            "You have already used this voucher the maximum number of times",
        );
    }

    // 6. Identity and tenancy. Refund vouchers are identity-bound and
    // skip the organization check entirely.
    if voucher.discount_type == DiscountType::Refund {
        let Some(user_id) = order.user_id.as_deref() else {
            return ValidationOutcome::rejected(
                RejectionCode::LoginRequired,
                "You must be logged in to use this voucher",
            );
        };
        if let Some(assigned) = voucher.assigned_to_user_id.as_deref() {
            if assigned != user_id {
                // Deliberately the same code as the per-user cap so the
                // response does not disclose that the code is assigned.
                return ValidationOutcome::rejected(
                    RejectionCode::UserUsageLimitReached,
                    "This voucher is not available for your account",
                );
            }
        }
    } else if let Some(org) = voucher.organization_id.as_deref() {
        if order.organization_id.as_deref() != Some(org) {
            return ValidationOutcome::rejected(
                RejectionCode::OrganizationMismatch,
                "This voucher is not valid for this store",
            );
        }
    }

    // 7. Minimum order amount
    if let Some(min) = voucher.min_order_amount {
        if order.order_amount < min {
            return ValidationOutcome::rejected(
                RejectionCode::MinOrderNotMet,
                format!("A minimum order amount of {min:.2} is required to use this voucher"),
            );
        }
    }

    // 8. Product restriction
    if !voucher.applicable_product_ids.is_empty()
        && !voucher
            .applicable_product_ids
            .iter()
            .any(|id| order.contains_product(id))
    {
        return ValidationOutcome::rejected(
            RejectionCode::ProductsNotApplicable,
            "This voucher does not apply to the items in your cart",
        );
    }

    // 9. Category restriction
    if !voucher.applicable_category_ids.is_empty()
        && !voucher
            .applicable_category_ids
            .iter()
            .any(|id| order.contains_category(id))
    {
        return ValidationOutcome::rejected(
            RejectionCode::ProductsNotApplicable,
            "This voucher does not apply to the items in your cart",
        );
    }

    // 10. Free-item availability
    if voucher.discount_type == DiscountType::FreeItem {
        if let Some(outcome) = check_free_item(voucher, order, free_item_product) {
            return outcome;
        }
    }

    let discount_amount: Decimal = calculate_discount(voucher, order, free_item_product);

    ValidationOutcome::Valid {
        voucher: voucher.summary(),
        discount_amount,
        free_item_product_id: voucher.free_item_product_id.clone(),
    }
}

/// Free-item checks: the configured product must still exist in the
/// catalog and appear in the order (id lists or cart). When the
/// product is carted and a variant is configured, a cart line must
/// match that variant; with no cart lines the variant is priced from
/// the catalog instead.
fn check_free_item(
    voucher: &Voucher,
    order: &OrderContext,
    free_item_product: Option<&CatalogProduct>,
) -> Option<ValidationOutcome> {
    let Some(product_id) = voucher.free_item_product_id.as_deref() else {
        return Some(ValidationOutcome::rejected(
            RejectionCode::ProductsNotApplicable,
            "The free item for this voucher is no longer available",
        ));
    };

    match free_item_product {
        Some(product) if !product.is_deleted => {}
        _ => {
            return Some(ValidationOutcome::rejected(
                RejectionCode::ProductsNotApplicable,
                "The free item for this voucher is no longer available",
            ));
        }
    }

    if !order.contains_product(product_id) {
        return Some(ValidationOutcome::rejected(
            RejectionCode::ProductsNotApplicable,
            "Add the free item to your cart to use this voucher",
        ));
    }

    let product_in_cart: bool = order.items.iter().any(|item| item.product_id == product_id);
    if let Some(variant_id) = voucher.free_item_variant_id.as_deref() {
        if product_in_cart && order.item_matching(product_id, Some(variant_id)).is_none() {
            return Some(ValidationOutcome::rejected(
                RejectionCode::ProductsNotApplicable,
                "Add the free item to your cart to use this voucher",
            ));
        }
    }

    None
}
