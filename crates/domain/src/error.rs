// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::DiscountType;

/// Errors raised when a voucher violates a domain rule.
///
/// These are hard failures for lifecycle operations (create/update).
/// Validation-pipeline rejections are NOT errors; they are represented
/// by `ValidationOutcome::Rejected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The voucher code does not match the required format.
    InvalidCode(String),
    /// The discount value is out of range for the discount type.
    InvalidDiscountValue {
        /// The discount type the value was checked against.
        discount_type: DiscountType,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The validity window is inverted or degenerate.
    InvalidValidityWindow(String),
    /// A usage limit is structurally invalid (zero or negative).
    InvalidUsageLimit(String),
    /// The overall usage limit would drop below the recorded usage.
    UsageLimitBelowUsedCount {
        /// The requested usage limit.
        usage_limit: i64,
        /// The current redemption count.
        used_count: i64,
    },
    /// A free-item voucher is missing its product configuration.
    MissingFreeItemProduct,
    /// The configured free-item product does not exist or is deleted.
    FreeItemProductUnavailable(String),
    /// The configured free-item quantity is not positive.
    InvalidFreeItemQuantity(i64),
    /// The discount type of an existing voucher cannot be changed.
    ImmutableDiscountType,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCode(msg) => write!(f, "Invalid voucher code: {msg}"),
            Self::InvalidDiscountValue {
                discount_type,
                message,
            } => {
                write!(f, "Invalid discount value for {discount_type}: {message}")
            }
            Self::InvalidValidityWindow(msg) => write!(f, "Invalid validity window: {msg}"),
            Self::InvalidUsageLimit(msg) => write!(f, "Invalid usage limit: {msg}"),
            Self::UsageLimitBelowUsedCount {
                usage_limit,
                used_count,
            } => {
                write!(
                    f,
                    "Usage limit {usage_limit} is below the recorded usage count {used_count}"
                )
            }
            Self::MissingFreeItemProduct => {
                write!(f, "Free-item vouchers require a free item product")
            }
            Self::FreeItemProductUnavailable(product_id) => {
                write!(
                    f,
                    "Free item product '{product_id}' does not exist or is deleted"
                )
            }
            Self::InvalidFreeItemQuantity(quantity) => {
                write!(f, "Free item quantity must be at least 1, got {quantity}")
            }
            Self::ImmutableDiscountType => {
                write!(f, "The discount type of a voucher cannot be changed")
            }
        }
    }
}

impl std::error::Error for DomainError {}
