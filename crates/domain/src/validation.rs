// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{CatalogProduct, DiscountType};
use rust_decimal::Decimal;
use time::OffsetDateTime;

/// Minimum length of a voucher code.
pub const CODE_MIN_LEN: usize = 3;
/// Maximum length of a voucher code.
pub const CODE_MAX_LEN: usize = 30;

/// Normalizes and validates a voucher code.
///
/// Normalization trims surrounding whitespace and uppercases; the result
/// must then match `[A-Z0-9_-]{3,30}`.
///
/// # Arguments
///
/// * `raw` - The code as supplied by the caller
///
/// # Returns
///
/// * `Ok(String)` containing the normalized code
/// * `Err(DomainError::InvalidCode)` if the normalized code is malformed
///
/// # Errors
///
/// Returns an error if the code is too short, too long, or contains
/// characters outside `A-Z`, `0-9`, `_`, `-`.
pub fn validate_voucher_code(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.trim().to_uppercase();

    // Rule: 3 to 30 characters
    if normalized.len() < CODE_MIN_LEN || normalized.len() > CODE_MAX_LEN {
        return Err(DomainError::InvalidCode(format!(
            "Code must be between {CODE_MIN_LEN} and {CODE_MAX_LEN} characters"
        )));
    }

    // Rule: uppercase alphanumerics, underscore, and hyphen only
    if !normalized
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(DomainError::InvalidCode(String::from(
            "Code may only contain letters, digits, underscores, and hyphens",
        )));
    }

    Ok(normalized)
}

/// Validates a discount value against its discount type.
///
/// # Errors
///
/// Returns an error if:
/// - Percentage values are not in (0, 100]
/// - `FixedAmount`/Refund values are not positive
pub fn validate_discount_value(
    discount_type: DiscountType,
    value: Decimal,
) -> Result<(), DomainError> {
    match discount_type {
        DiscountType::Percentage => {
            // Rule: percentage must be in (0, 100]
            if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(DomainError::InvalidDiscountValue {
                    discount_type,
                    message: format!("Percentage must be greater than 0 and at most 100, got {value}"),
                });
            }
        }
        DiscountType::FixedAmount | DiscountType::Refund => {
            // Rule: currency amounts must be positive
            if value <= Decimal::ZERO {
                return Err(DomainError::InvalidDiscountValue {
                    discount_type,
                    message: format!("Amount must be greater than 0, got {value}"),
                });
            }
        }
        // FreeItem and FreeShipping carry no meaningful value
        DiscountType::FreeItem | DiscountType::FreeShipping => {}
    }

    Ok(())
}

/// Validates the ordering of a validity window.
///
/// # Errors
///
/// Returns an error if both bounds are set and `valid_until` is not
/// strictly after `valid_from`.
pub fn validate_validity_window(
    valid_from: OffsetDateTime,
    valid_until: Option<OffsetDateTime>,
) -> Result<(), DomainError> {
    if let Some(until) = valid_until {
        if until <= valid_from {
            return Err(DomainError::InvalidValidityWindow(String::from(
                "valid_until must be after valid_from",
            )));
        }
    }

    Ok(())
}

/// Validates usage limits against each other and the recorded usage.
///
/// A limit equal to the recorded usage is allowed; it simply closes the
/// voucher to further redemptions.
///
/// # Errors
///
/// Returns an error if:
/// - Either limit is zero or negative
/// - The overall limit is below the recorded usage count
pub fn validate_usage_limits(
    usage_limit: Option<i64>,
    usage_limit_per_user: i64,
    used_count: i64,
) -> Result<(), DomainError> {
    if let Some(limit) = usage_limit {
        if limit < 1 {
            return Err(DomainError::InvalidUsageLimit(format!(
                "Usage limit must be at least 1, got {limit}"
            )));
        }
        // Rule: the limit may never drop below what has already been used
        if limit < used_count {
            return Err(DomainError::UsageLimitBelowUsedCount {
                usage_limit: limit,
                used_count,
            });
        }
    }

    if usage_limit_per_user < 1 {
        return Err(DomainError::InvalidUsageLimit(format!(
            "Per-user usage limit must be at least 1, got {usage_limit_per_user}"
        )));
    }

    Ok(())
}

/// Validates the free-item configuration of a FreeItem voucher at
/// creation time.
///
/// # Arguments
///
/// * `product` - The resolved catalog product, or `None` if the lookup missed
/// * `product_id` - The configured product identifier
/// * `quantity` - The configured free-item quantity
///
/// # Errors
///
/// Returns an error if the product is missing or deleted, or the
/// quantity is not positive.
pub fn validate_free_item_config(
    product: Option<&CatalogProduct>,
    product_id: Option<&str>,
    quantity: i64,
) -> Result<(), DomainError> {
    let Some(product_id) = product_id else {
        return Err(DomainError::MissingFreeItemProduct);
    };

    match product {
        Some(product) if !product.is_deleted => {}
        _ => {
            return Err(DomainError::FreeItemProductUnavailable(
                product_id.to_string(),
            ));
        }
    }

    if quantity < 1 {
        return Err(DomainError::InvalidFreeItemQuantity(quantity));
    }

    Ok(())
}
