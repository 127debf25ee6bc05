// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use voucher_domain::DomainError;
use voucher_engine::CoreError;
use voucher_persistence::PersistenceError;

use crate::catalog::CatalogError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCode(msg) => ApiError::InvalidInput {
            field: String::from("code"),
            message: msg,
        },
        DomainError::InvalidDiscountValue { message, .. } => ApiError::InvalidInput {
            field: String::from("discount_value"),
            message,
        },
        DomainError::InvalidValidityWindow(msg) => ApiError::InvalidInput {
            field: String::from("valid_until"),
            message: msg,
        },
        DomainError::InvalidUsageLimit(msg) => ApiError::InvalidInput {
            field: String::from("usage_limit"),
            message: msg,
        },
        DomainError::UsageLimitBelowUsedCount {
            usage_limit,
            used_count,
        } => ApiError::DomainRuleViolation {
            rule: String::from("usage_limit_floor"),
            message: format!(
                "Usage limit {usage_limit} cannot be below the {used_count} redemptions already recorded"
            ),
        },
        DomainError::MissingFreeItemProduct => ApiError::InvalidInput {
            field: String::from("free_item_product_id"),
            message: String::from("A free-item voucher requires a product"),
        },
        DomainError::FreeItemProductUnavailable(product_id) => ApiError::DomainRuleViolation {
            rule: String::from("free_item_product_available"),
            message: format!("Product '{product_id}' is not available as a free item"),
        },
        DomainError::InvalidFreeItemQuantity(quantity) => ApiError::InvalidInput {
            field: String::from("free_item_quantity"),
            message: format!("Invalid free item quantity: {quantity}. Must be at least 1"),
        },
        DomainError::ImmutableDiscountType => ApiError::DomainRuleViolation {
            rule: String::from("immutable_discount_type"),
            message: String::from("The discount type of a voucher cannot be changed"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Duplicate codes surface as a domain rule violation, missing vouchers
/// as not-found; everything else is internal and not exposed in detail.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateCode(code) => ApiError::DomainRuleViolation {
            rule: String::from("unique_code"),
            message: format!("A voucher with code '{code}' already exists"),
        },
        PersistenceError::VoucherNotFound(voucher_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Voucher"),
            message: format!("Voucher {voucher_id} does not exist"),
        },
        PersistenceError::UsageLimitExhausted { voucher_id } => ApiError::DomainRuleViolation {
            rule: String::from("usage_limit"),
            message: format!("Voucher {voucher_id} has reached its usage limit"),
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}

/// Translates a catalog error into an API error.
#[must_use]
pub fn translate_catalog_error(err: CatalogError) -> ApiError {
    ApiError::Internal {
        message: format!("Catalog failure: {err}"),
    }
}
