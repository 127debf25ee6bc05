// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod discount;
mod error;
mod pipeline;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use discount::{calculate_discount, round_currency};
pub use error::DomainError;
pub use pipeline::{RejectionCode, ValidationOutcome, evaluate_voucher};
pub use types::{
    CartItem, CatalogProduct, DiscountType, NewVoucher, OrderContext, ProductVariant, Voucher,
    VoucherSummary,
};
pub use validation::{
    validate_discount_value, validate_free_item_config, validate_usage_limits,
    validate_validity_window, validate_voucher_code,
};
