// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API layer for the voucher engine.
//!
//! This crate sits between transport adapters and the core: it
//! authenticates nothing itself but authorizes everything, translates
//! requests into core commands, and maps every internal error onto the
//! API contract. Validation and redemption are the only unauthenticated
//! surfaces; all lifecycle operations require an actor.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod capabilities;
pub mod catalog;
pub mod code;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use capabilities::compute_voucher_capabilities;
pub use catalog::{CatalogError, ProductCatalog};
pub use code::generate_voucher_code;
pub use error::{ApiError, AuthError};
pub use handlers::{
    create_voucher, delete_voucher, get_voucher, list_audit_entries, list_vouchers,
    redeem_voucher, set_voucher_status, update_voucher, validate_voucher, validate_voucher_at,
};
pub use request_response::{
    AuditEntryResponse, CartItemInput, CreateVoucherRequest, RedeemVoucherRequest,
    RedeemVoucherResponse, UpdateVoucherRequest, ValidateVoucherRequest, ValidateVoucherResponse,
    VoucherCapabilities, VoucherResponse,
};
