// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure lifecycle transitions for vouchers.
//!
//! State changes are expressed as [`Command`] values and applied by pure
//! functions. Every successful transition yields the new voucher state
//! plus exactly one audit entry; persistence happens elsewhere.

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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{apply, apply_create};
pub use command::{Command, CreateVoucherParams, FieldUpdate, VoucherChanges};
pub use error::CoreError;
pub use state::{CreateResult, TransitionResult};
