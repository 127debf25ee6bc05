// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! All state-changing operations for the persistence layer. Mutations
//! use Diesel DSL with minimal use of backend-specific helpers
//! (e.g., `last_insert_rowid()` for `SQLite`).
//!
//! ## Module Organization
//!
//! - `vouchers` — Voucher inserts and full-row updates
//! - `usage` — Atomic redemption recording
//! - `audit` — Audit log appends

pub mod audit;
pub mod usage;
pub mod vouchers;

pub use audit::append_audit_entry;
pub use usage::record_redemption;
pub use vouchers::{insert_voucher, update_voucher};
