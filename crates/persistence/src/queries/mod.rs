// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! ## Module Organization
//!
//! - `vouchers` — Voucher lookups and listings
//! - `usage` — Redemption ledger counts
//! - `audit` — Audit log reads

pub mod audit;
pub mod usage;
pub mod vouchers;

pub use audit::list_audit_entries;
pub use usage::count_user_redemptions;
pub use vouchers::{find_voucher_by_code, get_voucher, list_vouchers};
