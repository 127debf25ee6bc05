// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use voucher_audit::AuditEntry;
use voucher_domain::{NewVoucher, Voucher};

/// The result of applying a create command.
///
/// The voucher has no identifier yet; the persistence layer assigns one
/// on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    /// The validated voucher to insert.
    pub voucher: NewVoucher,
    /// The audit entry describing the creation.
    pub audit_entry: AuditEntry,
}

/// The result of applying a command to an existing voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new voucher state.
    pub voucher: Voucher,
    /// The audit entry describing the transition.
    pub audit_entry: AuditEntry,
}
