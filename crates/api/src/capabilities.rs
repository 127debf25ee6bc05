// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, VoucherCapabilities};
use voucher_domain::Voucher;

/// Computes the capabilities of an actor against one voucher.
///
/// Deleted vouchers accept no further actions from anyone. For live
/// vouchers, all lifecycle actions share a single permission: managing
/// the voucher's organization scope.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `voucher` - The voucher being evaluated
#[must_use]
pub fn compute_voucher_capabilities(
    actor: &AuthenticatedActor,
    voucher: &Voucher,
) -> VoucherCapabilities {
    if voucher.is_deleted {
        return VoucherCapabilities {
            can_update: Capability::Denied,
            can_delete: Capability::Denied,
            can_toggle_status: Capability::Denied,
        };
    }

    let can_manage: bool = actor.can_manage_organization(voucher.organization_id.as_deref());
    let capability: Capability = Capability::from_bool(can_manage);

    VoucherCapabilities {
        can_update: capability,
        can_delete: capability,
        can_toggle_status: capability,
    }
}
