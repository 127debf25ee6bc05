// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, CreateVoucherParams, VoucherChanges};
use crate::error::CoreError;
use crate::state::{CreateResult, TransitionResult};
use serde_json::json;
use time::OffsetDateTime;
use voucher_audit::{Actor, AuditEntry, AuditSeverity};
use voucher_domain::{
    DiscountType, NewVoucher, Voucher, validate_discount_value, validate_free_item_config,
    validate_usage_limits, validate_validity_window, validate_voucher_code,
};

/// Applies a create command, producing the voucher to insert and its
/// audit entry.
///
/// Creation has no prior state, so it does not go through [`apply`].
/// The caller has already resolved the code and, for FreeItem vouchers,
/// the catalog product; this function validates every domain rule and
/// fills in defaults.
///
/// # Arguments
///
/// * `params` - The creation inputs
/// * `actor` - The actor performing this action
/// * `now` - The creation instant
///
/// # Returns
///
/// * `Ok(CreateResult)` containing the voucher to insert and audit entry
/// * `Err(CoreError)` if the inputs violate domain rules
///
/// # Errors
///
/// Returns an error if:
/// - The code is malformed
/// - The discount value is out of range for the type
/// - The validity window is inverted
/// - A usage limit is non-positive
/// - The free-item configuration is missing or unavailable
pub fn apply_create(
    params: CreateVoucherParams,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<CreateResult, CoreError> {
    let code: String = validate_voucher_code(&params.code)?;

    validate_discount_value(params.discount_type, params.discount_value)?;
    validate_validity_window(params.valid_from, params.valid_until)?;

    let usage_limit_per_user: i64 = params.usage_limit_per_user.unwrap_or(1);
    validate_usage_limits(params.usage_limit, usage_limit_per_user, 0)?;

    let free_item_quantity: i64 = params.free_item_quantity.unwrap_or(1);
    if params.discount_type == DiscountType::FreeItem {
        validate_free_item_config(
            params.free_item_product.as_ref(),
            params.free_item_product_id.as_deref(),
            free_item_quantity,
        )?;
    }

    let voucher: NewVoucher = NewVoucher {
        code: code.clone(),
        organization_id: params.organization_id.clone(),
        organization_name: params.organization_name,
        discount_type: params.discount_type,
        discount_value: params.discount_value,
        min_order_amount: params.min_order_amount,
        max_discount_amount: params.max_discount_amount,
        applicable_product_ids: params.applicable_product_ids,
        applicable_category_ids: params.applicable_category_ids,
        free_item_product_id: params.free_item_product_id,
        free_item_variant_id: params.free_item_variant_id,
        free_item_quantity,
        usage_limit: params.usage_limit,
        usage_limit_per_user,
        used_count: 0,
        valid_from: params.valid_from,
        valid_until: params.valid_until,
        is_active: params.is_active.unwrap_or(true),
        is_deleted: false,
        assigned_to_user_id: params.assigned_to_user_id,
        created_by: params.created_by,
        created_by_name: params.created_by_name,
        created_at: now,
        updated_at: now,
    };

    let audit_entry: AuditEntry = AuditEntry::new(
        String::from("CreateVoucher"),
        AuditSeverity::Medium,
        format!(
            "Created {} voucher '{}'",
            voucher.discount_type, voucher.code
        ),
        actor,
        params.organization_id,
        json!({
            "code": code,
            "discount_type": voucher.discount_type.as_str(),
        }),
    );

    Ok(CreateResult {
        voucher,
        audit_entry,
    })
}

/// Applies a command to an existing voucher, producing the new state and
/// audit entry.
///
/// The caller is responsible for loading a live (non-deleted) voucher;
/// missing or deleted vouchers are a not-found failure at the API
/// boundary, not here.
///
/// # Arguments
///
/// * `voucher` - The current voucher state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `now` - The transition instant
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit entry
/// * `Err(CoreError)` if the command violates domain rules
///
/// # Errors
///
/// Returns an error if the merged voucher state violates domain rules.
pub fn apply(
    voucher: &Voucher,
    command: Command,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::UpdateVoucher { changes } => apply_update(voucher, changes, actor, now),
        Command::DeleteVoucher => {
            let mut updated: Voucher = voucher.clone();
            updated.is_deleted = true;
            updated.is_active = false;
            updated.updated_at = now;

            let audit_entry: AuditEntry = AuditEntry::new(
                String::from("DeleteVoucher"),
                AuditSeverity::High,
                format!("Deleted voucher '{}'", updated.code),
                actor,
                updated.organization_id.clone(),
                json!({ "voucher_id": updated.voucher_id }),
            );

            Ok(TransitionResult {
                voucher: updated,
                audit_entry,
            })
        }
        Command::SetVoucherStatus { is_active } => {
            let mut updated: Voucher = voucher.clone();
            updated.is_active = is_active;
            updated.updated_at = now;

            let verb: &str = if is_active { "Activated" } else { "Deactivated" };
            let audit_entry: AuditEntry = AuditEntry::new(
                String::from("SetVoucherStatus"),
                AuditSeverity::Low,
                format!("{verb} voucher '{}'", updated.code),
                actor,
                updated.organization_id.clone(),
                json!({
                    "voucher_id": updated.voucher_id,
                    "is_active": is_active,
                }),
            );

            Ok(TransitionResult {
                voucher: updated,
                audit_entry,
            })
        }
        Command::CreateVoucher { .. } => {
            // Creation has no prior state and must use apply_create()
            unreachable!("apply called with create command")
        }
    }
}

/// Merges partial changes into a voucher and re-validates the result.
fn apply_update(
    voucher: &Voucher,
    changes: VoucherChanges,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let mut updated: Voucher = voucher.clone();
    let mut changed: Vec<&'static str> = Vec::new();

    if let Some(value) = changes.discount_value {
        // Re-validated against the existing, immutable type
        validate_discount_value(updated.discount_type, value)?;
        updated.discount_value = value;
        changed.push("discount_value");
    }
    if !changes.min_order_amount.is_keep() {
        updated.min_order_amount = changes.min_order_amount.resolve(updated.min_order_amount);
        changed.push("min_order_amount");
    }
    if !changes.max_discount_amount.is_keep() {
        updated.max_discount_amount = changes
            .max_discount_amount
            .resolve(updated.max_discount_amount);
        changed.push("max_discount_amount");
    }
    if let Some(ids) = changes.applicable_product_ids {
        updated.applicable_product_ids = ids;
        changed.push("applicable_product_ids");
    }
    if let Some(ids) = changes.applicable_category_ids {
        updated.applicable_category_ids = ids;
        changed.push("applicable_category_ids");
    }
    if !changes.free_item_variant_id.is_keep() {
        updated.free_item_variant_id = changes
            .free_item_variant_id
            .resolve(updated.free_item_variant_id);
        changed.push("free_item_variant_id");
    }
    if let Some(quantity) = changes.free_item_quantity {
        if quantity < 1 {
            return Err(CoreError::DomainViolation(
                voucher_domain::DomainError::InvalidFreeItemQuantity(quantity),
            ));
        }
        updated.free_item_quantity = quantity;
        changed.push("free_item_quantity");
    }
    if !changes.usage_limit.is_keep() {
        updated.usage_limit = changes.usage_limit.resolve(updated.usage_limit);
        changed.push("usage_limit");
    }
    if let Some(limit) = changes.usage_limit_per_user {
        updated.usage_limit_per_user = limit;
        changed.push("usage_limit_per_user");
    }
    if let Some(from) = changes.valid_from {
        updated.valid_from = from;
        changed.push("valid_from");
    }
    if !changes.valid_until.is_keep() {
        updated.valid_until = changes.valid_until.resolve(updated.valid_until);
        changed.push("valid_until");
    }
    if !changes.assigned_to_user_id.is_keep() {
        updated.assigned_to_user_id = changes
            .assigned_to_user_id
            .resolve(updated.assigned_to_user_id);
        changed.push("assigned_to_user_id");
    }

    // Re-validate the merged state: the effective window (every
    // combination of supplied/absent bounds) and the usage floor.
    validate_validity_window(updated.valid_from, updated.valid_until)?;
    validate_usage_limits(
        updated.usage_limit,
        updated.usage_limit_per_user,
        updated.used_count,
    )?;

    updated.updated_at = now;

    let audit_entry: AuditEntry = AuditEntry::new(
        String::from("UpdateVoucher"),
        AuditSeverity::Medium,
        format!(
            "Updated voucher '{}' (fields: {})",
            updated.code,
            changed.join(", ")
        ),
        actor,
        updated.organization_id.clone(),
        json!({
            "voucher_id": updated.voucher_id,
            "changed_fields": changed,
        }),
    );

    Ok(TransitionResult {
        voucher: updated,
        audit_entry,
    })
}
