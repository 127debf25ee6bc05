// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for voucher lifecycle, validation, and
//! redemption.
//!
//! Handlers enforce authorization before executing commands, translate
//! requests into core commands, and translate every error into the API
//! contract. Audit entries are appended fire-and-forget: a failed
//! append is logged and never fails the primary operation.

use time::OffsetDateTime;
use tracing::warn;
use voucher_domain::{
    CatalogProduct, DiscountType, DomainError, OrderContext, RejectionCode, Voucher,
    evaluate_voucher, validate_voucher_code,
};
use voucher_engine::{
    Command, CreateResult, CreateVoucherParams, FieldUpdate, TransitionResult, VoucherChanges,
    apply, apply_create,
};
use voucher_persistence::{Persistence, StoredAuditEntry};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::catalog::ProductCatalog;
use crate::code::generate_voucher_code;
use crate::error::{
    ApiError, translate_catalog_error, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::request_response::{
    AuditEntryResponse, CreateVoucherRequest, RedeemVoucherRequest, RedeemVoucherResponse,
    UpdateVoucherRequest, ValidateVoucherRequest, ValidateVoucherResponse, VoucherResponse,
};
use voucher_audit::AuditEntry;

/// Message used whenever the voucher cannot be revealed to exist.
const NOT_FOUND_MESSAGE: &str = "This voucher does not exist";

/// Loads a live voucher or reports it as not found.
fn load_voucher(persistence: &mut Persistence, voucher_id: i64) -> Result<Voucher, ApiError> {
    persistence
        .get_voucher(voucher_id)
        .map_err(translate_persistence_error)
}

/// Resolves the catalog product for a free-item voucher configuration.
fn resolve_free_item_product(
    catalog: &dyn ProductCatalog,
    discount_type: DiscountType,
    product_id: Option<&str>,
) -> Result<Option<CatalogProduct>, ApiError> {
    if discount_type != DiscountType::FreeItem {
        return Ok(None);
    }
    match product_id {
        Some(id) => catalog.product(id).map_err(translate_catalog_error),
        None => Ok(None),
    }
}

/// Appends an audit entry without failing the primary operation.
fn append_audit(persistence: &mut Persistence, entry: &AuditEntry, now: OffsetDateTime) {
    if let Err(e) = persistence.append_audit_entry(entry, now) {
        warn!(action = %entry.action, error = %e, "Failed to append audit entry");
    }
}

/// Creates a voucher.
///
/// When the request carries no code, one is generated from the request
/// prefix. Generated codes are not retried on collision; the duplicate
/// surfaces like any caller-supplied code.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `catalog` - The product catalog, used to validate free-item products
/// * `actor` - The authenticated actor performing this action
/// * `request` - The creation request
/// * `now` - The creation instant
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not manage the requested organization scope
/// - Any field validation fails
/// - A live voucher already uses this code
pub fn create_voucher(
    persistence: &mut Persistence,
    catalog: &dyn ProductCatalog,
    actor: &AuthenticatedActor,
    request: CreateVoucherRequest,
    now: OffsetDateTime,
) -> Result<VoucherResponse, ApiError> {
    AuthorizationService::authorize_manage_vouchers(
        actor,
        request.organization_id.as_deref(),
        "create_voucher",
    )?;

    let code: String = match request.code {
        Some(code) => code,
        None => generate_voucher_code(request.code_prefix.as_deref()),
    };

    let free_item_product: Option<CatalogProduct> = resolve_free_item_product(
        catalog,
        request.discount_type,
        request.free_item_product_id.as_deref(),
    )?;

    let params: CreateVoucherParams = CreateVoucherParams {
        code,
        organization_id: request.organization_id,
        organization_name: request.organization_name,
        discount_type: request.discount_type,
        discount_value: request.discount_value,
        min_order_amount: request.min_order_amount,
        max_discount_amount: request.max_discount_amount,
        applicable_product_ids: request.applicable_product_ids,
        applicable_category_ids: request.applicable_category_ids,
        free_item_product_id: request.free_item_product_id,
        free_item_variant_id: request.free_item_variant_id,
        free_item_quantity: request.free_item_quantity,
        free_item_product,
        usage_limit: request.usage_limit,
        usage_limit_per_user: request.usage_limit_per_user,
        valid_from: request.valid_from,
        valid_until: request.valid_until,
        is_active: request.is_active,
        assigned_to_user_id: request.assigned_to_user_id,
        created_by: actor.id.clone(),
        created_by_name: actor.display_name.clone(),
    };

    let result: CreateResult =
        apply_create(params, actor.to_audit_actor(), now).map_err(translate_core_error)?;

    let stored: Voucher = persistence
        .insert_voucher(&result.voucher)
        .map_err(translate_persistence_error)?;

    append_audit(persistence, &result.audit_entry, now);

    Ok(VoucherResponse::from_voucher(stored))
}

/// Builds the partial-change set from an update request.
fn changes_from_request(request: UpdateVoucherRequest) -> VoucherChanges {
    fn field<T>(clear: bool, value: Option<T>) -> FieldUpdate<T> {
        if clear {
            FieldUpdate::Clear
        } else {
            value.map_or(FieldUpdate::Keep, FieldUpdate::Set)
        }
    }

    VoucherChanges {
        discount_value: request.discount_value,
        min_order_amount: field(request.clear_min_order_amount, request.min_order_amount),
        max_discount_amount: field(request.clear_max_discount_amount, request.max_discount_amount),
        applicable_product_ids: request.applicable_product_ids,
        applicable_category_ids: request.applicable_category_ids,
        free_item_variant_id: field(
            request.clear_free_item_variant_id,
            request.free_item_variant_id,
        ),
        free_item_quantity: request.free_item_quantity,
        usage_limit: field(request.clear_usage_limit, request.usage_limit),
        usage_limit_per_user: request.usage_limit_per_user,
        valid_from: request.valid_from,
        valid_until: field(request.clear_valid_until, request.valid_until),
        assigned_to_user_id: field(
            request.clear_assigned_to_user_id,
            request.assigned_to_user_id,
        ),
    }
}

/// Partially updates a voucher.
///
/// A request that names `discount_type` is rejected outright; the type
/// of a voucher is immutable.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor performing this action
/// * `voucher_id` - The voucher to update
/// * `request` - The fields to change
/// * `now` - The update instant
///
/// # Errors
///
/// Returns an error if:
/// - The voucher does not exist or is deleted
/// - The actor may not manage this voucher's organization scope
/// - The merged state violates a domain rule
pub fn update_voucher(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    voucher_id: i64,
    request: UpdateVoucherRequest,
    now: OffsetDateTime,
) -> Result<VoucherResponse, ApiError> {
    if request.discount_type.is_some() {
        return Err(translate_domain_error(DomainError::ImmutableDiscountType));
    }

    let voucher: Voucher = load_voucher(persistence, voucher_id)?;
    AuthorizationService::authorize_manage_vouchers(
        actor,
        voucher.organization_id.as_deref(),
        "update_voucher",
    )?;

    let changes: VoucherChanges = changes_from_request(request);
    let result: TransitionResult = apply(
        &voucher,
        Command::UpdateVoucher { changes },
        actor.to_audit_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    persistence
        .update_voucher(&result.voucher)
        .map_err(translate_persistence_error)?;

    append_audit(persistence, &result.audit_entry, now);

    Ok(VoucherResponse::from_voucher(result.voucher))
}

/// Soft-deletes a voucher.
///
/// Deletion is terminal: the voucher disappears from every read and
/// its code is freed for reuse.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor performing this action
/// * `voucher_id` - The voucher to delete
/// * `now` - The deletion instant
///
/// # Errors
///
/// Returns an error if the voucher does not exist or the actor may not
/// manage its organization scope.
pub fn delete_voucher(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    voucher_id: i64,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let voucher: Voucher = load_voucher(persistence, voucher_id)?;
    AuthorizationService::authorize_manage_vouchers(
        actor,
        voucher.organization_id.as_deref(),
        "delete_voucher",
    )?;

    let result: TransitionResult = apply(
        &voucher,
        Command::DeleteVoucher,
        actor.to_audit_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    persistence
        .update_voucher(&result.voucher)
        .map_err(translate_persistence_error)?;

    append_audit(persistence, &result.audit_entry, now);

    Ok(())
}

/// Activates or deactivates a voucher.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor performing this action
/// * `voucher_id` - The voucher to toggle
/// * `is_active` - The new activation state
/// * `now` - The toggle instant
///
/// # Errors
///
/// Returns an error if the voucher does not exist or the actor may not
/// manage its organization scope.
pub fn set_voucher_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    voucher_id: i64,
    is_active: bool,
    now: OffsetDateTime,
) -> Result<VoucherResponse, ApiError> {
    let voucher: Voucher = load_voucher(persistence, voucher_id)?;
    AuthorizationService::authorize_manage_vouchers(
        actor,
        voucher.organization_id.as_deref(),
        "set_voucher_status",
    )?;

    let result: TransitionResult = apply(
        &voucher,
        Command::SetVoucherStatus { is_active },
        actor.to_audit_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    persistence
        .update_voucher(&result.voucher)
        .map_err(translate_persistence_error)?;

    append_audit(persistence, &result.audit_entry, now);

    Ok(VoucherResponse::from_voucher(result.voucher))
}

/// Retrieves a voucher for back-office display.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `voucher_id` - The voucher to retrieve
///
/// # Errors
///
/// Returns an error if the voucher does not exist or the actor may not
/// manage its organization scope.
pub fn get_voucher(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    voucher_id: i64,
) -> Result<VoucherResponse, ApiError> {
    let voucher: Voucher = load_voucher(persistence, voucher_id)?;
    AuthorizationService::authorize_manage_vouchers(
        actor,
        voucher.organization_id.as_deref(),
        "get_voucher",
    )?;

    Ok(VoucherResponse::from_voucher(voucher))
}

/// Lists vouchers in an organization scope.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `organization_id` - The scope to list; `None` lists all vouchers
///   and requires the administrator role
///
/// # Errors
///
/// Returns an error if the actor may not manage this scope.
pub fn list_vouchers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    organization_id: Option<&str>,
) -> Result<Vec<VoucherResponse>, ApiError> {
    AuthorizationService::authorize_manage_vouchers(actor, organization_id, "list_vouchers")?;

    let vouchers: Vec<Voucher> = persistence
        .list_vouchers(organization_id)
        .map_err(translate_persistence_error)?;

    Ok(vouchers
        .into_iter()
        .map(VoucherResponse::from_voucher)
        .collect())
}

/// Validates a voucher against an order at the current instant.
///
/// This is the public storefront endpoint; it requires no
/// authentication and never distinguishes malformed, unknown, and
/// deleted codes.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `catalog` - The product catalog
/// * `request` - The validation request
///
/// # Errors
///
/// Returns an error only on infrastructure failure; every business
/// outcome is expressed in the response.
pub fn validate_voucher(
    persistence: &mut Persistence,
    catalog: &dyn ProductCatalog,
    request: ValidateVoucherRequest,
) -> Result<ValidateVoucherResponse, ApiError> {
    validate_voucher_at(persistence, catalog, request, OffsetDateTime::now_utc())
}

/// Validates a voucher against an order at a given instant.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `catalog` - The product catalog
/// * `request` - The validation request
/// * `now` - The validation instant
///
/// # Errors
///
/// Returns an error only on infrastructure failure; every business
/// outcome is expressed in the response.
pub fn validate_voucher_at(
    persistence: &mut Persistence,
    catalog: &dyn ProductCatalog,
    request: ValidateVoucherRequest,
    now: OffsetDateTime,
) -> Result<ValidateVoucherResponse, ApiError> {
    let Ok(code) = validate_voucher_code(&request.code) else {
        // Malformed codes cannot exist; do not reveal the format rules
        return Ok(ValidateVoucherResponse::rejected(
            RejectionCode::NotFound,
            NOT_FOUND_MESSAGE.to_string(),
        ));
    };

    let Some(voucher) = persistence
        .find_voucher_by_code(&code)
        .map_err(translate_persistence_error)?
    else {
        return Ok(ValidateVoucherResponse::rejected(
            RejectionCode::NotFound,
            NOT_FOUND_MESSAGE.to_string(),
        ));
    };

    let user_redemption_count: i64 = match request.user_id.as_deref() {
        Some(user_id) => persistence
            .count_user_redemptions(voucher.voucher_id, user_id)
            .map_err(translate_persistence_error)?,
        None => 0,
    };

    let free_item_product: Option<CatalogProduct> = resolve_free_item_product(
        catalog,
        voucher.discount_type,
        voucher.free_item_product_id.as_deref(),
    )?;

    let order: OrderContext = OrderContext {
        user_id: request.user_id,
        organization_id: request.organization_id,
        order_amount: request.order_amount,
        product_ids: request.product_ids,
        category_ids: request.category_ids,
        items: request
            .items
            .into_iter()
            .map(crate::request_response::CartItemInput::into_domain)
            .collect(),
    };

    let outcome = evaluate_voucher(
        &voucher,
        &order,
        user_redemption_count,
        free_item_product.as_ref(),
        now,
    );

    Ok(ValidateVoucherResponse::from_outcome(outcome))
}

/// Records a redemption after checkout completes.
///
/// The voucher is re-validated against the final order first, then the
/// usage counter and ledger advance atomically; a concurrent redemption
/// of the last remaining use loses cleanly.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `catalog` - The product catalog
/// * `request` - The redemption request
/// * `now` - The redemption instant
///
/// # Errors
///
/// Returns an error if:
/// - No user is identified (anonymous orders cannot redeem)
/// - The voucher fails validation against the final order
/// - The usage limit was exhausted concurrently
pub fn redeem_voucher(
    persistence: &mut Persistence,
    catalog: &dyn ProductCatalog,
    request: RedeemVoucherRequest,
    now: OffsetDateTime,
) -> Result<RedeemVoucherResponse, ApiError> {
    let Some(user_id) = request.user_id.clone() else {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("A redemption must be attributed to a user"),
        });
    };

    let validation: ValidateVoucherRequest = ValidateVoucherRequest {
        code: request.code.clone(),
        user_id: request.user_id,
        organization_id: request.organization_id,
        order_amount: request.order_amount,
        product_ids: request.product_ids,
        category_ids: request.category_ids,
        items: request.items,
    };
    let outcome: ValidateVoucherResponse =
        validate_voucher_at(persistence, catalog, validation, now)?;

    let (Some(summary), Some(discount_amount)) = (outcome.voucher, outcome.discount_amount) else {
        return Err(ApiError::DomainRuleViolation {
            rule: outcome
                .rejection_code
                .map_or_else(|| String::from("voucher_validation"), |c| c.to_string()),
            message: outcome
                .message
                .unwrap_or_else(|| String::from("Voucher validation failed")),
        });
    };

    let usage_id: i64 = persistence
        .record_redemption(
            summary.voucher_id,
            &user_id,
            request.order_id.as_deref(),
            discount_amount,
            now,
        )
        .map_err(translate_persistence_error)?;

    Ok(RedeemVoucherResponse {
        usage_id,
        voucher_id: summary.voucher_id,
        discount_amount,
    })
}

/// Lists audit entries in an organization scope.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `organization_id` - The scope to list; `None` lists the
///   platform-wide log and requires the administrator role
/// * `limit` - Maximum number of entries to return
///
/// # Errors
///
/// Returns an error if the actor may not read this scope.
pub fn list_audit_entries(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    organization_id: Option<&str>,
    limit: i64,
) -> Result<Vec<AuditEntryResponse>, ApiError> {
    AuthorizationService::authorize_view_audit_log(actor, organization_id)?;

    let entries: Vec<StoredAuditEntry> = persistence
        .list_audit_entries(organization_id, limit)
        .map_err(translate_persistence_error)?;

    Ok(entries
        .into_iter()
        .map(|stored| AuditEntryResponse {
            entry_id: stored.entry_id,
            action: stored.entry.action,
            severity: stored.entry.severity.as_str().to_string(),
            message: stored.entry.message,
            actor_id: stored.entry.actor.id,
            actor_type: stored.entry.actor.actor_type,
            organization_id: stored.entry.organization_id,
            metadata: stored.entry.metadata,
            created_at: stored.created_at,
        })
        .collect())
}
