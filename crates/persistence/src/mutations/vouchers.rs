// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Voucher inserts and full-row updates.

use diesel::prelude::*;
use diesel::SqliteConnection;
use voucher_domain::{NewVoucher, Voucher};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::VoucherColumns;
use crate::diesel_schema::vouchers;
use crate::error::PersistenceError;

/// Inserts a new voucher and returns its assigned identifier.
///
/// Code uniqueness is checked against live vouchers inside the same
/// transaction as the insert; the partial unique index backs this up at
/// the storage level.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `voucher` - The validated voucher to insert
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateCode`] if a live voucher
/// already uses this code, or a database error if the insert fails.
pub fn insert_voucher(
    conn: &mut SqliteConnection,
    voucher: &NewVoucher,
) -> Result<i64, PersistenceError> {
    let columns: VoucherColumns = VoucherColumns::from_new(voucher)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let live_with_code: i64 = vouchers::table
            .filter(vouchers::code.eq(&columns.code))
            .filter(vouchers::is_deleted.eq(0))
            .count()
            .get_result(conn)?;

        if live_with_code > 0 {
            return Err(PersistenceError::DuplicateCode(columns.code.clone()));
        }

        diesel::insert_into(vouchers::table)
            .values((
                vouchers::code.eq(&columns.code),
                vouchers::organization_id.eq(&columns.organization_id),
                vouchers::organization_name.eq(&columns.organization_name),
                vouchers::discount_type.eq(&columns.discount_type),
                vouchers::discount_value.eq(&columns.discount_value),
                vouchers::min_order_amount.eq(&columns.min_order_amount),
                vouchers::max_discount_amount.eq(&columns.max_discount_amount),
                vouchers::applicable_product_ids.eq(&columns.applicable_product_ids),
                vouchers::applicable_category_ids.eq(&columns.applicable_category_ids),
                vouchers::free_item_product_id.eq(&columns.free_item_product_id),
                vouchers::free_item_variant_id.eq(&columns.free_item_variant_id),
                vouchers::free_item_quantity.eq(columns.free_item_quantity),
                vouchers::usage_limit.eq(columns.usage_limit),
                vouchers::usage_limit_per_user.eq(columns.usage_limit_per_user),
                vouchers::used_count.eq(0_i64),
                vouchers::valid_from.eq(&columns.valid_from),
                vouchers::valid_until.eq(&columns.valid_until),
                vouchers::is_active.eq(columns.is_active),
                vouchers::is_deleted.eq(columns.is_deleted),
                vouchers::assigned_to_user_id.eq(&columns.assigned_to_user_id),
                vouchers::created_by.eq(&columns.created_by),
                vouchers::created_by_name.eq(&columns.created_by_name),
                vouchers::created_at.eq(&columns.created_at),
                vouchers::updated_at.eq(&columns.updated_at),
            ))
            .execute(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => PersistenceError::DuplicateCode(columns.code.clone()),
                other => other.into(),
            })?;

        get_last_insert_rowid(conn)
    })
}

/// Writes the full state of an existing voucher.
///
/// `used_count` is deliberately excluded from the column list; it is
/// advanced only by redemption recording. Deleted vouchers are never
/// matched, so a soft delete is terminal at the storage level too.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `voucher` - The new voucher state
///
/// # Errors
///
/// Returns [`PersistenceError::VoucherNotFound`] if no live voucher has
/// this identifier, or a database error if the update fails.
pub fn update_voucher(
    conn: &mut SqliteConnection,
    voucher: &Voucher,
) -> Result<(), PersistenceError> {
    let columns: VoucherColumns = VoucherColumns::from_existing(voucher)?;

    let rows: usize = diesel::update(
        vouchers::table
            .filter(vouchers::voucher_id.eq(voucher.voucher_id))
            .filter(vouchers::is_deleted.eq(0)),
    )
    .set((
        vouchers::code.eq(&columns.code),
        vouchers::organization_id.eq(&columns.organization_id),
        vouchers::organization_name.eq(&columns.organization_name),
        vouchers::discount_value.eq(&columns.discount_value),
        vouchers::min_order_amount.eq(&columns.min_order_amount),
        vouchers::max_discount_amount.eq(&columns.max_discount_amount),
        vouchers::applicable_product_ids.eq(&columns.applicable_product_ids),
        vouchers::applicable_category_ids.eq(&columns.applicable_category_ids),
        vouchers::free_item_product_id.eq(&columns.free_item_product_id),
        vouchers::free_item_variant_id.eq(&columns.free_item_variant_id),
        vouchers::free_item_quantity.eq(columns.free_item_quantity),
        vouchers::usage_limit.eq(columns.usage_limit),
        vouchers::usage_limit_per_user.eq(columns.usage_limit_per_user),
        vouchers::valid_from.eq(&columns.valid_from),
        vouchers::valid_until.eq(&columns.valid_until),
        vouchers::is_active.eq(columns.is_active),
        vouchers::is_deleted.eq(columns.is_deleted),
        vouchers::assigned_to_user_id.eq(&columns.assigned_to_user_id),
        vouchers::updated_at.eq(&columns.updated_at),
    ))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::VoucherNotFound(voucher.voucher_id));
    }

    Ok(())
}
