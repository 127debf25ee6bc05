// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Voucher lookups and listings.
//!
//! Soft-deleted vouchers are invisible to every query here; a deleted
//! voucher behaves exactly like one that never existed.

use diesel::SqliteConnection;
use diesel::prelude::*;
use voucher_domain::Voucher;

use crate::data_models::{VoucherRow, decode_voucher};
use crate::diesel_schema::vouchers;
use crate::error::PersistenceError;

/// Retrieves a live voucher by identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `voucher_id` - The voucher identifier
///
/// # Errors
///
/// Returns [`PersistenceError::VoucherNotFound`] if no live voucher has
/// this identifier.
pub fn get_voucher(
    conn: &mut SqliteConnection,
    voucher_id: i64,
) -> Result<Voucher, PersistenceError> {
    let row: Option<VoucherRow> = vouchers::table
        .filter(vouchers::voucher_id.eq(voucher_id))
        .filter(vouchers::is_deleted.eq(0))
        .first::<VoucherRow>(conn)
        .optional()?;

    row.map_or(
        Err(PersistenceError::VoucherNotFound(voucher_id)),
        decode_voucher,
    )
}

/// Retrieves a live voucher by its normalized code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The normalized voucher code
///
/// # Errors
///
/// Returns an error if the query or row decoding fails.
pub fn find_voucher_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<Voucher>, PersistenceError> {
    let row: Option<VoucherRow> = vouchers::table
        .filter(vouchers::code.eq(code))
        .filter(vouchers::is_deleted.eq(0))
        .first::<VoucherRow>(conn)
        .optional()?;

    row.map(decode_voucher).transpose()
}

/// Lists live vouchers, optionally scoped to one organization.
///
/// Results are ordered newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `organization_id` - Restricts results to one organization when set
///
/// # Errors
///
/// Returns an error if the query or row decoding fails.
pub fn list_vouchers(
    conn: &mut SqliteConnection,
    organization_id: Option<&str>,
) -> Result<Vec<Voucher>, PersistenceError> {
    let mut query = vouchers::table
        .filter(vouchers::is_deleted.eq(0))
        .into_boxed();

    if let Some(org) = organization_id {
        query = query.filter(vouchers::organization_id.eq(org.to_string()));
    }

    let rows: Vec<VoucherRow> = query
        .order(vouchers::created_at.desc())
        .load::<VoucherRow>(conn)?;

    rows.into_iter().map(decode_voucher).collect()
}
