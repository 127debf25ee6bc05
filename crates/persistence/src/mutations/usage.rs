// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic redemption recording.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::encode_timestamp;
use crate::diesel_schema::{voucher_usages, vouchers};
use crate::error::PersistenceError;

/// Records a redemption against a voucher.
///
/// The counter advance is a single conditional UPDATE: it matches only
/// a live voucher whose overall limit is not yet exhausted, so two
/// concurrent redemptions of the last remaining use cannot both
/// succeed. The ledger row is written in the same transaction and
/// rolls back if anything fails.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `voucher_id` - The voucher being redeemed
/// * `user_id` - The redeeming user
/// * `order_id` - The order the redemption applies to, when known
/// * `discount_amount` - The discount granted
/// * `redeemed_at` - The redemption instant
///
/// # Returns
///
/// The identifier of the new ledger row.
///
/// # Errors
///
/// Returns [`PersistenceError::VoucherNotFound`] if no live voucher has
/// this identifier, [`PersistenceError::UsageLimitExhausted`] if the
/// overall limit is already spent, or a database error otherwise.
pub fn record_redemption(
    conn: &mut SqliteConnection,
    voucher_id: i64,
    user_id: &str,
    order_id: Option<&str>,
    discount_amount: Decimal,
    redeemed_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let redeemed_at: String = encode_timestamp(redeemed_at)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let advanced: usize = diesel::update(
            vouchers::table
                .filter(vouchers::voucher_id.eq(voucher_id))
                .filter(vouchers::is_deleted.eq(0))
                .filter(
                    vouchers::usage_limit
                        .is_null()
                        .or(vouchers::used_count.nullable().lt(vouchers::usage_limit)),
                ),
        )
        .set(vouchers::used_count.eq(vouchers::used_count + 1_i64))
        .execute(conn)?;

        if advanced == 0 {
            let exists: i64 = vouchers::table
                .filter(vouchers::voucher_id.eq(voucher_id))
                .filter(vouchers::is_deleted.eq(0))
                .count()
                .get_result(conn)?;

            if exists == 0 {
                return Err(PersistenceError::VoucherNotFound(voucher_id));
            }
            return Err(PersistenceError::UsageLimitExhausted { voucher_id });
        }

        diesel::insert_into(voucher_usages::table)
            .values((
                voucher_usages::voucher_id.eq(voucher_id),
                voucher_usages::user_id.eq(user_id),
                voucher_usages::order_id.eq(order_id),
                voucher_usages::discount_amount.eq(discount_amount.to_string()),
                voucher_usages::redeemed_at.eq(&redeemed_at),
            ))
            .execute(conn)?;

        get_last_insert_rowid(conn)
    })
}
