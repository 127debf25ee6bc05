// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Redemption ledger counts.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::voucher_usages;
use crate::error::PersistenceError;

/// Counts how many times a user has redeemed a voucher.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `voucher_id` - The voucher identifier
/// * `user_id` - The user identifier
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_user_redemptions(
    conn: &mut SqliteConnection,
    voucher_id: i64,
    user_id: &str,
) -> Result<i64, PersistenceError> {
    Ok(voucher_usages::table
        .filter(voucher_usages::voucher_id.eq(voucher_id))
        .filter(voucher_usages::user_id.eq(user_id))
        .count()
        .get_result(conn)?)
}
