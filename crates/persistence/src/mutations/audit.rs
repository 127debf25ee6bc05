// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log appends.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use voucher_audit::AuditEntry;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::encode_timestamp;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Appends an audit entry to the log and returns its identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The audit entry to append
/// * `recorded_at` - The write instant
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn append_audit_entry(
    conn: &mut SqliteConnection,
    entry: &AuditEntry,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let metadata_json: String = serde_json::to_string(&entry.metadata)?;
    let recorded_at: String = encode_timestamp(recorded_at)?;

    diesel::insert_into(audit_log::table)
        .values((
            audit_log::action.eq(&entry.action),
            audit_log::category.eq(entry.category.as_str()),
            audit_log::severity.eq(entry.severity.as_str()),
            audit_log::message.eq(&entry.message),
            audit_log::actor_id.eq(&entry.actor.id),
            audit_log::actor_type.eq(&entry.actor.actor_type),
            audit_log::organization_id.eq(&entry.organization_id),
            audit_log::metadata_json.eq(&metadata_json),
            audit_log::created_at.eq(&recorded_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
