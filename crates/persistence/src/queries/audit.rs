// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log reads.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{AuditLogRow, StoredAuditEntry, decode_audit_entry};
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Lists audit entries, newest first, optionally scoped to one
/// organization.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `organization_id` - Restricts results to one organization when set
/// * `limit` - Maximum number of entries to return
///
/// # Errors
///
/// Returns an error if the query or row decoding fails.
pub fn list_audit_entries(
    conn: &mut SqliteConnection,
    organization_id: Option<&str>,
    limit: i64,
) -> Result<Vec<StoredAuditEntry>, PersistenceError> {
    let mut query = audit_log::table.into_boxed();

    if let Some(org) = organization_id {
        query = query.filter(audit_log::organization_id.eq(org.to_string()));
    }

    let rows: Vec<AuditLogRow> = query
        .order(audit_log::entry_id.desc())
        .limit(limit)
        .load::<AuditLogRow>(conn)?;

    rows.into_iter().map(decode_audit_entry).collect()
}
