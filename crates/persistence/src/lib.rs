// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the voucher engine.
//!
//! This crate stores vouchers, the redemption ledger, and the audit log
//! in `SQLite` via Diesel. In-memory databases back unit and
//! integration tests; file-based databases (with WAL enabled) back
//! deployments.
//!
//! ## Invariants enforced here
//!
//! - Voucher codes are unique among live vouchers; a soft-deleted
//!   voucher's code may be reused.
//! - Soft-deleted vouchers are invisible to every read and unmatchable
//!   by every write. Deletion is terminal.
//! - `used_count` is advanced only by [`Persistence::record_redemption`],
//!   atomically with the ledger insert. Lifecycle updates cannot touch it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use voucher_audit::AuditEntry;
use voucher_domain::{NewVoucher, Voucher};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::StoredAuditEntry;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for vouchers, redemptions, and the audit log.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL gives better read concurrency for file-based databases
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Lifecycle persistence
    // ========================================================================

    /// Inserts a new voucher and returns it with its assigned identifier.
    ///
    /// # Arguments
    ///
    /// * `voucher` - The validated voucher to insert
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::DuplicateCode`] if a live voucher
    /// already uses this code, or a database error otherwise.
    pub fn insert_voucher(&mut self, voucher: &NewVoucher) -> Result<Voucher, PersistenceError> {
        let voucher_id: i64 = mutations::insert_voucher(&mut self.conn, voucher)?;
        Ok(voucher.clone().with_id(voucher_id))
    }

    /// Writes the full state of an existing voucher.
    ///
    /// # Arguments
    ///
    /// * `voucher` - The new voucher state
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::VoucherNotFound`] if no live voucher
    /// has this identifier, or a database error otherwise.
    pub fn update_voucher(&mut self, voucher: &Voucher) -> Result<(), PersistenceError> {
        mutations::update_voucher(&mut self.conn, voucher)
    }

    // ========================================================================
    // Voucher queries
    // ========================================================================

    /// Retrieves a live voucher by identifier.
    ///
    /// # Arguments
    ///
    /// * `voucher_id` - The voucher identifier
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::VoucherNotFound`] if no live voucher
    /// has this identifier.
    pub fn get_voucher(&mut self, voucher_id: i64) -> Result<Voucher, PersistenceError> {
        queries::get_voucher(&mut self.conn, voucher_id)
    }

    /// Retrieves a live voucher by its normalized code.
    ///
    /// # Arguments
    ///
    /// * `code` - The normalized voucher code
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_voucher_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<Voucher>, PersistenceError> {
        queries::find_voucher_by_code(&mut self.conn, code)
    }

    /// Lists live vouchers, optionally scoped to one organization.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - Restricts results to one organization when set
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vouchers(
        &mut self,
        organization_id: Option<&str>,
    ) -> Result<Vec<Voucher>, PersistenceError> {
        queries::list_vouchers(&mut self.conn, organization_id)
    }

    // ========================================================================
    // Redemptions
    // ========================================================================

    /// Counts how many times a user has redeemed a voucher.
    ///
    /// # Arguments
    ///
    /// * `voucher_id` - The voucher identifier
    /// * `user_id` - The user identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_user_redemptions(
        &mut self,
        voucher_id: i64,
        user_id: &str,
    ) -> Result<i64, PersistenceError> {
        queries::count_user_redemptions(&mut self.conn, voucher_id, user_id)
    }

    /// Records a redemption: advances `used_count` and appends a ledger
    /// row, atomically.
    ///
    /// # Arguments
    ///
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
    /// Returns [`PersistenceError::UsageLimitExhausted`] if the overall
    /// limit is already spent, [`PersistenceError::VoucherNotFound`] if
    /// no live voucher has this identifier, or a database error
    /// otherwise.
    pub fn record_redemption(
        &mut self,
        voucher_id: i64,
        user_id: &str,
        order_id: Option<&str>,
        discount_amount: Decimal,
        redeemed_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::record_redemption(
            &mut self.conn,
            voucher_id,
            user_id,
            order_id,
            discount_amount,
            redeemed_at,
        )
    }

    // ========================================================================
    // Audit log
    // ========================================================================

    /// Appends an audit entry to the log.
    ///
    /// # Arguments
    ///
    /// * `entry` - The audit entry to append
    /// * `recorded_at` - The write instant
    ///
    /// # Returns
    ///
    /// The identifier of the appended entry.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn append_audit_entry(
        &mut self,
        entry: &AuditEntry,
        recorded_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::append_audit_entry(&mut self.conn, entry, recorded_at)
    }

    /// Lists audit entries, newest first, optionally scoped to one
    /// organization.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - Restricts results to one organization when set
    /// * `limit` - Maximum number of entries to return
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_entries(
        &mut self,
        organization_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<StoredAuditEntry>, PersistenceError> {
        queries::list_audit_entries(&mut self.conn, organization_id, limit)
    }
}
