// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and column encoding helpers.
//!
//! Amounts are stored as decimal strings, timestamps as ISO 8601 text,
//! identifier lists as JSON arrays. Booleans are stored as integers.

use crate::error::PersistenceError;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use voucher_audit::{Actor, AuditCategory, AuditEntry, AuditSeverity};
use voucher_domain::{DiscountType, Voucher};

/// Encodes a timestamp as ISO 8601 text.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses an ISO 8601 timestamp column.
///
/// # Errors
///
/// Returns an error if the text is not a valid ISO 8601 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid timestamp: {e}")))
}

/// Parses a decimal amount column.
///
/// # Errors
///
/// Returns an error if the text is not a valid decimal.
pub fn parse_decimal(value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid decimal: {e}")))
}

/// Encodes an identifier list as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_id_list(values: &[String]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(values)?)
}

/// Parses a JSON array identifier list column.
///
/// # Errors
///
/// Returns an error if the text is not a valid JSON string array.
pub fn parse_id_list(value: &str) -> Result<Vec<String>, PersistenceError> {
    Ok(serde_json::from_str(value)?)
}

fn encode_optional_timestamp(
    value: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    value.map(encode_timestamp).transpose()
}

fn parse_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(parse_timestamp).transpose()
}

fn parse_optional_decimal(value: Option<&str>) -> Result<Option<Decimal>, PersistenceError> {
    value.map(parse_decimal).transpose()
}

/// A full voucher row in column order.
pub type VoucherRow = (
    i64,            // voucher_id
    String,         // code
    Option<String>, // organization_id
    Option<String>, // organization_name
    String,         // discount_type
    String,         // discount_value
    Option<String>, // min_order_amount
    Option<String>, // max_discount_amount
    String,         // applicable_product_ids
    String,         // applicable_category_ids
    Option<String>, // free_item_product_id
    Option<String>, // free_item_variant_id
    i64,            // free_item_quantity
    Option<i64>,    // usage_limit
    i64,            // usage_limit_per_user
    i64,            // used_count
    String,         // valid_from
    Option<String>, // valid_until
    i32,            // is_active
    i32,            // is_deleted
    Option<String>, // assigned_to_user_id
    String,         // created_by
    Option<String>, // created_by_name
    String,         // created_at
    String,         // updated_at
);

/// Decodes a voucher row into the domain representation.
///
/// # Errors
///
/// Returns an error if any encoded column fails to parse.
pub fn decode_voucher(row: VoucherRow) -> Result<Voucher, PersistenceError> {
    let (
        voucher_id,
        code,
        organization_id,
        organization_name,
        discount_type,
        discount_value,
        min_order_amount,
        max_discount_amount,
        applicable_product_ids,
        applicable_category_ids,
        free_item_product_id,
        free_item_variant_id,
        free_item_quantity,
        usage_limit,
        usage_limit_per_user,
        used_count,
        valid_from,
        valid_until,
        is_active,
        is_deleted,
        assigned_to_user_id,
        created_by,
        created_by_name,
        created_at,
        updated_at,
    ) = row;

    let discount_type: DiscountType = DiscountType::parse(&discount_type).ok_or_else(|| {
        PersistenceError::SerializationError(format!("Unknown discount type: {discount_type}"))
    })?;

    Ok(Voucher {
        voucher_id,
        code,
        organization_id,
        organization_name,
        discount_type,
        discount_value: parse_decimal(&discount_value)?,
        min_order_amount: parse_optional_decimal(min_order_amount.as_deref())?,
        max_discount_amount: parse_optional_decimal(max_discount_amount.as_deref())?,
        applicable_product_ids: parse_id_list(&applicable_product_ids)?,
        applicable_category_ids: parse_id_list(&applicable_category_ids)?,
        free_item_product_id,
        free_item_variant_id,
        free_item_quantity,
        usage_limit,
        usage_limit_per_user,
        used_count,
        valid_from: parse_timestamp(&valid_from)?,
        valid_until: parse_optional_timestamp(valid_until.as_deref())?,
        is_active: is_active != 0,
        is_deleted: is_deleted != 0,
        assigned_to_user_id,
        created_by,
        created_by_name,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// The encoded column values shared by voucher inserts and updates.
pub struct VoucherColumns {
    pub code: String,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub discount_type: String,
    pub discount_value: String,
    pub min_order_amount: Option<String>,
    pub max_discount_amount: Option<String>,
    pub applicable_product_ids: String,
    pub applicable_category_ids: String,
    pub free_item_product_id: Option<String>,
    pub free_item_variant_id: Option<String>,
    pub free_item_quantity: i64,
    pub usage_limit: Option<i64>,
    pub usage_limit_per_user: i64,
    pub valid_from: String,
    pub valid_until: Option<String>,
    pub is_active: i32,
    pub is_deleted: i32,
    pub assigned_to_user_id: Option<String>,
    pub created_by: String,
    pub created_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl VoucherColumns {
    /// Encodes a voucher pending insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if any column fails to encode.
    pub fn from_new(voucher: &voucher_domain::NewVoucher) -> Result<Self, PersistenceError> {
        Ok(Self {
            code: voucher.code.clone(),
            organization_id: voucher.organization_id.clone(),
            organization_name: voucher.organization_name.clone(),
            discount_type: voucher.discount_type.as_str().to_string(),
            discount_value: voucher.discount_value.to_string(),
            min_order_amount: voucher.min_order_amount.map(|v| v.to_string()),
            max_discount_amount: voucher.max_discount_amount.map(|v| v.to_string()),
            applicable_product_ids: encode_id_list(&voucher.applicable_product_ids)?,
            applicable_category_ids: encode_id_list(&voucher.applicable_category_ids)?,
            free_item_product_id: voucher.free_item_product_id.clone(),
            free_item_variant_id: voucher.free_item_variant_id.clone(),
            free_item_quantity: voucher.free_item_quantity,
            usage_limit: voucher.usage_limit,
            usage_limit_per_user: voucher.usage_limit_per_user,
            valid_from: encode_timestamp(voucher.valid_from)?,
            valid_until: encode_optional_timestamp(voucher.valid_until)?,
            is_active: i32::from(voucher.is_active),
            is_deleted: i32::from(voucher.is_deleted),
            assigned_to_user_id: voucher.assigned_to_user_id.clone(),
            created_by: voucher.created_by.clone(),
            created_by_name: voucher.created_by_name.clone(),
            created_at: encode_timestamp(voucher.created_at)?,
            updated_at: encode_timestamp(voucher.updated_at)?,
        })
    }

    /// Encodes an existing voucher for a full-row update.
    ///
    /// # Errors
    ///
    /// Returns an error if any column fails to encode.
    pub fn from_existing(voucher: &Voucher) -> Result<Self, PersistenceError> {
        Ok(Self {
            code: voucher.code.clone(),
            organization_id: voucher.organization_id.clone(),
            organization_name: voucher.organization_name.clone(),
            discount_type: voucher.discount_type.as_str().to_string(),
            discount_value: voucher.discount_value.to_string(),
            min_order_amount: voucher.min_order_amount.map(|v| v.to_string()),
            max_discount_amount: voucher.max_discount_amount.map(|v| v.to_string()),
            applicable_product_ids: encode_id_list(&voucher.applicable_product_ids)?,
            applicable_category_ids: encode_id_list(&voucher.applicable_category_ids)?,
            free_item_product_id: voucher.free_item_product_id.clone(),
            free_item_variant_id: voucher.free_item_variant_id.clone(),
            free_item_quantity: voucher.free_item_quantity,
            usage_limit: voucher.usage_limit,
            usage_limit_per_user: voucher.usage_limit_per_user,
            valid_from: encode_timestamp(voucher.valid_from)?,
            valid_until: encode_optional_timestamp(voucher.valid_until)?,
            is_active: i32::from(voucher.is_active),
            is_deleted: i32::from(voucher.is_deleted),
            assigned_to_user_id: voucher.assigned_to_user_id.clone(),
            created_by: voucher.created_by.clone(),
            created_by_name: voucher.created_by_name.clone(),
            created_at: encode_timestamp(voucher.created_at)?,
            updated_at: encode_timestamp(voucher.updated_at)?,
        })
    }
}

/// An audit log row in column order.
pub type AuditLogRow = (
    i64,            // entry_id
    String,         // action
    String,         // category
    String,         // severity
    String,         // message
    String,         // actor_id
    String,         // actor_type
    Option<String>, // organization_id
    String,         // metadata_json
    String,         // created_at
);

/// An audit entry read back from the log, with its storage identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAuditEntry {
    /// Database-assigned identifier.
    pub entry_id: i64,
    /// The reconstructed audit entry.
    pub entry: AuditEntry,
    /// When the entry was written.
    pub created_at: OffsetDateTime,
}

/// Decodes an audit log row.
///
/// # Errors
///
/// Returns an error if any encoded column fails to parse.
pub fn decode_audit_entry(row: AuditLogRow) -> Result<StoredAuditEntry, PersistenceError> {
    let (
        entry_id,
        action,
        category,
        severity,
        message,
        actor_id,
        actor_type,
        organization_id,
        metadata_json,
        created_at,
    ) = row;

    let category: AuditCategory = AuditCategory::parse(&category).ok_or_else(|| {
        PersistenceError::SerializationError(format!("Unknown audit category: {category}"))
    })?;
    let severity: AuditSeverity = AuditSeverity::parse(&severity).ok_or_else(|| {
        PersistenceError::SerializationError(format!("Unknown audit severity: {severity}"))
    })?;

    let mut entry: AuditEntry = AuditEntry::new(
        action,
        severity,
        message,
        Actor::new(actor_id, actor_type),
        organization_id,
        serde_json::from_str(&metadata_json)?,
    );
    entry.category = category;

    Ok(StoredAuditEntry {
        entry_id,
        entry,
        created_at: parse_timestamp(&created_at)?,
    })
}
