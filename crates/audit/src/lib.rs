// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde_json::Value;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// a platform administrator, an organization manager, or an automated
/// process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "manager", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The broad category an audit entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCategory {
    /// A change to persisted data.
    DataChange,
}

impl AuditCategory {
    /// The canonical storage representation of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataChange => "DATA_CHANGE",
        }
    }

    /// Parses the canonical storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DATA_CHANGE" => Some(Self::DataChange),
            _ => None,
        }
    }
}

/// How consequential an audited action is.
///
/// Severity is advisory; it drives alerting and review priority, not
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuditSeverity {
    /// Routine changes (e.g., toggling activation).
    Low,
    /// Substantive changes to voucher configuration.
    Medium,
    /// Destructive or hard-to-reverse changes (e.g., deletion).
    High,
}

impl AuditSeverity {
    /// The canonical storage representation of this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Parses the canonical storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

/// An immutable audit entry describing one state change.
///
/// Every successful lifecycle transition must produce exactly one audit
/// entry. Entries are written fire-and-forget: a failed write is logged
/// by the caller and never fails the primary operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// The name of the action performed (e.g., "`CreateVoucher`").
    pub action: String,
    /// The category of the entry.
    pub category: AuditCategory,
    /// How consequential the action is.
    pub severity: AuditSeverity,
    /// A human-readable description of what changed.
    pub message: String,
    /// The actor who initiated the change.
    pub actor: Actor,
    /// The organization the change is scoped to, when any.
    pub organization_id: Option<String>,
    /// Structured context (identifiers, changed fields).
    pub metadata: Value,
}

impl AuditEntry {
    /// Creates a new `AuditEntry`.
    ///
    /// Once created, an audit entry is immutable.
    ///
    /// # Arguments
    ///
    /// * `action` - The name of the action performed
    /// * `severity` - How consequential the action is
    /// * `message` - A human-readable description
    /// * `actor` - The actor who initiated the change
    /// * `organization_id` - The organization scope, when any
    /// * `metadata` - Structured context
    #[must_use]
    pub const fn new(
        action: String,
        severity: AuditSeverity,
        message: String,
        actor: Actor,
        organization_id: Option<String>,
        metadata: Value,
    ) -> Self {
        Self {
            action,
            category: AuditCategory::DataChange,
            severity,
            message,
            actor,
            organization_id,
            metadata,
        }
    }
}
