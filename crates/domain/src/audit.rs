use serde::{Deserialize, Serialize};

use crate::listing::RecordId;

/// Area of the application an audit entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// Purchase order and its items.
    PurchaseOrder,
    /// HR employee record.
    Employee,
    /// User account.
    Account,
    /// System settings.
    Settings,
}

impl AuditKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::Employee => "employee",
            Self::Account => "account",
            Self::Settings => "settings",
        }
    }
}

/// Immutable, append-only description of a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Row the message is attached to, e.g. the purchase order.
    pub reference_id: RecordId,
    /// Area of the mutation.
    pub kind: AuditKind,
    /// Human-readable message.
    pub message: String,
    /// Subject of the acting user.
    pub sender_id: String,
}

impl AuditEntry {
    /// Creates a system-generated audit entry.
    #[must_use]
    pub fn new(
        reference_id: RecordId,
        kind: AuditKind,
        message: impl Into<String>,
        sender_id: impl Into<String>,
    ) -> Self {
        Self {
            reference_id,
            kind,
            message: message.into(),
            sender_id: sender_id.into(),
        }
    }
}
