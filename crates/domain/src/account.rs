use serde::{Deserialize, Serialize};

use crate::listing::{ListedRecord, RecordId, RecordStatus};

/// User account row backing profile and employee-account pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Row id, equal to the identity provider subject.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Public avatar URL, when uploaded.
    pub avatar_url: Option<String>,
    /// Lifecycle status.
    pub status: RecordStatus,
}

/// Validated account payload for inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
}

/// Changed account fields for updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    /// New display name.
    pub name: Option<String>,
    /// New public avatar URL.
    pub avatar_url: Option<String>,
}

impl ListedRecord for UserAccount {
    type Draft = AccountDraft;
    type Changes = AccountChanges;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<RecordStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword) || self.email.to_lowercase().contains(keyword)
    }

    fn apply_changes(&mut self, changes: &Self::Changes) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(avatar_url) = &changes.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
    }

    fn from_draft(record_id: RecordId, draft: Self::Draft) -> Self {
        Self {
            id: record_id,
            name: draft.name,
            email: draft.email,
            avatar_url: None,
            status: RecordStatus::Active,
        }
    }
}
