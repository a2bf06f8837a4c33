use async_trait::async_trait;
use backoffice_application::AuditRepository;
use backoffice_core::AppResult;
use backoffice_domain::{AuditEntry, RecordId};
use tokio::sync::RwLock;

/// In-memory append-only audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns entries attached to one reference row, oldest first.
    pub async fn entries_for(&self, reference_id: &RecordId) -> Vec<AuditEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|entry| &entry.reference_id == reference_id)
            .cloned()
            .collect()
    }

    /// Returns every entry, oldest first.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_entry(&self, entry: AuditEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
