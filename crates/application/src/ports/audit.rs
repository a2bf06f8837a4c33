use async_trait::async_trait;

use backoffice_core::AppResult;
use backoffice_domain::AuditEntry;

/// Port for persisting append-only audit entries.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit entry.
    async fn append_entry(&self, entry: AuditEntry) -> AppResult<()>;
}
