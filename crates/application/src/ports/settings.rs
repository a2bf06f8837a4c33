use async_trait::async_trait;

use backoffice_core::{AppResult, OrgId};
use backoffice_domain::{AccessAssignment, SystemAccessSettings};

/// Repository port for the `system_access` settings row.
#[async_trait]
pub trait SystemSettingsRepository: Send + Sync {
    /// Reads the settings row of an organization, if one was ever saved.
    async fn find_system_access(&self, org_id: OrgId) -> AppResult<Option<SystemAccessSettings>>;

    /// Inserts the first settings row of an organization.
    async fn insert_system_access(
        &self,
        org_id: OrgId,
        assignments: Vec<AccessAssignment>,
    ) -> AppResult<SystemAccessSettings>;

    /// Overwrites an existing settings row by id.
    async fn upsert_system_access(
        &self,
        org_id: OrgId,
        settings: SystemAccessSettings,
    ) -> AppResult<SystemAccessSettings>;
}
