use std::collections::HashMap;

use async_trait::async_trait;
use backoffice_application::SystemSettingsRepository;
use backoffice_core::{AppError, AppResult, OrgId};
use backoffice_domain::{AccessAssignment, RecordId, SystemAccessSettings};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory `system_access` settings rows keyed by organization.
#[derive(Debug, Default)]
pub struct InMemorySystemSettingsRepository {
    rows: RwLock<HashMap<OrgId, SystemAccessSettings>>,
}

impl InMemorySystemSettingsRepository {
    /// Creates a store without settings rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SystemSettingsRepository for InMemorySystemSettingsRepository {
    async fn find_system_access(&self, org_id: OrgId) -> AppResult<Option<SystemAccessSettings>> {
        Ok(self.rows.read().await.get(&org_id).cloned())
    }

    async fn insert_system_access(
        &self,
        org_id: OrgId,
        assignments: Vec<AccessAssignment>,
    ) -> AppResult<SystemAccessSettings> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&org_id) {
            return Err(AppError::Conflict(format!(
                "system access settings already exist for organization '{org_id}'"
            )));
        }

        let settings = SystemAccessSettings::new(
            Some(RecordId::new(Uuid::new_v4().to_string())?),
            assignments,
        );
        rows.insert(org_id, settings.clone());
        Ok(settings)
    }

    async fn upsert_system_access(
        &self,
        org_id: OrgId,
        settings: SystemAccessSettings,
    ) -> AppResult<SystemAccessSettings> {
        if settings.id.is_none() {
            return Err(AppError::Validation(
                "settings upsert requires a stored row id".to_owned(),
            ));
        }

        self.rows.write().await.insert(org_id, settings.clone());
        Ok(settings)
    }
}
