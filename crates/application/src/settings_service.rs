use std::sync::Arc;

use backoffice_core::{AppResult, OrgId, UserIdentity};
use backoffice_domain::{AuditEntry, AuditKind, SystemAccessSettings};
use tracing::{info, warn};

use crate::{AuditOutcome, AuditTrail, MutationReceipt, SystemSettingsRepository};

/// Reads and saves the `system_access` settings row.
#[derive(Clone)]
pub struct SettingsService {
    repository: Arc<dyn SystemSettingsRepository>,
    audit: AuditTrail,
    org_id: OrgId,
}

impl SettingsService {
    /// Creates a new settings service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn SystemSettingsRepository>,
        audit: AuditTrail,
        org_id: OrgId,
    ) -> Self {
        Self {
            repository,
            audit,
            org_id,
        }
    }

    /// Loads the settings row, or empty settings when none was saved yet.
    pub async fn load(&self) -> AppResult<SystemAccessSettings> {
        Ok(self
            .repository
            .find_system_access(self.org_id)
            .await?
            .unwrap_or_default())
    }

    /// Saves the settings: overwrite by id when stored, insert otherwise.
    pub async fn save(
        &self,
        actor: &UserIdentity,
        settings: SystemAccessSettings,
    ) -> AppResult<MutationReceipt<SystemAccessSettings>> {
        let saved = if settings.id.is_some() {
            let settings = self.keep_retained_entries(settings).await?;
            self.repository
                .upsert_system_access(self.org_id, settings)
                .await?
        } else {
            self.repository
                .insert_system_access(self.org_id, settings.assignments)
                .await?
        };
        info!(org_id = %self.org_id, assignments = saved.assignments.len(), "system access saved");

        let Some(settings_id) = saved.id.clone() else {
            warn!(org_id = %self.org_id, "saved settings row has no id; audit skipped");
            return Ok(MutationReceipt {
                value: saved,
                audit: AuditOutcome::Dropped,
            });
        };

        let entry = AuditEntry::new(
            settings_id,
            AuditKind::Settings,
            "Updated system access",
            actor.subject(),
        );
        self.audit.seal(saved, entry).await
    }

    async fn keep_retained_entries(
        &self,
        mut settings: SystemAccessSettings,
    ) -> AppResult<SystemAccessSettings> {
        if settings.retained.is_empty()
            && let Some(stored) = self.repository.find_system_access(self.org_id).await?
        {
            settings.retained = stored.retained;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use backoffice_core::OrgId;
    use backoffice_domain::{AccessMember, Capability, SystemAccessSettings};
    use serde_json::json;

    use crate::test_support::{FakeAuditRepository, FakeSettingsRepository, identity, record_id};
    use crate::{AuditOutcome, AuditPolicy, AuditTrail};

    use super::SettingsService;

    fn member() -> Vec<AccessMember> {
        vec![AccessMember {
            user_id: "user-1".to_owned(),
            name: "Clerk".to_owned(),
        }]
    }

    #[tokio::test]
    async fn first_save_inserts_then_later_saves_upsert() {
        let repository = Arc::new(FakeSettingsRepository::default());
        let audit = Arc::new(FakeAuditRepository::default());
        let service = SettingsService::new(
            repository.clone(),
            AuditTrail::new(audit.clone(), AuditPolicy::BestEffort),
            OrgId::new(),
        );

        let Ok(mut settings) = service.load().await else {
            panic!("load should succeed");
        };
        assert!(settings.id.is_none());

        settings.replace_assignment(Capability::Payroll, member());
        let Ok(receipt) = service.save(&identity(), settings).await else {
            panic!("insert should succeed");
        };
        assert_eq!(repository.insert_count(), 1);
        assert_eq!(receipt.audit, AuditOutcome::Recorded);

        let mut settings = receipt.value;
        settings.replace_assignment(Capability::Settings, member());
        assert!(service.save(&identity(), settings).await.is_ok());
        assert_eq!(repository.insert_count(), 1);
        assert_eq!(repository.upsert_count(), 1);
        assert_eq!(audit.entries().await.len(), 2);
    }

    #[tokio::test]
    async fn save_keeps_replaced_assignment_last() {
        let mut stored = SystemAccessSettings::new(Some(record_id("settings-1")), Vec::new());
        stored.replace_assignment(Capability::HumanResource, member());
        stored.replace_assignment(Capability::Inventory, member());
        let repository = Arc::new(FakeSettingsRepository::with_settings(stored));
        let service = SettingsService::new(
            repository,
            AuditTrail::new(Arc::new(FakeAuditRepository::default()), AuditPolicy::BestEffort),
            OrgId::new(),
        );

        let Ok(mut settings) = service.load().await else {
            panic!("load should succeed");
        };
        settings.replace_assignment(Capability::HumanResource, Vec::new());
        assert!(service.save(&identity(), settings).await.is_ok());

        let reloaded = service.load().await.unwrap_or_default();
        let order: Vec<Capability> = reloaded
            .assignments
            .iter()
            .map(|assignment| assignment.capability)
            .collect();
        assert_eq!(order, vec![Capability::Inventory, Capability::HumanResource]);
    }

    #[tokio::test]
    async fn save_writes_back_entries_of_unknown_capabilities() {
        let stored = SystemAccessSettings::from_stored(
            Some(record_id("settings-1")),
            vec![json!({ "access_type": "accounting", "data": [] })],
        );
        let repository = Arc::new(FakeSettingsRepository::with_settings(stored));
        let service = SettingsService::new(
            repository,
            AuditTrail::new(Arc::new(FakeAuditRepository::default()), AuditPolicy::BestEffort),
            OrgId::new(),
        );

        let mut edited = SystemAccessSettings::new(Some(record_id("settings-1")), Vec::new());
        edited.replace_assignment(Capability::Payroll, member());
        assert!(service.save(&identity(), edited).await.is_ok());

        let reloaded = service.load().await.unwrap_or_default();
        assert!(reloaded.assignment(Capability::Payroll).is_some());
        assert_eq!(
            reloaded.retained,
            vec![json!({ "access_type": "accounting", "data": [] })]
        );
    }
}
