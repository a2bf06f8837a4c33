use std::sync::Arc;

use backoffice_core::{AppError, AppResult, OrgId, UserIdentity};
use backoffice_domain::{AdminAllowList, Capability, SystemAccessSettings};
use tracing::error;

use crate::SystemSettingsRepository;

/// Decides whether an identity may use a capability.
///
/// Allow-listed administrators always pass. Everyone else needs to be
/// listed under the capability in the loaded settings; until settings are
/// loaded, non-administrators are denied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGate {
    administrators: AdminAllowList,
    settings: Option<SystemAccessSettings>,
}

impl AccessGate {
    /// Creates a gate with no settings loaded yet.
    #[must_use]
    pub fn new(administrators: AdminAllowList) -> Self {
        Self {
            administrators,
            settings: None,
        }
    }

    /// Creates a gate with settings already loaded.
    #[must_use]
    pub fn with_settings(administrators: AdminAllowList, settings: SystemAccessSettings) -> Self {
        Self {
            administrators,
            settings: Some(settings),
        }
    }

    /// Installs settings once they arrive.
    pub fn install(&mut self, settings: SystemAccessSettings) {
        self.settings = Some(settings);
    }

    /// Returns whether settings have been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.settings.is_some()
    }

    /// Returns the loaded settings.
    #[must_use]
    pub fn settings(&self) -> Option<&SystemAccessSettings> {
        self.settings.as_ref()
    }

    /// Returns whether the identity is an allow-listed administrator.
    #[must_use]
    pub fn is_administrator(&self, identity: &UserIdentity) -> bool {
        self.administrators.contains(identity.email())
    }

    /// Evaluates access. Never fails.
    #[must_use]
    pub fn has_access(&self, identity: &UserIdentity, capability: Capability) -> bool {
        if self.is_administrator(identity) {
            return true;
        }

        self.settings
            .as_ref()
            .is_some_and(|settings| settings.grants(identity, capability))
    }
}

/// Application service that loads permission settings into an [`AccessGate`].
#[derive(Clone)]
pub struct AccessService {
    repository: Arc<dyn SystemSettingsRepository>,
    administrators: AdminAllowList,
    org_id: OrgId,
}

impl AccessService {
    /// Creates a new access service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn SystemSettingsRepository>,
        administrators: AdminAllowList,
        org_id: OrgId,
    ) -> Self {
        Self {
            repository,
            administrators,
            org_id,
        }
    }

    /// Returns a gate without settings, as seen before the load completes.
    #[must_use]
    pub fn unloaded_gate(&self) -> AccessGate {
        AccessGate::new(self.administrators.clone())
    }

    /// Loads the settings row and returns a gate over it.
    ///
    /// A missing row yields empty settings. A failed read is logged and
    /// yields an unloaded gate.
    pub async fn load_gate(&self) -> AccessGate {
        match self.repository.find_system_access(self.org_id).await {
            Ok(settings) => AccessGate::with_settings(
                self.administrators.clone(),
                settings.unwrap_or_default(),
            ),
            Err(error) => {
                error!(org_id = %self.org_id, %error, "failed to load system access settings");
                self.unloaded_gate()
            }
        }
    }

    /// Ensures the identity may use the capability.
    pub async fn require(&self, identity: &UserIdentity, capability: Capability) -> AppResult<()> {
        if self.load_gate().await.has_access(identity, capability) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "'{}' is not allowed to manage '{}'",
            identity.email(),
            capability.as_str()
        )))
    }
}
