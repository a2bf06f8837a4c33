use backoffice_core::UserIdentity;
use backoffice_domain::{AccessMember, Capability, SystemAccessSettings};
use tracing::error;

use crate::{AccessGate, SaveGuard, SettingsService, Toast};

use super::SubmitOutcome;

/// System settings page editing who may manage each capability.
pub struct SystemSettingsPage {
    identity: UserIdentity,
    gate: AccessGate,
    service: SettingsService,
    settings: Option<SystemAccessSettings>,
    guard: SaveGuard,
    toast: Option<Toast>,
}

impl SystemSettingsPage {
    /// Creates the page; nothing is fetched until [`Self::open`].
    #[must_use]
    pub fn new(identity: UserIdentity, gate: AccessGate, service: SettingsService) -> Self {
        Self {
            identity,
            gate,
            service,
            settings: None,
            guard: SaveGuard::default(),
            toast: None,
        }
    }

    /// Returns whether the signed-in user may manage settings.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.gate.has_access(&self.identity, Capability::Settings)
    }

    /// Returns the loaded settings.
    #[must_use]
    pub fn settings(&self) -> Option<&SystemAccessSettings> {
        self.settings.as_ref()
    }

    /// Returns the members listed under a capability.
    #[must_use]
    pub fn members(&self, capability: Capability) -> &[AccessMember] {
        self.settings
            .as_ref()
            .and_then(|settings| settings.assignment(capability))
            .map(|assignment| assignment.members.as_slice())
            .unwrap_or_default()
    }

    /// Returns the last toast, if any.
    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Loads the settings row. Returns whether it loaded.
    pub async fn open(&mut self) -> bool {
        if !self.is_authorized() {
            return false;
        }

        match self.service.load().await {
            Ok(settings) => {
                self.settings = Some(settings);
                true
            }
            Err(error) => {
                error!(%error, "failed to load system settings");
                false
            }
        }
    }

    /// Replaces the members of one capability locally.
    pub fn assign(&mut self, capability: Capability, members: Vec<AccessMember>) {
        self.settings
            .get_or_insert_with(SystemAccessSettings::default)
            .replace_assignment(capability, members);
    }

    /// Saves the edited settings.
    pub async fn save(&mut self) -> SubmitOutcome {
        let Some(settings) = self.settings.clone() else {
            return SubmitOutcome::Ignored;
        };
        if !self.is_authorized() || !self.guard.begin() {
            return SubmitOutcome::Ignored;
        }

        let outcome = match self.service.save(&self.identity, settings).await {
            Ok(receipt) => {
                self.settings = Some(receipt.value);
                let toast = Toast::saved();
                self.toast = Some(toast.clone());
                SubmitOutcome::Saved(toast)
            }
            Err(error) => {
                error!(%error, "failed to save system settings");
                SubmitOutcome::Failed
            }
        };

        self.guard.finish();
        outcome
    }
}
