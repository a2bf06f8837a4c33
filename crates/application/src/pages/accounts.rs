use backoffice_core::UserIdentity;
use backoffice_domain::{
    AccountChanges, Capability, ListFilter, ListedRecord, PageSize, RecordId, RecordStatus,
    UserAccount,
};
use tracing::error;

use crate::{
    AccessGate, AccountForm, AccountService, AvatarUpload, ClientMirror, ConfirmationState,
    MirrorAction, SaveGuard, SyncOutcome, Toast,
};

use super::{RecordListView, StatusChange, SubmitOutcome};

/// Employee account list with status confirmations.
pub struct AccountsPage {
    identity: UserIdentity,
    gate: AccessGate,
    service: AccountService,
    view: RecordListView<UserAccount>,
    confirmation: ConfirmationState<StatusChange>,
    toast: Option<Toast>,
}

impl AccountsPage {
    /// Creates the page; nothing is fetched until [`Self::open`].
    #[must_use]
    pub fn new(identity: UserIdentity, gate: AccessGate, service: AccountService) -> Self {
        Self {
            identity,
            gate,
            service,
            view: RecordListView::new(ListFilter::active()),
            confirmation: ConfirmationState::default(),
            toast: None,
        }
    }

    /// Returns whether the signed-in user may manage accounts.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.gate
            .has_access(&self.identity, Capability::EmployeeAccounts)
    }

    /// Returns the list view.
    #[must_use]
    pub fn view(&self) -> &RecordListView<UserAccount> {
        &self.view
    }

    /// Returns the mirror so the details panel can patch it.
    pub fn mirror_mut(&mut self) -> &mut ClientMirror<UserAccount> {
        self.view.mirror_mut()
    }

    /// Returns the status confirmation dialog.
    #[must_use]
    pub fn confirmation(&self) -> &ConfirmationState<StatusChange> {
        &self.confirmation
    }

    /// Returns the last toast, if any.
    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Loads the first page. Unauthorized users get no fetch.
    pub async fn open(&mut self) -> Option<SyncOutcome> {
        if !self.is_authorized() {
            return None;
        }
        Some(self.view.reload(self.service.records()).await)
    }

    /// Applies new filter criteria.
    pub async fn search(&mut self, keyword: &str, status: Option<RecordStatus>) -> SyncOutcome {
        let filter = ListFilter {
            keyword: keyword.to_owned(),
            status,
            parent_id: None,
        };
        self.view.set_filter(self.service.records(), filter).await
    }

    /// Changes rows per page.
    pub async fn set_page_size(&mut self, page_size: PageSize) -> SyncOutcome {
        self.view
            .set_page_size(self.service.records(), page_size)
            .await
    }

    /// Appends the next page.
    pub async fn show_more(&mut self) -> SyncOutcome {
        self.view.show_more(self.service.records()).await
    }

    /// Asks for confirmation before toggling a status.
    pub fn request_status_change(&mut self, record_id: RecordId, status: RecordStatus) -> bool {
        self.confirmation.request(StatusChange { record_id, status })
    }

    /// Dismisses the confirmation dialog unless the toggle is running.
    pub fn cancel_status_change(&mut self) -> bool {
        self.confirmation.cancel()
    }

    /// Runs the confirmed toggle. The dialog closes once it settles.
    pub async fn confirm_status_change(&mut self) -> SubmitOutcome {
        let Some(change) = self.confirmation.confirm() else {
            return SubmitOutcome::Ignored;
        };

        let outcome = match self
            .service
            .set_status(&self.identity, &change.record_id, change.status)
            .await
        {
            Ok(_) => {
                self.view.status_changed(change.record_id, change.status);
                let toast = Toast::saved();
                self.toast = Some(toast.clone());
                SubmitOutcome::Saved(toast)
            }
            Err(error) => {
                error!(%error, account_id = %change.record_id, "failed to change account status");
                SubmitOutcome::Failed
            }
        };

        self.confirmation.settle();
        outcome
    }
}

/// Account details modal: display name and profile photo of one account.
pub struct AccountDetailsPanel {
    identity: UserIdentity,
    gate: AccessGate,
    service: AccountService,
    account_id: RecordId,
    account: Option<UserAccount>,
    guard: SaveGuard,
    uploading: bool,
}

impl AccountDetailsPanel {
    /// Creates the panel for one account.
    #[must_use]
    pub fn new(
        identity: UserIdentity,
        gate: AccessGate,
        service: AccountService,
        account_id: RecordId,
    ) -> Self {
        Self {
            identity,
            gate,
            service,
            account_id,
            account: None,
            guard: SaveGuard::default(),
            uploading: false,
        }
    }

    /// Users may edit their own account; account managers may edit any.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.identity.subject() == self.account_id.as_str() || self.is_account_admin()
    }

    /// Returns whether the user manages employee accounts.
    #[must_use]
    pub fn is_account_admin(&self) -> bool {
        self.gate
            .has_access(&self.identity, Capability::EmployeeAccounts)
    }

    /// Returns the loaded account.
    #[must_use]
    pub fn account(&self) -> Option<&UserAccount> {
        self.account.as_ref()
    }

    /// Returns whether a photo upload is running.
    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Returns the form pre-filled with the loaded name.
    #[must_use]
    pub fn form(&self) -> AccountForm {
        AccountForm {
            name: self
                .account
                .as_ref()
                .map(|account| account.name.clone())
                .unwrap_or_default(),
        }
    }

    /// Loads the account. Returns whether it was found.
    pub async fn load(&mut self) -> bool {
        match self.service.find(&self.account_id).await {
            Ok(account) => {
                self.account = Some(account);
                true
            }
            Err(error) => {
                error!(%error, account_id = %self.account_id, "failed to load account");
                false
            }
        }
    }

    /// Saves the display name, patching the account list when one is mirrored.
    pub async fn submit(
        &mut self,
        form: &AccountForm,
        mirror: Option<&mut ClientMirror<UserAccount>>,
    ) -> SubmitOutcome {
        if !self.can_edit() || !self.guard.begin() {
            return SubmitOutcome::Ignored;
        }

        let outcome = match form.validate() {
            Err(errors) => SubmitOutcome::Invalid(errors),
            Ok(name) => match self
                .service
                .update_profile(&self.identity, &self.account_id, name)
                .await
            {
                Ok(receipt) => {
                    self.patch(receipt.value, mirror);
                    SubmitOutcome::Saved(Toast::saved())
                }
                Err(error) => {
                    error!(%error, account_id = %self.account_id, "failed to update account name");
                    SubmitOutcome::Failed
                }
            },
        };

        self.guard.finish();
        outcome
    }

    /// Replaces the profile photo and returns the new public URL.
    pub async fn replace_avatar(
        &mut self,
        upload: AvatarUpload,
        mirror: Option<&mut ClientMirror<UserAccount>>,
    ) -> Option<String> {
        if !self.can_edit() || self.uploading {
            return None;
        }

        self.uploading = true;
        let result = self
            .service
            .replace_avatar(&self.identity, &self.account_id, upload)
            .await;
        self.uploading = false;

        match result {
            Ok(receipt) => {
                let avatar_url = receipt.value;
                self.patch(
                    AccountChanges {
                        name: None,
                        avatar_url: Some(avatar_url.clone()),
                    },
                    mirror,
                );
                Some(avatar_url)
            }
            Err(error) => {
                error!(%error, account_id = %self.account_id, "failed to replace profile photo");
                None
            }
        }
    }

    fn patch(&mut self, changes: AccountChanges, mirror: Option<&mut ClientMirror<UserAccount>>) {
        if let Some(account) = self.account.as_mut() {
            account.apply_changes(&changes);
        }
        if let Some(mirror) = mirror {
            mirror.apply(MirrorAction::Merge {
                id: self.account_id.clone(),
                changes,
            });
        }
    }
}
