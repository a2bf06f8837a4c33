use backoffice_core::UserIdentity;
use backoffice_domain::{
    Capability, Employee, ListFilter, PageSize, RecordId, RecordStatus,
};
use tracing::error;

use crate::{
    AccessGate, ConfirmationState, EmployeeForm, EmployeeService, MirrorAction, ModalMode,
    ModalState, SaveGuard, SyncOutcome, Toast,
};

use super::{RecordListView, StatusChange, SubmitOutcome};

/// HR employee list with its add/edit modal and status confirmations.
pub struct EmployeesPage {
    identity: UserIdentity,
    gate: AccessGate,
    service: EmployeeService,
    view: RecordListView<Employee>,
    modal: ModalState<Employee>,
    confirmation: ConfirmationState<StatusChange>,
    guard: SaveGuard,
    toast: Option<Toast>,
}

impl EmployeesPage {
    /// Creates the page; nothing is fetched until [`Self::open`].
    #[must_use]
    pub fn new(identity: UserIdentity, gate: AccessGate, service: EmployeeService) -> Self {
        Self {
            identity,
            gate,
            service,
            view: RecordListView::new(ListFilter::active()),
            modal: ModalState::default(),
            confirmation: ConfirmationState::default(),
            guard: SaveGuard::default(),
            toast: None,
        }
    }

    /// Returns whether the signed-in user may see the page.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.gate.has_access(&self.identity, Capability::HumanResource)
    }

    /// Returns the list view.
    #[must_use]
    pub fn view(&self) -> &RecordListView<Employee> {
        &self.view
    }

    /// Returns the add/edit modal.
    #[must_use]
    pub fn modal(&self) -> &ModalState<Employee> {
        &self.modal
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

    /// Opens a blank employee form.
    pub fn open_add(&mut self) {
        self.modal.open_add();
    }

    /// Opens the form for an existing employee.
    pub fn open_edit(&mut self, employee: Employee) {
        self.modal.open_edit(employee);
    }

    /// Closes the modal unless a save is running.
    pub fn close_modal(&mut self) {
        if !self.guard.is_saving() {
            self.modal.close();
        }
    }

    /// Validates and saves the open form.
    pub async fn submit(&mut self, form: &EmployeeForm) -> SubmitOutcome {
        let Some(mode) = self.modal.mode() else {
            return SubmitOutcome::Ignored;
        };
        if !self.guard.begin() {
            return SubmitOutcome::Ignored;
        }

        let outcome = match mode {
            ModalMode::Add => self.create(form).await,
            ModalMode::Edit => self.update(form).await,
        };

        self.guard.finish();
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.modal.close();
        }
        outcome
    }

    async fn create(&mut self, form: &EmployeeForm) -> SubmitOutcome {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.service.create(&self.identity, draft).await {
            Ok(receipt) => {
                self.view
                    .mirror_mut()
                    .apply(MirrorAction::Prepend(receipt.value));
                self.saved()
            }
            Err(error) => {
                error!(%error, "failed to add employee");
                SubmitOutcome::Failed
            }
        }
    }

    async fn update(&mut self, form: &EmployeeForm) -> SubmitOutcome {
        let Some(current) = self.modal.payload().cloned() else {
            return SubmitOutcome::Ignored;
        };
        let changes = match form.changes_from(&current) {
            Ok(changes) => changes,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self
            .service
            .update(&self.identity, &current.id, changes)
            .await
        {
            Ok(receipt) => {
                self.view.mirror_mut().apply(MirrorAction::Merge {
                    id: current.id,
                    changes: receipt.value,
                });
                self.saved()
            }
            Err(error) => {
                error!(%error, employee_id = %current.id, "failed to update employee");
                SubmitOutcome::Failed
            }
        }
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
                self.saved()
            }
            Err(error) => {
                error!(%error, employee_id = %change.record_id, "failed to change employee status");
                SubmitOutcome::Failed
            }
        };

        self.confirmation.settle();
        outcome
    }

    fn saved(&mut self) -> SubmitOutcome {
        let toast = Toast::saved();
        self.toast = Some(toast.clone());
        SubmitOutcome::Saved(toast)
    }
}
