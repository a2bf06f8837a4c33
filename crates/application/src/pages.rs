//! Page controllers: each owns a mirror, its modals and the gate check,
//! and routes user actions through the mutation handlers.
//!
//! Page handlers never return errors. Failures are logged and leave the
//! page as it was; only a save produces a toast.

mod accounts;
mod employees;
mod list_view;
mod purchase_orders;
mod settings;

pub use accounts::{AccountDetailsPanel, AccountsPage};
pub use employees::EmployeesPage;
pub use list_view::RecordListView;
pub use purchase_orders::PurchaseOrderItemsPanel;
pub use settings::SystemSettingsPage;

use backoffice_domain::{RecordId, RecordStatus};

use crate::{FieldErrors, Toast};

/// Status toggle awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Row to toggle.
    pub record_id: RecordId,
    /// Status the row moves to.
    pub status: RecordStatus,
}

/// Result of a submit or a confirmed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The mutation succeeded.
    Saved(Toast),
    /// Input failed validation; nothing was sent.
    Invalid(FieldErrors),
    /// The mutation failed and was logged.
    Failed,
    /// Nothing to do: a save is already running, no dialog is open, or
    /// the user lacks access.
    Ignored,
}

#[cfg(test)]
mod tests;
