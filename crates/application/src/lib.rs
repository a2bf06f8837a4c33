//! Application services, ports and client page state.

#![forbid(unsafe_code)]

mod access_service;
mod account_service;
mod audit_trail;
mod client_state;
mod employee_service;
mod pages;
mod ports;
mod purchase_order_service;
mod settings_service;

#[cfg(test)]
mod test_support;

pub use access_service::{AccessGate, AccessService};
pub use account_service::{AccountService, AvatarUpload, generate_reference_code};
pub use audit_trail::{AuditOutcome, AuditPolicy, AuditTrail, MutationReceipt};
pub use client_state::{
    AccountForm, ClientMirror, ConfirmationState, EmployeeForm, FetchTicket, FieldErrors,
    ListSynchronizer, MirrorAction, ModalMode, ModalState, PurchaseOrderItemForm, ResultCounters,
    SaveGuard, SyncMode, SyncOutcome, Toast, ValidatedItem,
};
pub use employee_service::EmployeeService;
pub use pages::{
    AccountDetailsPanel, AccountsPage, EmployeesPage, PurchaseOrderItemsPanel, RecordListView,
    StatusChange, SubmitOutcome, SystemSettingsPage,
};
pub use ports::{
    AuditRepository, ObjectStorage, ProductCatalog, RecordRepository, SystemSettingsRepository,
};
pub use purchase_order_service::PurchaseOrderItemService;
pub use settings_service::SettingsService;
