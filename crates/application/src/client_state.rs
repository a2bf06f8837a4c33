//! Client-side page state: the mirror of remote rows, the list
//! synchronizer, modal and confirmation state, and form validation.

mod forms;
mod mirror;
mod modal;
mod synchronizer;
mod toast;

pub use forms::{AccountForm, EmployeeForm, FieldErrors, PurchaseOrderItemForm, ValidatedItem};
pub use mirror::{ClientMirror, MirrorAction, ResultCounters};
pub use modal::{ConfirmationState, ModalMode, ModalState, SaveGuard};
pub use synchronizer::{FetchTicket, ListSynchronizer, SyncMode, SyncOutcome};
pub use toast::Toast;

#[cfg(test)]
mod tests;
