//! Domain records, filters and access rules.

#![forbid(unsafe_code)]

mod access;
mod account;
mod audit;
mod employee;
mod listing;
mod purchase_order;
mod storage;

pub use access::{AccessAssignment, AccessMember, AdminAllowList, Capability, SystemAccessSettings};
pub use account::{AccountChanges, AccountDraft, UserAccount};
pub use audit::{AuditEntry, AuditKind};
pub use employee::{DepartmentRef, Employee, EmployeeChanges, EmployeeDraft, UserRef};
pub use listing::{
    DEFAULT_PAGE_SIZE, ListFilter, ListPage, ListedRecord, PageRequest, PageSize, RecordId,
    RecordStatus,
};
pub use purchase_order::{
    Product, ProductRef, PurchaseOrderItem, PurchaseOrderItemChanges, PurchaseOrderItemDraft,
};
pub use storage::ObjectPath;
