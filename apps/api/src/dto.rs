mod accounts;
mod common;
mod employees;
mod purchase_orders;
mod settings;

pub use accounts::{
    AvatarResponse, AvatarUploadQuery, UpdateAccountProfileRequest, UserAccountPageResponse,
    UserAccountResponse,
};
pub use common::{AccessResponse, HealthResponse, ListQuery, SavedResponse, StatusChangeRequest};
pub use employees::{
    DepartmentPayload, EmployeePageResponse, EmployeeRequest, EmployeeResponse, UserRefResponse,
};
pub use purchase_orders::{
    ProductResponse, PurchaseOrderItemPageResponse, PurchaseOrderItemRequest,
    PurchaseOrderItemResponse,
};
pub use settings::{
    AccessAssignmentPayload, AccessMemberPayload, SaveSystemAccessRequest, SystemAccessResponse,
};
