use backoffice_application::{
    AccessService, AccountService, EmployeeService, PurchaseOrderItemService, SettingsService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub employee_service: EmployeeService,
    pub purchase_order_item_service: PurchaseOrderItemService,
    pub account_service: AccountService,
    pub settings_service: SettingsService,
    pub frontend_url: String,
    pub proxy_secret: String,
}
