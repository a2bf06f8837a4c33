use std::sync::Arc;
use std::time::Duration;

use backoffice_application::{
    AccessService, AccountService, AuditPolicy, AuditRepository, AuditTrail, EmployeeService,
    ObjectStorage, ProductCatalog, PurchaseOrderItemService, RecordRepository, SettingsService,
    SystemSettingsRepository,
};
use backoffice_core::{AppError, OrgId};
use backoffice_domain::{AdminAllowList, Employee, PurchaseOrderItem, UserAccount};
use backoffice_infrastructure::{
    HttpObjectStorage, PostgresAuditRepository, PostgresEmployeeRepository,
    PostgresProductCatalog, PostgresPurchaseOrderItemRepository,
    PostgresSystemSettingsRepository, PostgresUserAccountRepository,
};
use sqlx::PgPool;

use crate::api_config::{ApiConfig, StorageConfig};
use crate::state::AppState;

/// Port implementations the services are wired from.
#[derive(Clone)]
pub struct PortSet {
    pub employees: Arc<dyn RecordRepository<Employee>>,
    pub purchase_order_items: Arc<dyn RecordRepository<PurchaseOrderItem>>,
    pub accounts: Arc<dyn RecordRepository<UserAccount>>,
    pub products: Arc<dyn ProductCatalog>,
    pub settings: Arc<dyn SystemSettingsRepository>,
    pub audit: Arc<dyn AuditRepository>,
    pub storage: Arc<dyn ObjectStorage>,
}

pub fn build_postgres_ports(pool: &PgPool, storage: &StorageConfig) -> Result<PortSet, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    Ok(PortSet {
        employees: Arc::new(PostgresEmployeeRepository::new(pool.clone())),
        purchase_order_items: Arc::new(PostgresPurchaseOrderItemRepository::new(pool.clone())),
        accounts: Arc::new(PostgresUserAccountRepository::new(pool.clone())),
        products: Arc::new(PostgresProductCatalog::new(pool.clone())),
        settings: Arc::new(PostgresSystemSettingsRepository::new(pool.clone())),
        audit: Arc::new(PostgresAuditRepository::new(pool.clone())),
        storage: Arc::new(HttpObjectStorage::new(
            http_client,
            storage.base_url.clone(),
            storage.bucket.as_str(),
            storage.service_key.as_str(),
        )),
    })
}

pub fn build_app_state(ports: PortSet, config: &ApiConfig) -> AppState {
    state_from_ports(
        ports,
        config.administrators.clone(),
        config.org_id,
        config.audit_policy,
        config.frontend_url.clone(),
        config.proxy_secret.clone(),
    )
}

pub(crate) fn state_from_ports(
    ports: PortSet,
    administrators: AdminAllowList,
    org_id: OrgId,
    audit_policy: AuditPolicy,
    frontend_url: String,
    proxy_secret: String,
) -> AppState {
    let audit = AuditTrail::new(ports.audit, audit_policy);

    AppState {
        access_service: AccessService::new(ports.settings.clone(), administrators, org_id),
        employee_service: EmployeeService::new(ports.employees, audit.clone()),
        purchase_order_item_service: PurchaseOrderItemService::new(
            ports.purchase_order_items,
            ports.products,
            audit.clone(),
        ),
        account_service: AccountService::new(ports.accounts, ports.storage, audit.clone()),
        settings_service: SettingsService::new(ports.settings, audit, org_id),
        frontend_url,
        proxy_secret,
    }
}
