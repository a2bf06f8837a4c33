//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_object_storage;
mod in_memory_audit_repository;
mod in_memory_object_storage;
mod in_memory_product_catalog;
mod in_memory_record_repository;
mod in_memory_settings_repository;
mod postgres_audit_repository;
mod postgres_employee_repository;
mod postgres_product_catalog;
mod postgres_purchase_order_item_repository;
mod postgres_rows;
mod postgres_settings_repository;
mod postgres_user_account_repository;

pub use http_object_storage::HttpObjectStorage;
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_object_storage::InMemoryObjectStorage;
pub use in_memory_product_catalog::InMemoryProductCatalog;
pub use in_memory_record_repository::InMemoryRecordRepository;
pub use in_memory_settings_repository::InMemorySystemSettingsRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_employee_repository::PostgresEmployeeRepository;
pub use postgres_product_catalog::PostgresProductCatalog;
pub use postgres_purchase_order_item_repository::PostgresPurchaseOrderItemRepository;
pub use postgres_settings_repository::PostgresSystemSettingsRepository;
pub use postgres_user_account_repository::PostgresUserAccountRepository;
