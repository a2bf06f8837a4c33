mod audit;
mod records;
mod settings;
mod storage;

pub use audit::AuditRepository;
pub use records::{ProductCatalog, RecordRepository};
pub use settings::SystemSettingsRepository;
pub use storage::ObjectStorage;
