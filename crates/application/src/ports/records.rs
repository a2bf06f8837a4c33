use async_trait::async_trait;

use backoffice_core::AppResult;
use backoffice_domain::{
    ListFilter, ListPage, ListedRecord, PageRequest, Product, RecordId, RecordStatus,
};

/// Typed repository port for one remote table.
///
/// Every method is a single round trip; nothing spans tables.
#[async_trait]
pub trait RecordRepository<R: ListedRecord>: Send + Sync {
    /// Reads one page of rows matching the filter plus the overall match count.
    ///
    /// Row order is whatever the remote store returns; no sort is imposed.
    async fn list(&self, filter: &ListFilter, page: PageRequest) -> AppResult<ListPage<R>>;

    /// Reads a single row.
    async fn find(&self, record_id: &RecordId) -> AppResult<Option<R>>;

    /// Inserts a row and returns it with its assigned id.
    async fn create(&self, draft: R::Draft) -> AppResult<R>;

    /// Writes the changed fields of one row.
    async fn update(&self, record_id: &RecordId, changes: R::Changes) -> AppResult<()>;

    /// Writes the lifecycle status of one row.
    async fn set_status(&self, record_id: &RecordId, status: RecordStatus) -> AppResult<()>;
}

/// Lookup port for products offered in purchase order forms.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Lists products with `Active` status.
    async fn list_active_products(&self) -> AppResult<Vec<Product>>;
}
