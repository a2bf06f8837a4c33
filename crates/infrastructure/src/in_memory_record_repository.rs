use async_trait::async_trait;
use backoffice_application::RecordRepository;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::{ListFilter, ListPage, ListedRecord, PageRequest, RecordId, RecordStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory implementation of a typed record table.
///
/// Rows keep insertion order, which is also the order pages are served in.
pub struct InMemoryRecordRepository<R: ListedRecord> {
    rows: RwLock<Vec<R>>,
}

impl<R: ListedRecord> InMemoryRecordRepository<R> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Creates a table seeded with rows.
    #[must_use]
    pub fn with_rows(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns whether no row is stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<R: ListedRecord> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: ListedRecord> RecordRepository<R> for InMemoryRecordRepository<R> {
    async fn list(&self, filter: &ListFilter, page: PageRequest) -> AppResult<ListPage<R>> {
        let rows = self.rows.read().await;
        let matching: Vec<&R> = rows.iter().filter(|row| filter.matches(*row)).collect();
        let total = matching.len() as u64;
        let records = matching
            .into_iter()
            .skip(page.offset)
            .take(page.page_size.get())
            .cloned()
            .collect();

        Ok(ListPage { records, total })
    }

    async fn find(&self, record_id: &RecordId) -> AppResult<Option<R>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.record_id() == record_id)
            .cloned())
    }

    async fn create(&self, draft: R::Draft) -> AppResult<R> {
        let record_id = RecordId::new(Uuid::new_v4().to_string())?;
        let record = R::from_draft(record_id, draft);
        self.rows.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record_id: &RecordId, changes: R::Changes) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.record_id() == record_id)
            .ok_or_else(|| AppError::NotFound(format!("record '{record_id}' does not exist")))?;
        row.apply_changes(&changes);
        Ok(())
    }

    async fn set_status(&self, record_id: &RecordId, status: RecordStatus) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.record_id() == record_id)
            .ok_or_else(|| AppError::NotFound(format!("record '{record_id}' does not exist")))?;
        if row.status().is_none() {
            return Err(AppError::Validation(format!(
                "record '{record_id}' has no status"
            )));
        }
        row.set_status(status);
        Ok(())
    }
}
