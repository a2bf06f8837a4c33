use backoffice_domain::{ListFilter, ListedRecord, PageSize, RecordId, RecordStatus};

use crate::{ClientMirror, ListSynchronizer, MirrorAction, RecordRepository, SyncOutcome};

/// Filtered, paginated list backed by a [`ClientMirror`].
#[derive(Debug)]
pub struct RecordListView<R: ListedRecord> {
    filter: ListFilter,
    page_size: PageSize,
    loading: bool,
    mirror: ClientMirror<R>,
    synchronizer: ListSynchronizer,
}

impl<R: ListedRecord> RecordListView<R> {
    /// Creates an empty view with the default page size.
    #[must_use]
    pub fn new(filter: ListFilter) -> Self {
        Self {
            filter,
            page_size: PageSize::default(),
            loading: false,
            mirror: ClientMirror::default(),
            synchronizer: ListSynchronizer::new(),
        }
    }

    /// Returns the active filter.
    #[must_use]
    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Returns the selected page size.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns whether a fetch is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the mirror.
    #[must_use]
    pub fn mirror(&self) -> &ClientMirror<R> {
        &self.mirror
    }

    /// Returns the mirror for patching by mutation handlers.
    pub fn mirror_mut(&mut self) -> &mut ClientMirror<R> {
        &mut self.mirror
    }

    /// "Show more" is offered when more rows match and nothing is loading.
    #[must_use]
    pub fn can_show_more(&self) -> bool {
        self.mirror.has_more() && !self.loading
    }

    /// Clears the mirror and fetches the first page.
    pub async fn reload(&mut self, repository: &dyn RecordRepository<R>) -> SyncOutcome {
        self.mirror.apply(MirrorAction::Reset);
        self.loading = true;
        let outcome = self
            .synchronizer
            .refresh(repository, &self.filter, self.page_size, &mut self.mirror)
            .await;
        self.loading = false;
        outcome
    }

    /// Replaces the filter and reloads.
    pub async fn set_filter(
        &mut self,
        repository: &dyn RecordRepository<R>,
        filter: ListFilter,
    ) -> SyncOutcome {
        self.filter = filter;
        self.reload(repository).await
    }

    /// Replaces the page size and reloads.
    pub async fn set_page_size(
        &mut self,
        repository: &dyn RecordRepository<R>,
        page_size: PageSize,
    ) -> SyncOutcome {
        self.page_size = page_size;
        self.reload(repository).await
    }

    /// Appends the next page.
    pub async fn show_more(&mut self, repository: &dyn RecordRepository<R>) -> SyncOutcome {
        self.loading = true;
        let outcome = self
            .synchronizer
            .show_more(repository, &self.filter, self.page_size, &mut self.mirror)
            .await;
        self.loading = false;
        outcome
    }

    /// Patches the mirror after a status toggle: rows the filter no longer
    /// admits are removed, others are updated in place.
    pub fn status_changed(&mut self, record_id: RecordId, status: RecordStatus) -> bool {
        let action = if self.filter.admits_status(status) {
            MirrorAction::SetStatus {
                id: record_id,
                status,
            }
        } else {
            MirrorAction::Remove(record_id)
        };
        self.mirror.apply(action)
    }
}
