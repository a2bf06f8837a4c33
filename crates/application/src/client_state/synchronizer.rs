use std::sync::atomic::{AtomicU64, Ordering};

use backoffice_core::AppResult;
use backoffice_domain::{ListFilter, ListPage, ListedRecord, PageRequest, PageSize};
use tracing::{debug, error, warn};

use crate::RecordRepository;

use super::mirror::{ClientMirror, MirrorAction};

/// How a fetched page lands in the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// First page after a filter or page-size change.
    Replace,
    /// Next page after "show more".
    Append,
}

/// Handle of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    mode: SyncMode,
    page: PageRequest,
}

impl FetchTicket {
    /// Returns the landing mode.
    #[must_use]
    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Returns the requested window.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        self.page
    }
}

/// What settling a fetch did to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The page landed; `added` rows came in.
    Applied {
        /// Rows received.
        added: usize,
    },
    /// A newer fetch was issued meanwhile; the response was dropped.
    Stale,
    /// The read failed; nothing was added.
    Failed,
}

/// Issues list fetches and lands their responses in a [`ClientMirror`].
///
/// Each fetch takes a generation number. Only the response of the most
/// recently issued fetch is applied.
#[derive(Debug, Default)]
pub struct ListSynchronizer {
    generation: AtomicU64,
}

impl ListSynchronizer {
    /// Creates a synchronizer with no fetch issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one page from the remote store.
    pub async fn sync<R: ListedRecord>(
        repository: &dyn RecordRepository<R>,
        filter: &ListFilter,
        page_size: PageSize,
        offset: usize,
    ) -> AppResult<ListPage<R>> {
        repository
            .list(filter, PageRequest { page_size, offset })
            .await
    }

    /// Issues a first-page fetch.
    pub fn begin_refresh(&self, page_size: PageSize) -> FetchTicket {
        self.issue(SyncMode::Replace, PageRequest::first(page_size))
    }

    /// Issues a next-page fetch starting after the mirrored rows.
    pub fn begin_show_more<R: ListedRecord>(
        &self,
        page_size: PageSize,
        mirror: &ClientMirror<R>,
    ) -> FetchTicket {
        self.issue(
            SyncMode::Append,
            PageRequest {
                page_size,
                offset: mirror.records().len(),
            },
        )
    }

    /// Returns whether no newer fetch was issued after this one.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Performs the read a ticket describes.
    pub async fn fetch<R: ListedRecord>(
        repository: &dyn RecordRepository<R>,
        filter: &ListFilter,
        ticket: &FetchTicket,
    ) -> AppResult<ListPage<R>> {
        Self::sync(repository, filter, ticket.page.page_size, ticket.page.offset).await
    }

    /// Lands a response in the mirror unless it is stale or failed.
    pub fn settle<R: ListedRecord>(
        &self,
        ticket: FetchTicket,
        response: AppResult<ListPage<R>>,
        mirror: &mut ClientMirror<R>,
    ) -> SyncOutcome {
        if !self.is_current(&ticket) {
            warn!(generation = ticket.generation, "discarding superseded list response");
            return SyncOutcome::Stale;
        }

        match response {
            Ok(page) => {
                let added = page.records.len();
                let action = match ticket.mode {
                    SyncMode::Replace => MirrorAction::Replace(page),
                    SyncMode::Append => MirrorAction::Append(page),
                };
                mirror.apply(action);
                debug!(added, offset = ticket.page.offset, "list page applied");
                SyncOutcome::Applied { added }
            }
            Err(error) => {
                error!(%error, offset = ticket.page.offset, "list fetch failed");
                SyncOutcome::Failed
            }
        }
    }

    /// Fetches the first page and replaces the mirror.
    pub async fn refresh<R: ListedRecord>(
        &self,
        repository: &dyn RecordRepository<R>,
        filter: &ListFilter,
        page_size: PageSize,
        mirror: &mut ClientMirror<R>,
    ) -> SyncOutcome {
        let ticket = self.begin_refresh(page_size);
        let response = Self::fetch(repository, filter, &ticket).await;
        self.settle(ticket, response, mirror)
    }

    /// Fetches the next page and appends it to the mirror.
    pub async fn show_more<R: ListedRecord>(
        &self,
        repository: &dyn RecordRepository<R>,
        filter: &ListFilter,
        page_size: PageSize,
        mirror: &mut ClientMirror<R>,
    ) -> SyncOutcome {
        let ticket = self.begin_show_more(page_size, mirror);
        let response = Self::fetch(repository, filter, &ticket).await;
        self.settle(ticket, response, mirror)
    }

    fn issue(&self, mode: SyncMode, page: PageRequest) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket {
            generation,
            mode,
            page,
        }
    }
}
