use backoffice_domain::{ListPage, ListedRecord, RecordId, RecordStatus};

/// "Showing N of M" counters displayed above a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCounters {
    /// Rows currently held by the mirror after the last synchronization.
    pub showing: u64,
    /// Rows matching the filter remotely.
    pub results: u64,
}

/// Patch applied to a [`ClientMirror`].
#[derive(Debug, Clone)]
pub enum MirrorAction<R: ListedRecord> {
    /// Drop every row and zero the counters.
    Reset,
    /// Replace the rows with a freshly fetched first page.
    Replace(ListPage<R>),
    /// Append a "show more" page.
    Append(ListPage<R>),
    /// Insert a newly created row at the top.
    Prepend(R),
    /// Merge changed fields into the row with this id.
    Merge {
        /// Target row.
        id: RecordId,
        /// Changed fields.
        changes: R::Changes,
    },
    /// Remove the row with this id.
    Remove(RecordId),
    /// Overwrite the status of the row with this id in place.
    SetStatus {
        /// Target row.
        id: RecordId,
        /// New status.
        status: RecordStatus,
    },
}

/// In-memory copy of the rows a page currently displays.
///
/// Only synchronizations touch the counters. Local patches after mutations
/// leave them as they were, so they can drift until the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMirror<R> {
    records: Vec<R>,
    counters: ResultCounters,
}

impl<R> Default for ClientMirror<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            counters: ResultCounters::default(),
        }
    }
}

impl<R: ListedRecord> ClientMirror<R> {
    /// Returns the mirrored rows in display order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        self.records.as_slice()
    }

    /// Overwrites the mirrored rows.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Returns the displayed counters.
    #[must_use]
    pub fn counters(&self) -> ResultCounters {
        self.counters
    }

    /// Overwrites the displayed counters.
    pub fn set_counters(&mut self, counters: ResultCounters) {
        self.counters = counters;
    }

    /// Returns whether the remote store holds more matching rows.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.counters.results > self.counters.showing
    }

    /// Returns whether a row with this id is mirrored.
    #[must_use]
    pub fn contains(&self, record_id: &RecordId) -> bool {
        self.position(record_id).is_some()
    }

    /// Applies a patch and returns whether any row changed.
    ///
    /// Patches aimed at a row that is not mirrored are silent no-ops.
    pub fn apply(&mut self, action: MirrorAction<R>) -> bool {
        match action {
            MirrorAction::Reset => {
                let changed = !self.records.is_empty();
                self.records.clear();
                self.counters = ResultCounters::default();
                changed
            }
            MirrorAction::Replace(page) => {
                self.records = page.records;
                self.sync_counters(page.total);
                true
            }
            MirrorAction::Append(page) => {
                let added = !page.records.is_empty();
                self.records.extend(page.records);
                self.sync_counters(page.total);
                added
            }
            MirrorAction::Prepend(record) => {
                self.records.insert(0, record);
                true
            }
            MirrorAction::Merge { id, changes } => match self.position(&id) {
                Some(index) => {
                    self.records[index].apply_changes(&changes);
                    true
                }
                None => false,
            },
            MirrorAction::Remove(id) => match self.position(&id) {
                Some(index) => {
                    self.records.remove(index);
                    true
                }
                None => false,
            },
            MirrorAction::SetStatus { id, status } => match self.position(&id) {
                Some(index) => {
                    self.records[index].set_status(status);
                    true
                }
                None => false,
            },
        }
    }

    /// Returns the mirror with a patch applied.
    #[must_use]
    pub fn reduce(mut self, action: MirrorAction<R>) -> Self {
        self.apply(action);
        self
    }

    fn position(&self, record_id: &RecordId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.record_id() == record_id)
    }

    fn sync_counters(&mut self, total: u64) {
        self.counters = ResultCounters {
            showing: self.records.len() as u64,
            results: total,
        };
    }
}
