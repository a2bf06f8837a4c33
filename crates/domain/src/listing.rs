//! Listing primitives shared by every mirrored table.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use backoffice_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Page size used by list pages until the user picks another one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Stable identifier of a remote row.
///
/// Remote tables mix numeric and UUID keys, so identifiers are carried as
/// their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a validated record identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "record id must not be empty".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Lifecycle status of a listed record. Records are never hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Record is live and shown by default.
    Active,
    /// Record was deactivated.
    Inactive,
}

impl RecordStatus {
    /// Returns the stored value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Returns the status a toggle moves to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl FromStr for RecordStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            _ => Err(AppError::Validation(format!(
                "unknown record status '{value}'"
            ))),
        }
    }
}

/// Row shape that can be listed, filtered and patched in a client mirror.
pub trait ListedRecord: Clone + Send + Sync + 'static {
    /// Validated payload used to insert a new row.
    type Draft: Clone + Send + Sync + 'static;
    /// Partial payload used to update an existing row.
    type Changes: Clone + Send + Sync + 'static;

    /// Returns the stable row identifier.
    fn record_id(&self) -> &RecordId;

    /// Returns the lifecycle status, when the table carries one.
    fn status(&self) -> Option<RecordStatus>;

    /// Overwrites the lifecycle status; a no-op for tables without one.
    fn set_status(&mut self, status: RecordStatus);

    /// Returns the owning row for child tables.
    fn parent_id(&self) -> Option<&RecordId> {
        None
    }

    /// Returns whether a lower-cased keyword matches the descriptive fields.
    fn matches_keyword(&self, keyword: &str) -> bool;

    /// Merges changed fields into this row.
    fn apply_changes(&mut self, changes: &Self::Changes);

    /// Builds a row from an inserted draft.
    fn from_draft(record_id: RecordId, draft: Self::Draft) -> Self;
}

/// Filter criteria accepted by list reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Free-text keyword; empty means no keyword constraint.
    pub keyword: String,
    /// Status constraint; `None` lists every status.
    pub status: Option<RecordStatus>,
    /// Owning row for child tables such as purchase order items.
    pub parent_id: Option<RecordId>,
}

impl ListFilter {
    /// Filter showing active rows only, the default view of list pages.
    #[must_use]
    pub fn active() -> Self {
        Self {
            status: Some(RecordStatus::Active),
            ..Self::default()
        }
    }

    /// Filter scoped to the children of one parent row.
    #[must_use]
    pub fn children_of(parent_id: RecordId) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::default()
        }
    }

    /// Returns the trimmed keyword, or `None` when there is no keyword.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        let keyword = self.keyword.trim();
        (!keyword.is_empty()).then_some(keyword)
    }

    /// Returns whether a row with the given status stays visible.
    #[must_use]
    pub fn admits_status(&self, status: RecordStatus) -> bool {
        self.status.is_none_or(|expected| expected == status)
    }

    /// Returns whether a row satisfies every criterion.
    #[must_use]
    pub fn matches<R: ListedRecord>(&self, record: &R) -> bool {
        if let Some(parent_id) = &self.parent_id
            && record.parent_id() != Some(parent_id)
        {
            return false;
        }

        if let Some(status) = record.status()
            && !self.admits_status(status)
        {
            return false;
        }

        self.keyword()
            .is_none_or(|keyword| record.matches_keyword(keyword.to_lowercase().as_str()))
    }
}

/// Positive number of rows requested per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// Creates a validated page size.
    pub fn new(value: u32) -> AppResult<Self> {
        if value == 0 {
            return Err(AppError::Validation(
                "page size must be positive".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the page size as a row count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// Limit/offset window of one list read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum rows returned.
    pub page_size: PageSize,
    /// Rows skipped before the page starts.
    pub offset: usize,
}

impl PageRequest {
    /// First page for the given size.
    #[must_use]
    pub fn first(page_size: PageSize) -> Self {
        Self {
            page_size,
            offset: 0,
        }
    }
}

/// One page of rows plus the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    /// Rows in remote order, at most one page long.
    pub records: Vec<R>,
    /// Rows matching the filter, independent of the page size.
    pub total: u64,
}

impl<R> ListPage<R> {
    /// Page without rows.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }
}
