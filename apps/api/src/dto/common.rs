use std::str::FromStr;

use backoffice_application::{AuditOutcome, Toast};
use backoffice_core::{AppError, AppResult};
use backoffice_domain::{ListFilter, PageRequest, PageSize, RecordId, RecordStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query string of list endpoints.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/list-query.ts"
)]
pub struct ListQuery {
    pub keyword: Option<String>,
    /// `Active` (default), `Inactive` or `all`.
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    /// Builds the filter and page window of a top-level list.
    pub fn into_filter_and_page(self) -> AppResult<(ListFilter, PageRequest)> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => Some(RecordStatus::Active),
            Some("all") => None,
            Some(value) => Some(RecordStatus::from_str(value)?),
        };
        let page = self.page()?;

        Ok((
            ListFilter {
                keyword: self.keyword.unwrap_or_default(),
                status,
                parent_id: None,
            },
            page,
        ))
    }

    /// Builds the filter and page window of a child list.
    pub fn into_children_filter_and_page(
        self,
        parent_id: RecordId,
    ) -> AppResult<(ListFilter, PageRequest)> {
        let page = self.page()?;

        Ok((
            ListFilter {
                keyword: self.keyword.unwrap_or_default(),
                status: None,
                parent_id: Some(parent_id),
            },
            page,
        ))
    }

    fn page(&self) -> AppResult<PageRequest> {
        let page_size = self
            .limit
            .map(PageSize::new)
            .transpose()?
            .unwrap_or_default();
        let offset = usize::try_from(self.offset.unwrap_or_default())
            .map_err(|error| AppError::Validation(format!("invalid offset: {error}")))?;

        Ok(PageRequest { page_size, offset })
    }
}

/// Confirmation returned by mutations that have no row to return.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/saved-response.ts"
)]
pub struct SavedResponse {
    pub message: String,
    /// Whether the audit entry was stored; `false` when it was dropped.
    pub audit_recorded: bool,
}

impl SavedResponse {
    pub fn new(audit: AuditOutcome) -> Self {
        Self {
            message: Toast::saved().message,
            audit_recorded: audit == AuditOutcome::Recorded,
        }
    }
}

/// Incoming status toggle.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/status-change-request.ts"
)]
pub struct StatusChangeRequest {
    pub status: String,
}

impl StatusChangeRequest {
    pub fn status(&self) -> AppResult<RecordStatus> {
        RecordStatus::from_str(self.status.as_str())
    }
}

/// Capabilities the signed-in user may use.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-response.ts"
)]
pub struct AccessResponse {
    pub is_administrator: bool,
    pub capabilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use backoffice_application::AuditOutcome;
    use backoffice_core::AppError;
    use backoffice_domain::{PageSize, RecordStatus};

    use super::{ListQuery, SavedResponse};

    fn query(raw: &str) -> ListQuery {
        let Ok(query) = serde_json::from_str::<ListQuery>(raw) else {
            panic!("query should deserialize");
        };
        query
    }

    #[test]
    fn missing_status_lists_active_rows() {
        let Ok((filter, page)) = query(r#"{"keyword":"maria"}"#).into_filter_and_page() else {
            panic!("query should convert");
        };

        assert_eq!(filter.status, Some(RecordStatus::Active));
        assert_eq!(filter.keyword(), Some("maria"));
        assert_eq!(page.page_size, PageSize::default());
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn all_status_disables_status_filter() {
        let Ok((filter, page)) =
            query(r#"{"status":"all","limit":5,"offset":10}"#).into_filter_and_page()
        else {
            panic!("query should convert");
        };

        assert_eq!(filter.status, None);
        assert_eq!(page.page_size.get(), 5);
        assert_eq!(page.offset, 10);
    }

    #[test]
    fn zero_limit_and_unknown_status_are_rejected() {
        assert!(matches!(
            query(r#"{"limit":0}"#).into_filter_and_page(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            query(r#"{"status":"Archived"}"#).into_filter_and_page(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn saved_response_reports_dropped_audit() {
        let Ok(value) = serde_json::to_value(SavedResponse::new(AuditOutcome::Dropped)) else {
            panic!("response should serialize");
        };

        assert_eq!(value["message"], "Successfully saved.");
        assert_eq!(value["audit_recorded"], false);
    }
}
