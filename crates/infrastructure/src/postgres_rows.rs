//! Conversions shared by the PostgreSQL adapters.

use std::str::FromStr;

use backoffice_core::{AppError, AppResult};
use backoffice_domain::{ListFilter, PageRequest, RecordId, RecordStatus};
use uuid::Uuid;

/// Returns the `ILIKE` pattern for the filter keyword, with wildcards escaped.
pub(crate) fn keyword_pattern(filter: &ListFilter) -> Option<String> {
    filter.keyword().map(|keyword| {
        let escaped = keyword
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

/// Returns the stored status value constrained by the filter.
pub(crate) fn status_value(filter: &ListFilter) -> Option<&'static str> {
    filter.status.map(|status| status.as_str())
}

/// Returns `(limit, offset)` binds for a page window.
pub(crate) fn page_bounds(page: PageRequest) -> AppResult<(i64, i64)> {
    let limit = i64::try_from(page.page_size.get())
        .map_err(|error| AppError::Validation(format!("invalid page size: {error}")))?;
    let offset = i64::try_from(page.offset)
        .map_err(|error| AppError::Validation(format!("invalid page offset: {error}")))?;
    Ok((limit, offset))
}

/// Converts a `COUNT(*)` result into a row total.
pub(crate) fn row_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

pub(crate) fn record_id(value: String) -> AppResult<RecordId> {
    RecordId::new(value)
        .map_err(|error| AppError::Internal(format!("stored row has invalid id: {error}")))
}

pub(crate) fn record_status(value: &str) -> AppResult<RecordStatus> {
    RecordStatus::from_str(value)
        .map_err(|error| AppError::Internal(format!("stored row has invalid status: {error}")))
}

/// Parses the key of a `UUID` keyed row. An id that is not a UUID names no row.
pub(crate) fn row_uuid(record_id: &RecordId) -> Option<Uuid> {
    Uuid::parse_str(record_id.as_str()).ok()
}

/// Parses the key of a row that a write targets, reporting malformed keys as missing rows.
pub(crate) fn target_uuid(table: &str, record_id: &RecordId) -> AppResult<Uuid> {
    row_uuid(record_id).ok_or_else(|| missing_row(table, record_id))
}

/// Parses a `UUID` foreign key carried by a write payload.
pub(crate) fn reference_uuid(field: &str, record_id: &RecordId) -> AppResult<Uuid> {
    row_uuid(record_id)
        .ok_or_else(|| AppError::Validation(format!("{field} '{record_id}' is not a valid id")))
}

/// Maps a missing row after a write into `NotFound`.
pub(crate) fn ensure_row_affected(rows_affected: u64, table: &str, record_id: &RecordId) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(missing_row(table, record_id));
    }

    Ok(())
}

fn missing_row(table: &str, record_id: &RecordId) -> AppError {
    AppError::NotFound(format!("{table} row '{record_id}' does not exist"))
}

#[cfg(test)]
mod tests {
    use backoffice_core::AppError;
    use backoffice_domain::{ListFilter, RecordId};

    use super::{keyword_pattern, reference_uuid, row_uuid, target_uuid};

    fn id(value: &str) -> RecordId {
        let Ok(id) = RecordId::new(value) else {
            panic!("valid record id");
        };
        id
    }

    #[test]
    fn malformed_row_keys_never_reach_the_database() {
        let stored = id("3f2b8a5e-0c1d-4e6f-9a7b-1c2d3e4f5a6b");
        assert!(row_uuid(&stored).is_some());
        assert!(target_uuid("employee", &stored).is_ok());

        let malformed = id("emp-1");
        assert_eq!(row_uuid(&malformed), None);
        assert!(matches!(
            target_uuid("employee", &malformed),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            reference_uuid("product_id", &malformed),
            Err(AppError::Validation(message)) if message.contains("product_id")
        ));
    }

    #[test]
    fn keyword_wildcards_are_escaped() {
        let filter = ListFilter {
            keyword: " 50%_off ".to_owned(),
            ..ListFilter::default()
        };
        assert_eq!(keyword_pattern(&filter).as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(keyword_pattern(&ListFilter::default()), None);
    }
}
