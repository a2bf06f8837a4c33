use async_trait::async_trait;
use backoffice_application::RecordRepository;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::{
    DepartmentRef, Employee, EmployeeChanges, EmployeeDraft, ListFilter, ListPage, ListedRecord,
    PageRequest, RecordId, RecordStatus, UserRef,
};
use sqlx::{FromRow, PgPool};

use crate::postgres_rows::{
    ensure_row_affected, keyword_pattern, page_bounds, record_id, record_status, reference_uuid,
    row_total, row_uuid, status_value, target_uuid,
};

/// PostgreSQL-backed employee table with department and creator joins.
#[derive(Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// Creates a new repository from a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: String,
    firstname: String,
    middlename: String,
    lastname: String,
    position: String,
    rate: f64,
    status: String,
    department_id: Option<String>,
    department_name: Option<String>,
    added_by_id: Option<String>,
    added_by_name: Option<String>,
    added_by_avatar_url: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = AppError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let department = match (row.department_id, row.department_name) {
            (Some(id), Some(name)) => Some(DepartmentRef {
                id: record_id(id)?,
                name,
            }),
            _ => None,
        };
        let added_by = row.added_by_id.map(|id| UserRef {
            id,
            name: row.added_by_name.unwrap_or_default(),
            avatar_url: row.added_by_avatar_url,
        });

        Ok(Self {
            id: record_id(row.id)?,
            firstname: row.firstname,
            middlename: row.middlename,
            lastname: row.lastname,
            position: row.position,
            rate: row.rate,
            department,
            status: record_status(row.status.as_str())?,
            added_by,
        })
    }
}

const EMPLOYEE_COLUMNS: &str = r#"
    e.id::text AS id,
    e.firstname,
    e.middlename,
    e.lastname,
    e.position,
    e.rate,
    e.status,
    d.id::text AS department_id,
    d.name AS department_name,
    u.id AS added_by_id,
    u.name AS added_by_name,
    u.avatar_url AS added_by_avatar_url
"#;

const EMPLOYEE_JOINS: &str = r#"
    FROM rdt_employees e
    LEFT JOIN rdt_departments d ON d.id = e.department_id
    LEFT JOIN rdt_users u ON u.id = e.added_by
"#;

const EMPLOYEE_FILTER: &str = r#"
    WHERE ($1::TEXT IS NULL OR e.status = $1)
      AND (
        $2::TEXT IS NULL
        OR e.firstname ILIKE $2
        OR e.middlename ILIKE $2
        OR e.lastname ILIKE $2
      )
"#;

#[async_trait]
impl RecordRepository<Employee> for PostgresEmployeeRepository {
    async fn list(&self, filter: &ListFilter, page: PageRequest) -> AppResult<ListPage<Employee>> {
        let status = status_value(filter);
        let keyword = keyword_pattern(filter);
        let (limit, offset) = page_bounds(page)?;

        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} {EMPLOYEE_JOINS} {EMPLOYEE_FILTER} LIMIT $3 OFFSET $4"
        ))
        .bind(status)
        .bind(keyword.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list employees: {error}")))?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM rdt_employees e {EMPLOYEE_FILTER}"
        ))
        .bind(status)
        .bind(keyword.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count employees: {error}")))?;

        Ok(ListPage {
            records: rows
                .into_iter()
                .map(Employee::try_from)
                .collect::<AppResult<Vec<_>>>()?,
            total: row_total(total),
        })
    }

    async fn find(&self, record_id: &RecordId) -> AppResult<Option<Employee>> {
        let Some(employee_id) = row_uuid(record_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} {EMPLOYEE_JOINS} WHERE e.id = $1"
        ))
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find employee '{record_id}': {error}"))
        })?;

        row.map(Employee::try_from).transpose()
    }

    async fn create(&self, draft: EmployeeDraft) -> AppResult<Employee> {
        let department_id = draft
            .department
            .as_ref()
            .map(|department| reference_uuid("department_id", &department.id))
            .transpose()?;

        let inserted_id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO rdt_employees (
                firstname,
                middlename,
                lastname,
                position,
                rate,
                department_id,
                added_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id::text
            "#,
        )
        .bind(draft.firstname.as_str())
        .bind(draft.middlename.as_str())
        .bind(draft.lastname.as_str())
        .bind(draft.position.as_str())
        .bind(draft.rate)
        .bind(department_id)
        .bind(draft.added_by.as_ref().map(|user| user.id.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert employee: {error}")))?;

        Ok(Employee::from_draft(record_id(inserted_id)?, draft))
    }

    async fn update(&self, record_id: &RecordId, changes: EmployeeChanges) -> AppResult<()> {
        let employee_id = target_uuid("employee", record_id)?;
        let department_id = match &changes.department {
            Some(Some(department)) => Some(reference_uuid("department_id", &department.id)?),
            _ => None,
        };

        let result = sqlx::query(
            r#"
            UPDATE rdt_employees
            SET firstname = COALESCE($2, firstname),
                middlename = COALESCE($3, middlename),
                lastname = COALESCE($4, lastname),
                position = COALESCE($5, position),
                rate = COALESCE($6, rate),
                department_id = CASE WHEN $8 THEN $7 ELSE department_id END
            WHERE id = $1
            "#,
        )
        .bind(employee_id)
        .bind(changes.firstname.as_deref())
        .bind(changes.middlename.as_deref())
        .bind(changes.lastname.as_deref())
        .bind(changes.position.as_deref())
        .bind(changes.rate)
        .bind(department_id)
        .bind(changes.department.is_some())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update employee '{record_id}': {error}"))
        })?;

        ensure_row_affected(result.rows_affected(), "employee", record_id)
    }

    async fn set_status(&self, record_id: &RecordId, status: RecordStatus) -> AppResult<()> {
        let employee_id = target_uuid("employee", record_id)?;

        let result = sqlx::query(
            r#"
            UPDATE rdt_employees
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(employee_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to set status of employee '{record_id}': {error}"
            ))
        })?;

        ensure_row_affected(result.rows_affected(), "employee", record_id)
    }
}
