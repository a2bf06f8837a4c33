use async_trait::async_trait;
use backoffice_application::RecordRepository;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::{
    AccountChanges, AccountDraft, ListFilter, ListPage, ListedRecord, PageRequest, RecordId,
    RecordStatus, UserAccount,
};
use sqlx::{FromRow, PgPool};

use crate::postgres_rows::{
    ensure_row_affected, keyword_pattern, page_bounds, record_id, record_status, row_total,
    status_value,
};

/// PostgreSQL-backed user accounts.
#[derive(Clone)]
pub struct PostgresUserAccountRepository {
    pool: PgPool,
}

impl PostgresUserAccountRepository {
    /// Creates a new repository from a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserAccountRow {
    id: String,
    name: String,
    email: String,
    avatar_url: Option<String>,
    status: String,
}

impl TryFrom<UserAccountRow> for UserAccount {
    type Error = AppError;

    fn try_from(row: UserAccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(row.id)?,
            name: row.name,
            email: row.email,
            avatar_url: row.avatar_url,
            status: record_status(row.status.as_str())?,
        })
    }
}

const ACCOUNT_FILTER: &str = r#"
    WHERE ($1::TEXT IS NULL OR status = $1)
      AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2)
"#;

#[async_trait]
impl RecordRepository<UserAccount> for PostgresUserAccountRepository {
    async fn list(
        &self,
        filter: &ListFilter,
        page: PageRequest,
    ) -> AppResult<ListPage<UserAccount>> {
        let status = status_value(filter);
        let keyword = keyword_pattern(filter);
        let (limit, offset) = page_bounds(page)?;

        let rows = sqlx::query_as::<_, UserAccountRow>(&format!(
            r#"
            SELECT id, name, email, avatar_url, status
            FROM rdt_users
            {ACCOUNT_FILTER}
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(status)
        .bind(keyword.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list user accounts: {error}")))?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM rdt_users {ACCOUNT_FILTER}"
        ))
        .bind(status)
        .bind(keyword.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count user accounts: {error}")))?;

        Ok(ListPage {
            records: rows
                .into_iter()
                .map(UserAccount::try_from)
                .collect::<AppResult<Vec<_>>>()?,
            total: row_total(total),
        })
    }

    async fn find(&self, record_id: &RecordId) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserAccountRow>(
            r#"
            SELECT id, name, email, avatar_url, status
            FROM rdt_users
            WHERE id = $1
            "#,
        )
        .bind(record_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find user account '{record_id}': {error}"))
        })?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn create(&self, draft: AccountDraft) -> AppResult<UserAccount> {
        let inserted_id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO rdt_users (name, email)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(draft.name.as_str())
        .bind(draft.email.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert user account: {error}")))?;

        Ok(UserAccount::from_draft(record_id(inserted_id)?, draft))
    }

    async fn update(&self, record_id: &RecordId, changes: AccountChanges) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE rdt_users
            SET name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url)
            WHERE id = $1
            "#,
        )
        .bind(record_id.as_str())
        .bind(changes.name.as_deref())
        .bind(changes.avatar_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update user account '{record_id}': {error}"
            ))
        })?;

        ensure_row_affected(result.rows_affected(), "user account", record_id)
    }

    async fn set_status(&self, record_id: &RecordId, status: RecordStatus) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE rdt_users
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(record_id.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to set status of user account '{record_id}': {error}"
            ))
        })?;

        ensure_row_affected(result.rows_affected(), "user account", record_id)
    }
}
