use async_trait::async_trait;
use backoffice_application::AuditRepository;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::AuditEntry;
use sqlx::PgPool;

/// PostgreSQL-backed audit log, stored as system remarks on the referenced row.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a new repository from a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_entry(&self, entry: AuditEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rdt_remarks (reference_id, kind, reply_type, message, sender_id)
            VALUES ($1, $2, 'system', $3, $4)
            "#,
        )
        .bind(entry.reference_id.as_str())
        .bind(entry.kind.as_str())
        .bind(entry.message.as_str())
        .bind(entry.sender_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit entry: {error}")))?;

        Ok(())
    }
}
