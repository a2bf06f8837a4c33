use async_trait::async_trait;
use backoffice_application::SystemSettingsRepository;
use backoffice_core::{AppError, AppResult, OrgId};
use backoffice_domain::{AccessAssignment, SystemAccessSettings};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use crate::postgres_rows::{record_id, target_uuid};

const SYSTEM_ACCESS_TYPE: &str = "system_access";

/// PostgreSQL-backed `system_access` settings rows with JSONB assignments.
#[derive(Clone)]
pub struct PostgresSystemSettingsRepository {
    pool: PgPool,
}

impl PostgresSystemSettingsRepository {
    /// Creates a new repository from a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SettingsRow {
    id: String,
    data: String,
}

impl TryFrom<SettingsRow> for SystemAccessSettings {
    type Error = AppError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        let entries: Vec<Value> = serde_json::from_str(row.data.as_str()).map_err(|error| {
            AppError::Internal(format!("stored system access data is invalid: {error}"))
        })?;
        let settings = Self::from_stored(Some(record_id(row.id)?), entries);
        if !settings.retained.is_empty() {
            warn!(
                retained = settings.retained.len(),
                "system access data has entries for unknown capabilities"
            );
        }

        Ok(settings)
    }
}

fn encode_settings(settings: &SystemAccessSettings) -> AppResult<String> {
    serde_json::to_string(&settings.to_stored()?).map_err(|error| {
        AppError::Internal(format!("failed to encode system access data: {error}"))
    })
}

#[async_trait]
impl SystemSettingsRepository for PostgresSystemSettingsRepository {
    async fn find_system_access(&self, org_id: OrgId) -> AppResult<Option<SystemAccessSettings>> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT id::text AS id, data::text AS data
            FROM rdt_system_settings
            WHERE org_id = $1 AND type = $2
            LIMIT 1
            "#,
        )
        .bind(org_id.as_uuid())
        .bind(SYSTEM_ACCESS_TYPE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load system access settings for organization '{org_id}': {error}"
            ))
        })?;

        row.map(SystemAccessSettings::try_from).transpose()
    }

    async fn insert_system_access(
        &self,
        org_id: OrgId,
        assignments: Vec<AccessAssignment>,
    ) -> AppResult<SystemAccessSettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO rdt_system_settings (org_id, type, data)
            VALUES ($1, $2, $3::jsonb)
            RETURNING id::text AS id, data::text AS data
            "#,
        )
        .bind(org_id.as_uuid())
        .bind(SYSTEM_ACCESS_TYPE)
        .bind(encode_settings(&SystemAccessSettings::new(None, assignments))?)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to insert system access settings for organization '{org_id}': {error}"
            ))
        })?;

        SystemAccessSettings::try_from(row)
    }

    async fn upsert_system_access(
        &self,
        org_id: OrgId,
        settings: SystemAccessSettings,
    ) -> AppResult<SystemAccessSettings> {
        let Some(settings_id) = settings.id.as_ref() else {
            return Err(AppError::Validation(
                "settings upsert requires a stored row id".to_owned(),
            ));
        };

        let settings_uuid = target_uuid("system settings", settings_id)?;

        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO rdt_system_settings (id, org_id, type, data)
            VALUES ($1, $2, $3, $4::jsonb)
            ON CONFLICT (id) DO UPDATE
            SET data = EXCLUDED.data,
                updated_at = now()
            RETURNING id::text AS id, data::text AS data
            "#,
        )
        .bind(settings_uuid)
        .bind(org_id.as_uuid())
        .bind(SYSTEM_ACCESS_TYPE)
        .bind(encode_settings(&settings)?)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save system access settings '{settings_id}': {error}"
            ))
        })?;

        SystemAccessSettings::try_from(row)
    }
}
