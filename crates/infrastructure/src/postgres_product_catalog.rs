use async_trait::async_trait;
use backoffice_application::ProductCatalog;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::Product;
use sqlx::{FromRow, PgPool};

use crate::postgres_rows::{record_id, record_status};

/// PostgreSQL-backed product lookup.
#[derive(Clone)]
pub struct PostgresProductCatalog {
    pool: PgPool,
}

impl PostgresProductCatalog {
    /// Creates a new catalog from a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    status: String,
}

#[async_trait]
impl ProductCatalog for PostgresProductCatalog {
    async fn list_active_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id::text AS id, name, status
            FROM rdt_products
            WHERE status = 'Active'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list active products: {error}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(Product {
                    id: record_id(row.id)?,
                    name: row.name,
                    status: record_status(row.status.as_str())?,
                })
            })
            .collect()
    }
}
