use async_trait::async_trait;
use backoffice_application::RecordRepository;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::{
    ListFilter, ListPage, ListedRecord, PageRequest, ProductRef, PurchaseOrderItem,
    PurchaseOrderItemChanges, PurchaseOrderItemDraft, RecordId, RecordStatus,
};
use sqlx::{FromRow, PgPool};

use crate::postgres_rows::{
    ensure_row_affected, keyword_pattern, page_bounds, record_id, reference_uuid, row_total,
    row_uuid, target_uuid,
};

/// PostgreSQL-backed purchase order line items joined with their product.
#[derive(Clone)]
pub struct PostgresPurchaseOrderItemRepository {
    pool: PgPool,
}

impl PostgresPurchaseOrderItemRepository {
    /// Creates a new repository from a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PurchaseOrderItemRow {
    id: String,
    po_id: String,
    product_id: String,
    quantity: f64,
    price: f64,
    total: f64,
    product_name: Option<String>,
}

impl TryFrom<PurchaseOrderItemRow> for PurchaseOrderItem {
    type Error = AppError;

    fn try_from(row: PurchaseOrderItemRow) -> Result<Self, Self::Error> {
        let product_id = record_id(row.product_id)?;
        let product = row.product_name.map(|name| ProductRef {
            id: product_id.clone(),
            name,
        });

        Ok(Self {
            id: record_id(row.id)?,
            purchase_order_id: record_id(row.po_id)?,
            product_id,
            quantity: row.quantity,
            price: row.price,
            total: row.total,
            product,
        })
    }
}

const ITEM_SELECT: &str = r#"
    SELECT
        i.id::text AS id,
        i.po_id::text AS po_id,
        i.product_id::text AS product_id,
        i.quantity,
        i.price,
        i.total,
        p.name AS product_name
    FROM rdt_purchase_order_items i
    LEFT JOIN rdt_products p ON p.id = i.product_id
"#;

const ITEM_FILTER: &str = r#"
    WHERE ($1::uuid IS NULL OR i.po_id = $1)
      AND ($2::TEXT IS NULL OR p.name ILIKE $2)
"#;

#[async_trait]
impl RecordRepository<PurchaseOrderItem> for PostgresPurchaseOrderItemRepository {
    async fn list(
        &self,
        filter: &ListFilter,
        page: PageRequest,
    ) -> AppResult<ListPage<PurchaseOrderItem>> {
        let purchase_order_id = match filter.parent_id.as_ref() {
            Some(parent_id) => match row_uuid(parent_id) {
                Some(purchase_order_id) => Some(purchase_order_id),
                None => {
                    return Ok(ListPage {
                        records: Vec::new(),
                        total: 0,
                    });
                }
            },
            None => None,
        };
        let keyword = keyword_pattern(filter);
        let (limit, offset) = page_bounds(page)?;

        let rows = sqlx::query_as::<_, PurchaseOrderItemRow>(&format!(
            "{ITEM_SELECT} {ITEM_FILTER} LIMIT $3 OFFSET $4"
        ))
        .bind(purchase_order_id)
        .bind(keyword.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list purchase order items: {error}"))
        })?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM rdt_purchase_order_items i
            LEFT JOIN rdt_products p ON p.id = i.product_id
            {ITEM_FILTER}
            "#
        ))
        .bind(purchase_order_id)
        .bind(keyword.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to count purchase order items: {error}"))
        })?;

        Ok(ListPage {
            records: rows
                .into_iter()
                .map(PurchaseOrderItem::try_from)
                .collect::<AppResult<Vec<_>>>()?,
            total: row_total(total),
        })
    }

    async fn find(&self, record_id: &RecordId) -> AppResult<Option<PurchaseOrderItem>> {
        let Some(item_id) = row_uuid(record_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PurchaseOrderItemRow>(&format!(
            "{ITEM_SELECT} WHERE i.id = $1"
        ))
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find purchase order item '{record_id}': {error}"
            ))
        })?;

        row.map(PurchaseOrderItem::try_from).transpose()
    }

    async fn create(&self, draft: PurchaseOrderItemDraft) -> AppResult<PurchaseOrderItem> {
        let purchase_order_id = reference_uuid("purchase_order_id", &draft.purchase_order_id)?;
        let product_id = reference_uuid("product_id", &draft.product_id)?;

        let inserted_id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO rdt_purchase_order_items (po_id, product_id, quantity, price, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id::text
            "#,
        )
        .bind(purchase_order_id)
        .bind(product_id)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(draft.total())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to insert purchase order item: {error}"))
        })?;

        Ok(PurchaseOrderItem::from_draft(record_id(inserted_id)?, draft))
    }

    async fn update(
        &self,
        record_id: &RecordId,
        changes: PurchaseOrderItemChanges,
    ) -> AppResult<()> {
        let item_id = target_uuid("purchase order item", record_id)?;
        let product_id = reference_uuid("product_id", &changes.product_id)?;

        let result = sqlx::query(
            r#"
            UPDATE rdt_purchase_order_items
            SET product_id = $2,
                quantity = $3,
                price = $4,
                total = $5
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .bind(product_id)
        .bind(changes.quantity)
        .bind(changes.price)
        .bind(changes.total())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update purchase order item '{record_id}': {error}"
            ))
        })?;

        ensure_row_affected(result.rows_affected(), "purchase order item", record_id)
    }

    async fn set_status(&self, record_id: &RecordId, _status: RecordStatus) -> AppResult<()> {
        Err(AppError::Validation(format!(
            "purchase order item '{record_id}' has no status"
        )))
    }
}
