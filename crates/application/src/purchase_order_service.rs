use std::sync::Arc;

use backoffice_core::{AppError, AppResult, UserIdentity};
use backoffice_domain::{
    AuditEntry, AuditKind, ListFilter, ListPage, PageRequest, Product, ProductRef,
    PurchaseOrderItem, PurchaseOrderItemChanges, PurchaseOrderItemDraft, RecordId,
};
use tracing::info;

use crate::{AuditTrail, MutationReceipt, ProductCatalog, RecordRepository};

/// Mutation handlers and list reads for purchase order line items.
#[derive(Clone)]
pub struct PurchaseOrderItemService {
    items: Arc<dyn RecordRepository<PurchaseOrderItem>>,
    catalog: Arc<dyn ProductCatalog>,
    audit: AuditTrail,
}

impl PurchaseOrderItemService {
    /// Creates a new purchase order item service.
    #[must_use]
    pub fn new(
        items: Arc<dyn RecordRepository<PurchaseOrderItem>>,
        catalog: Arc<dyn ProductCatalog>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            items,
            catalog,
            audit,
        }
    }

    /// Returns the repository list fetches go through.
    #[must_use]
    pub fn records(&self) -> &dyn RecordRepository<PurchaseOrderItem> {
        self.items.as_ref()
    }

    /// Reads one page of items of a purchase order.
    pub async fn list(
        &self,
        filter: &ListFilter,
        page: PageRequest,
    ) -> AppResult<ListPage<PurchaseOrderItem>> {
        self.items.list(filter, page).await
    }

    /// Lists the products offered in the item form.
    pub async fn active_products(&self) -> AppResult<Vec<Product>> {
        self.catalog.list_active_products().await
    }

    /// Inserts an item, then audits against the owning purchase order.
    pub async fn create(
        &self,
        actor: &UserIdentity,
        draft: PurchaseOrderItemDraft,
    ) -> AppResult<MutationReceipt<PurchaseOrderItem>> {
        let purchase_order_id = draft.purchase_order_id.clone();
        let product_name = product_name(draft.product.as_ref());

        let item = self.items.create(draft).await?;
        info!(item_id = %item.id, %purchase_order_id, "purchase order item created");

        let entry = AuditEntry::new(
            purchase_order_id,
            AuditKind::PurchaseOrder,
            format!("Added product \"{product_name}\""),
            actor.subject(),
        );
        self.audit.seal(item, entry).await
    }

    /// Rewrites product, quantity, price and total of an item.
    ///
    /// An item that does not belong to `purchase_order_id` is reported as
    /// missing and left untouched.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        purchase_order_id: &RecordId,
        item_id: &RecordId,
        changes: PurchaseOrderItemChanges,
    ) -> AppResult<MutationReceipt<PurchaseOrderItemChanges>> {
        let belongs_to_order = self
            .items
            .find(item_id)
            .await?
            .is_some_and(|item| &item.purchase_order_id == purchase_order_id);
        if !belongs_to_order {
            return Err(AppError::NotFound(format!(
                "item '{item_id}' does not exist on purchase order '{purchase_order_id}'"
            )));
        }

        let product_name = product_name(changes.product.as_ref());
        self.items.update(item_id, changes.clone()).await?;

        let entry = AuditEntry::new(
            purchase_order_id.clone(),
            AuditKind::PurchaseOrder,
            format!("Updated product \"{product_name}\""),
            actor.subject(),
        );
        self.audit.seal(changes, entry).await
    }
}

/// Resolves a product id against an already loaded catalog.
#[must_use]
pub(crate) fn find_product<'a>(
    products: &'a [Product],
    product_id: &RecordId,
) -> Option<&'a Product> {
    products.iter().find(|product| &product.id == product_id)
}

fn product_name(product: Option<&ProductRef>) -> String {
    product.map(|product| product.name.clone()).unwrap_or_default()
}
