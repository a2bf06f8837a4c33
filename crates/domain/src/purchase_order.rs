use serde::{Deserialize, Serialize};

use crate::listing::{ListedRecord, RecordId, RecordStatus};

/// Product offered in purchase order forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product row id.
    pub id: RecordId,
    /// Name or description.
    pub name: String,
    /// Lifecycle status.
    pub status: RecordStatus,
}

impl Product {
    /// Returns the denormalized reference stored alongside item rows.
    #[must_use]
    pub fn to_ref(&self) -> ProductRef {
        ProductRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Product reference attached to an item without re-fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Product row id.
    pub id: RecordId,
    /// Product name at the time of the lookup.
    pub name: String,
}

/// Line item of a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    /// Row id.
    pub id: RecordId,
    /// Owning purchase order.
    pub purchase_order_id: RecordId,
    /// Ordered product.
    pub product_id: RecordId,
    /// Ordered quantity.
    pub quantity: f64,
    /// Unit price.
    pub price: f64,
    /// Quantity times unit price, stored with the row.
    pub total: f64,
    /// Product resolved from the catalog.
    pub product: Option<ProductRef>,
}

/// Validated item payload for inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrderItemDraft {
    /// Owning purchase order.
    pub purchase_order_id: RecordId,
    /// Ordered product.
    pub product_id: RecordId,
    /// Ordered quantity.
    pub quantity: f64,
    /// Unit price.
    pub price: f64,
    /// Product resolved from the catalog, attached locally.
    pub product: Option<ProductRef>,
}

impl PurchaseOrderItemDraft {
    /// Line total written with the row.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Changed item fields for updates. Product, quantity and price are always
/// rewritten together so the stored total stays consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrderItemChanges {
    /// Ordered product.
    pub product_id: RecordId,
    /// Ordered quantity.
    pub quantity: f64,
    /// Unit price.
    pub price: f64,
    /// Product resolved from the catalog.
    pub product: Option<ProductRef>,
}

impl PurchaseOrderItemChanges {
    /// Line total written with the row.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.quantity * self.price
    }
}

impl ListedRecord for PurchaseOrderItem {
    type Draft = PurchaseOrderItemDraft;
    type Changes = PurchaseOrderItemChanges;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<RecordStatus> {
        None
    }

    fn set_status(&mut self, _status: RecordStatus) {}

    fn parent_id(&self) -> Option<&RecordId> {
        Some(&self.purchase_order_id)
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        self.product
            .as_ref()
            .is_some_and(|product| product.name.to_lowercase().contains(keyword))
    }

    fn apply_changes(&mut self, changes: &Self::Changes) {
        self.product_id = changes.product_id.clone();
        self.quantity = changes.quantity;
        self.price = changes.price;
        self.total = changes.total();
        self.product.clone_from(&changes.product);
    }

    fn from_draft(record_id: RecordId, draft: Self::Draft) -> Self {
        let total = draft.total();
        Self {
            id: record_id,
            purchase_order_id: draft.purchase_order_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            price: draft.price,
            total,
            product: draft.product,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::listing::{ListFilter, ListedRecord, RecordId};

    use super::{PurchaseOrderItem, PurchaseOrderItemDraft};

    fn id(value: &str) -> RecordId {
        let Ok(id) = RecordId::new(value) else {
            panic!("valid record id");
        };
        id
    }

    #[test]
    fn total_is_quantity_times_price() {
        let draft = PurchaseOrderItemDraft {
            purchase_order_id: id("po-1"),
            product_id: id("P1"),
            quantity: 2.0,
            price: 50.0,
            product: None,
        };

        let item = PurchaseOrderItem::from_draft(id("item-1"), draft);
        assert_eq!(item.total, 100.0);
    }

    #[test]
    fn children_filter_matches_owning_order_only() {
        let item = PurchaseOrderItem::from_draft(
            id("item-1"),
            PurchaseOrderItemDraft {
                purchase_order_id: id("po-1"),
                product_id: id("P1"),
                quantity: 1.0,
                price: 1.0,
                product: None,
            },
        );

        assert!(ListFilter::children_of(id("po-1")).matches(&item));
        assert!(!ListFilter::children_of(id("po-2")).matches(&item));
    }
}
