use backoffice_application::PurchaseOrderItemForm;
use backoffice_domain::{ListPage, Product, PurchaseOrderItem};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Product offered in the item form.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/product-response.ts"
)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.as_str().to_owned(),
            name: value.name,
        }
    }
}

/// API representation of a purchase order line item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/purchase-order-item-response.ts"
)]
pub struct PurchaseOrderItemResponse {
    pub id: String,
    pub purchase_order_id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
}

impl From<PurchaseOrderItem> for PurchaseOrderItemResponse {
    fn from(value: PurchaseOrderItem) -> Self {
        Self {
            id: value.id.as_str().to_owned(),
            purchase_order_id: value.purchase_order_id.as_str().to_owned(),
            product_id: value.product_id.as_str().to_owned(),
            product_name: value.product.map(|product| product.name),
            quantity: value.quantity,
            price: value.price,
            total: value.total,
        }
    }
}

/// One page of line items.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/purchase-order-item-page-response.ts"
)]
pub struct PurchaseOrderItemPageResponse {
    pub records: Vec<PurchaseOrderItemResponse>,
    pub total: u64,
}

impl From<ListPage<PurchaseOrderItem>> for PurchaseOrderItemPageResponse {
    fn from(value: ListPage<PurchaseOrderItem>) -> Self {
        Self {
            records: value
                .records
                .into_iter()
                .map(PurchaseOrderItemResponse::from)
                .collect(),
            total: value.total,
        }
    }
}

/// Item form as typed by the user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/purchase-order-item-request.ts"
)]
pub struct PurchaseOrderItemRequest {
    pub product_id: String,
    pub quantity: String,
    pub price: String,
}

impl From<PurchaseOrderItemRequest> for PurchaseOrderItemForm {
    fn from(value: PurchaseOrderItemRequest) -> Self {
        Self {
            product_id: value.product_id,
            quantity: value.quantity,
            price: value.price,
        }
    }
}
