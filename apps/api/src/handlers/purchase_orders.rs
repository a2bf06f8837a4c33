use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use backoffice_application::PurchaseOrderItemForm;
use backoffice_core::UserIdentity;
use backoffice_domain::{Capability, RecordId};

use crate::dto::{
    ListQuery, ProductResponse, PurchaseOrderItemPageResponse, PurchaseOrderItemRequest,
    PurchaseOrderItemResponse, SavedResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_products_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<ProductResponse>>> {
    state
        .access_service
        .require(&user, Capability::PurchaseOrders)
        .await?;

    let products = state
        .purchase_order_item_service
        .active_products()
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Ok(Json(products))
}

pub async fn list_items_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(purchase_order_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<PurchaseOrderItemPageResponse>> {
    state
        .access_service
        .require(&user, Capability::PurchaseOrders)
        .await?;

    let (filter, page) = query.into_children_filter_and_page(RecordId::new(purchase_order_id)?)?;
    let items = state.purchase_order_item_service.list(&filter, page).await?;

    Ok(Json(PurchaseOrderItemPageResponse::from(items)))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(purchase_order_id): Path<String>,
    Json(payload): Json<PurchaseOrderItemRequest>,
) -> ApiResult<(StatusCode, Json<PurchaseOrderItemResponse>)> {
    state
        .access_service
        .require(&user, Capability::PurchaseOrders)
        .await?;

    let purchase_order_id = RecordId::new(purchase_order_id)?;
    let products = state.purchase_order_item_service.active_products().await?;
    let item = PurchaseOrderItemForm::from(payload).validate(&products)?;
    let receipt = state
        .purchase_order_item_service
        .create(&user, item.into_draft(purchase_order_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseOrderItemResponse::from(receipt.value)),
    ))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((purchase_order_id, item_id)): Path<(String, String)>,
    Json(payload): Json<PurchaseOrderItemRequest>,
) -> ApiResult<Json<SavedResponse>> {
    state
        .access_service
        .require(&user, Capability::PurchaseOrders)
        .await?;

    let purchase_order_id = RecordId::new(purchase_order_id)?;
    let item_id = RecordId::new(item_id)?;
    let products = state.purchase_order_item_service.active_products().await?;
    let item = PurchaseOrderItemForm::from(payload).validate(&products)?;
    let receipt = state
        .purchase_order_item_service
        .update(&user, &purchase_order_id, &item_id, item.into_changes())
        .await?;

    Ok(Json(SavedResponse::new(receipt.audit)))
}
