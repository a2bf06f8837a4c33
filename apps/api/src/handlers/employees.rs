use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use backoffice_core::{AppError, UserIdentity};
use backoffice_domain::{Capability, RecordId};

use crate::dto::{
    EmployeePageResponse, EmployeeRequest, EmployeeResponse, ListQuery, SavedResponse,
    StatusChangeRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_employees_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<EmployeePageResponse>> {
    state
        .access_service
        .require(&user, Capability::HumanResource)
        .await?;

    let (filter, page) = query.into_filter_and_page()?;
    let employees = state.employee_service.list(&filter, page).await?;

    Ok(Json(EmployeePageResponse::from(employees)))
}

pub async fn create_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<EmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    state
        .access_service
        .require(&user, Capability::HumanResource)
        .await?;

    let draft = payload.into_form()?.validate()?;
    let receipt = state.employee_service.create(&user, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse::from(receipt.value)),
    ))
}

pub async fn update_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<EmployeeRequest>,
) -> ApiResult<Json<SavedResponse>> {
    state
        .access_service
        .require(&user, Capability::HumanResource)
        .await?;

    let employee_id = RecordId::new(employee_id)?;
    let current = state
        .employee_service
        .find(&employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("employee '{employee_id}' does not exist")))?;
    let changes = payload.into_form()?.changes_from(&current)?;
    let receipt = state
        .employee_service
        .update(&user, &employee_id, changes)
        .await?;

    Ok(Json(SavedResponse::new(receipt.audit)))
}

pub async fn set_employee_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<StatusChangeRequest>,
) -> ApiResult<Json<SavedResponse>> {
    state
        .access_service
        .require(&user, Capability::HumanResource)
        .await?;

    let employee_id = RecordId::new(employee_id)?;
    let receipt = state
        .employee_service
        .set_status(&user, &employee_id, payload.status()?)
        .await?;

    Ok(Json(SavedResponse::new(receipt.audit)))
}
