use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, header};
use backoffice_application::{AccountForm, AvatarUpload};
use backoffice_core::{AppResult, UserIdentity};
use backoffice_domain::{Capability, RecordId};

use crate::dto::{
    AvatarResponse, AvatarUploadQuery, ListQuery, SavedResponse, StatusChangeRequest,
    UpdateAccountProfileRequest, UserAccountPageResponse, UserAccountResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_AVATAR_CONTENT_TYPE: &str = "application/octet-stream";

async fn require_self_or_account_manager(
    state: &AppState,
    user: &UserIdentity,
    account_id: &RecordId,
) -> AppResult<()> {
    if user.subject() == account_id.as_str() {
        return Ok(());
    }

    state
        .access_service
        .require(user, Capability::EmployeeAccounts)
        .await
}

pub async fn list_accounts_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<UserAccountPageResponse>> {
    state
        .access_service
        .require(&user, Capability::EmployeeAccounts)
        .await?;

    let (filter, page) = query.into_filter_and_page()?;
    let accounts = state.account_service.list(&filter, page).await?;

    Ok(Json(UserAccountPageResponse::from(accounts)))
}

pub async fn get_account_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<UserAccountResponse>> {
    let account_id = RecordId::new(account_id)?;
    require_self_or_account_manager(&state, &user, &account_id).await?;

    let account = state.account_service.find(&account_id).await?;
    Ok(Json(UserAccountResponse::from(account)))
}

pub async fn update_account_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(account_id): Path<String>,
    Json(payload): Json<UpdateAccountProfileRequest>,
) -> ApiResult<Json<SavedResponse>> {
    let account_id = RecordId::new(account_id)?;
    require_self_or_account_manager(&state, &user, &account_id).await?;

    let name = AccountForm::from(payload).validate()?;
    let receipt = state
        .account_service
        .update_profile(&user, &account_id, name)
        .await?;

    Ok(Json(SavedResponse::new(receipt.audit)))
}

pub async fn set_account_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(account_id): Path<String>,
    Json(payload): Json<StatusChangeRequest>,
) -> ApiResult<Json<SavedResponse>> {
    state
        .access_service
        .require(&user, Capability::EmployeeAccounts)
        .await?;

    let account_id = RecordId::new(account_id)?;
    let receipt = state
        .account_service
        .set_status(&user, &account_id, payload.status()?)
        .await?;

    Ok(Json(SavedResponse::new(receipt.audit)))
}

pub async fn replace_avatar_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(account_id): Path<String>,
    Query(query): Query<AvatarUploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<AvatarResponse>> {
    let account_id = RecordId::new(account_id)?;
    require_self_or_account_manager(&state, &user, &account_id).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_AVATAR_CONTENT_TYPE)
        .to_owned();
    let receipt = state
        .account_service
        .replace_avatar(
            &user,
            &account_id,
            AvatarUpload {
                file_name: query.file_name,
                content_type,
                bytes: body.to_vec(),
            },
        )
        .await?;

    Ok(Json(AvatarResponse {
        avatar_url: receipt.value,
    }))
}
