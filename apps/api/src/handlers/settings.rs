use axum::Json;
use axum::extract::{Extension, State};
use backoffice_core::UserIdentity;
use backoffice_domain::Capability;
use tracing::info;

use crate::dto::{SaveSystemAccessRequest, SystemAccessResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_system_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<SystemAccessResponse>> {
    state
        .access_service
        .require(&user, Capability::Settings)
        .await?;

    let settings = state.settings_service.load().await?;
    Ok(Json(SystemAccessResponse::from(settings)))
}

pub async fn save_system_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SaveSystemAccessRequest>,
) -> ApiResult<Json<SystemAccessResponse>> {
    state
        .access_service
        .require(&user, Capability::Settings)
        .await?;

    let receipt = state
        .settings_service
        .save(&user, payload.into_settings()?)
        .await?;
    info!(subject = user.subject(), audit = ?receipt.audit, "system access settings saved");

    Ok(Json(SystemAccessResponse::from(receipt.value)))
}
