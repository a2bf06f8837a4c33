use axum::Json;
use axum::extract::{Extension, State};
use backoffice_core::UserIdentity;
use backoffice_domain::Capability;

use crate::dto::AccessResponse;
use crate::state::AppState;

pub async fn my_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Json<AccessResponse> {
    let gate = state.access_service.load_gate().await;
    let capabilities = Capability::all()
        .iter()
        .filter(|capability| gate.has_access(&user, **capability))
        .map(|capability| capability.as_str().to_owned())
        .collect();

    Json(AccessResponse {
        is_administrator: gate.is_administrator(&user),
        capabilities,
    })
}
