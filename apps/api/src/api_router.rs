mod cors;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, put};
use backoffice_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

const AVATAR_BODY_LIMIT_BYTES: usize = 5 * 1024 * 1024;

pub fn build_router(app_state: AppState) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(&app_state.frontend_url)?;

    let protected_routes = Router::new()
        .route("/api/access", get(handlers::access::my_access_handler))
        .route(
            "/api/employees",
            get(handlers::employees::list_employees_handler)
                .post(handlers::employees::create_employee_handler),
        )
        .route(
            "/api/employees/{employee_id}",
            patch(handlers::employees::update_employee_handler),
        )
        .route(
            "/api/employees/{employee_id}/status",
            put(handlers::employees::set_employee_status_handler),
        )
        .route(
            "/api/products",
            get(handlers::purchase_orders::list_products_handler),
        )
        .route(
            "/api/purchase-orders/{purchase_order_id}/items",
            get(handlers::purchase_orders::list_items_handler)
                .post(handlers::purchase_orders::create_item_handler),
        )
        .route(
            "/api/purchase-orders/{purchase_order_id}/items/{item_id}",
            put(handlers::purchase_orders::update_item_handler),
        )
        .route(
            "/api/accounts",
            get(handlers::accounts::list_accounts_handler),
        )
        .route(
            "/api/accounts/{account_id}",
            get(handlers::accounts::get_account_handler),
        )
        .route(
            "/api/accounts/{account_id}/profile",
            put(handlers::accounts::update_account_profile_handler),
        )
        .route(
            "/api/accounts/{account_id}/status",
            put(handlers::accounts::set_account_status_handler),
        )
        .route(
            "/api/accounts/{account_id}/avatar",
            put(handlers::accounts::replace_avatar_handler)
                .layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT_BYTES)),
        )
        .route(
            "/api/settings/system-access",
            get(handlers::settings::get_system_access_handler)
                .put(handlers::settings::save_system_access_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_identity,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
