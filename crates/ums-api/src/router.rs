use axum::{Router, http::StatusCode, middleware, response::IntoResponse, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    ApiConfig, auth,
    middleware::{api_key::require_api_key, cors::create_cors_layer, request_id::request_id_middleware},
    state::ApiState,
    user,
};

/// Build the application router.
///
/// API routes live under `/api` behind the API key check; `/health` is open.
pub fn router(state: ApiState) -> Router {
    let api = Router::new()
        .merge(user::routes())
        .merge(auth::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(handler_404)
        .with_state(state)
}

/// The served application: [`router`] wrapped in request ids, HTTP tracing
/// and CORS.
pub fn app(config: &ApiConfig) -> Router {
    router(ApiState::new(config))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(config.allowed_origins.clone()))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
