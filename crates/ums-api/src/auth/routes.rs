use axum::{Json, Router, routing::post};
use ums_model::{Credentials, LoginResponse, RegisterResponse};

use super::{service, validation::require_credentials};
use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

async fn login(Json(credentials): Json<Credentials>) -> Result<Json<LoginResponse>, ApiError> {
    require_credentials(&credentials)?;

    let response = service::login(&credentials)?;
    tracing::info!(email = %credentials.email, "Login succeeded");

    Ok(Json(response))
}

async fn register(
    Json(credentials): Json<Credentials>,
) -> Result<Json<RegisterResponse>, ApiError> {
    require_credentials(&credentials)?;

    let response = service::register(&credentials)?;
    tracing::info!(email = %credentials.email, id = response.id, "Registration succeeded");

    Ok(Json(response))
}
