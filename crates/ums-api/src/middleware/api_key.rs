use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{ApiState, error::ApiError};

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests without the configured API key.
///
/// A state without a key lets everything through.
pub async fn require_api_key(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    match req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(provided) if provided == expected => Ok(next.run(req).await),
        Some(_) => Err(ApiError::Unauthorized("Invalid API key".to_string())),
        None => Err(ApiError::Unauthorized("Missing API key".to_string())),
    }
}
