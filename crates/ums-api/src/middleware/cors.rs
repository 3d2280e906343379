use axum::http::{HeaderName, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::api_key::API_KEY_HEADER;

/// Creates a CORS layer for the browser front-end.
///
/// An empty origin list means "any origin", which is what a local mock needs.
/// Otherwise only the listed origins are allowed, with the methods and
/// headers the user management client sends.
pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    let origins = allowed_origins
        .into_iter()
        .filter_map(|s| s.parse::<axum::http::HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
        ])
}
