use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use ums_model::{UserEnvelope, UserId, UserPage};

use crate::{ApiState, error::ApiError};

/// Create the user routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<u32>,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// List one page of users
async fn list_users(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Json<UserPage> {
    let page = query.page.unwrap_or(1).max(1);
    tracing::debug!(page, "Listing users");

    Json(state.directory.page(page))
}

/// Get user by ID
async fn get_user_by_id(
    State(state): State<ApiState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserEnvelope>, ApiError> {
    state
        .directory
        .find(id)
        .map(|user| Json(UserEnvelope { data: user.clone() }))
        .ok_or_else(|| ApiError::NotFound(format!("User {id} not found")))
}

/// Pretend to create a user: echo the body with a fresh id and timestamp.
///
/// Nothing is stored; fields in the body win over the generated ones.
async fn create_user(Json(payload): Json<Map<String, Value>>) -> impl IntoResponse {
    let id: u32 = rand::thread_rng().gen_range(0..1000);

    let mut body = Map::new();
    body.insert("id".to_string(), json!(id));
    body.insert("createdAt".to_string(), json!(timestamp()));
    body.extend(payload);

    tracing::info!(id = %body["id"], "User created (not persisted)");

    (StatusCode::CREATED, Json(Value::Object(body)))
}

/// Pretend to update a user: echo the body with `updatedAt`.
///
/// Ids outside the seed data are accepted so locally created users stay editable.
async fn update_user(
    Path(id): Path<UserId>,
    Json(payload): Json<Map<String, Value>>,
) -> Json<Value> {
    let mut body = Map::new();
    body.insert("updatedAt".to_string(), json!(timestamp()));
    body.extend(payload);

    tracing::info!(id, "User updated (not persisted)");

    Json(Value::Object(body))
}

/// Pretend to delete a user
async fn delete_user(Path(id): Path<UserId>) -> StatusCode {
    tracing::info!(id, "User deleted (not persisted)");
    StatusCode::NO_CONTENT
}
