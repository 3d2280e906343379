use axum::http::StatusCode;
use serde_json::{Value, json};
use ums_api::router;
use ums_model::{CreatedUser, UserEnvelope, UserPage};

use crate::common::{TEST_API_KEY, TestClient, TestStateBuilder};

#[tokio::test]
async fn test_health() {
    let client = TestClient::for_default_app();

    let response = client.get("/health").await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/nothing-here").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("not found"));
}

#[tokio::test]
async fn test_list_users_defaults_to_first_page() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/users").await;

    response.assert_status(StatusCode::OK);
    let page: UserPage = response.json();
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 6);
    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data.len(), 6);
    assert_eq!(page.data[0].email, "george.bluth@reqres.in");
}

#[tokio::test]
async fn test_list_users_second_page() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/users?page=2").await;

    response.assert_status(StatusCode::OK);
    let page: UserPage = response.json();
    assert_eq!(page.page, 2);
    let ids: Vec<u64> = page.data.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![7, 8, 9, 10, 11, 12]);
}

#[tokio::test]
async fn test_list_users_past_last_page_is_empty() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/users?page=9").await;

    response.assert_status(StatusCode::OK);
    let page: UserPage = response.json();
    assert_eq!(page.page, 9);
    assert_eq!(page.total_pages, 2);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_list_users_rejects_non_numeric_page() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/users?page=abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/users/2").await;

    response.assert_status(StatusCode::OK);
    let envelope: UserEnvelope = response.json();
    assert_eq!(envelope.data.first_name, "Janet");
    assert_eq!(envelope.data.avatar, "https://reqres.in/img/faces/2-image.jpg");
}

#[tokio::test]
async fn test_get_unknown_user() {
    let client = TestClient::for_default_app();

    let response = client.get("/api/users/23").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_create_user_echoes_body_with_id() {
    let client = TestClient::for_default_app();

    let body = json!({
        "first_name": "Morpheus",
        "last_name": "Leader",
        "email": "morpheus@zion.io"
    });

    let response = client.post_json("/api/users", &body).await;

    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    assert_eq!(json["first_name"], "Morpheus");
    assert_eq!(json["email"], "morpheus@zion.io");
    assert!(json["id"].as_u64().unwrap() < 1000);
    assert!(json["createdAt"].is_string());

    let created: CreatedUser = response.json();
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn test_create_user_body_id_wins() {
    let client = TestClient::for_default_app();

    let response = client
        .post_json("/api/users", &json!({ "id": "5005", "email": "a@b.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: CreatedUser = response.json();
    assert_eq!(created.numeric_id(), Some(5005));
}

#[tokio::test]
async fn test_create_user_rejects_non_object_body() {
    let client = TestClient::for_default_app();

    let response = client.post_json("/api/users", &json!([1, 2, 3])).await;

    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_update_user_echoes_body() {
    let client = TestClient::for_default_app();

    let body = json!({ "first_name": "X" });
    let response = client.put_json("/api/users/2", &body).await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["first_name"], "X");
    assert!(json["updatedAt"].is_string());
}

#[tokio::test]
async fn test_update_accepts_unseeded_id() {
    let client = TestClient::for_default_app();

    let response = client
        .put_json("/api/users/4242424", &json!({ "email": "x@y.com" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_update_rejects_non_numeric_id() {
    let client = TestClient::for_default_app();

    let response = client.put_json("/api/users/abc", &json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_returns_no_content() {
    let client = TestClient::for_default_app();

    let response = client.delete("/api/users/2").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let state = TestStateBuilder::new().with_api_key(TEST_API_KEY).build();
    let client = TestClient::new(router::router(state));

    let response = client.get("/api/users").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json: Value = response.json();
    assert_eq!(json["error"], "Missing API key");
}

#[tokio::test]
async fn test_wrong_api_key_rejected() {
    let state = TestStateBuilder::new().with_api_key(TEST_API_KEY).build();
    let client = TestClient::new(router::router(state)).with_api_key("nope");

    let response = client.delete("/api/users/1").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json: Value = response.json();
    assert_eq!(json["error"], "Invalid API key");
}

#[tokio::test]
async fn test_matching_api_key_accepted() {
    let state = TestStateBuilder::new().with_api_key(TEST_API_KEY).build();
    let client = TestClient::new(router::router(state)).with_api_key(TEST_API_KEY);

    let response = client.get("/api/users?page=1").await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_health_skips_api_key() {
    let state = TestStateBuilder::new().with_api_key(TEST_API_KEY).build();
    let client = TestClient::new(router::router(state));

    let response = client.get("/health").await;

    response.assert_status(StatusCode::OK);
}
