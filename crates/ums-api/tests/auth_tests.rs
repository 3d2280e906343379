use axum::http::StatusCode;
use serde_json::{Value, json};
use ums_model::{LoginResponse, RegisterResponse};

use crate::common::TestClient;

#[tokio::test]
async fn test_login_success() {
    let client = TestClient::for_default_app();

    let body = json!({
        "email": "eve.holt@reqres.in",
        "password": "cityslicka"
    });

    let response = client.post_json("/api/login", &body).await;

    response.assert_status(StatusCode::OK);
    let login: LoginResponse = response.json();
    assert_eq!(login.token, "QpwL5tke4Pnpja7X4");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let client = TestClient::for_default_app();

    let body = json!({
        "email": "peter@klaven",
        "password": "cityslicka"
    });

    let response = client.post_json("/api/login", &body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "user not found");
}

#[tokio::test]
async fn test_login_missing_password() {
    let client = TestClient::for_default_app();

    let response = client
        .post_json("/api/login", &json!({ "email": "eve.holt@reqres.in" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "Missing email or username");
}

#[tokio::test]
async fn test_register_success() {
    let client = TestClient::for_default_app();

    let body = json!({
        "email": "eve.holt@reqres.in",
        "password": "pistol"
    });

    let response = client.post_json("/api/register", &body).await;

    response.assert_status(StatusCode::OK);
    let registered: RegisterResponse = response.json();
    assert_eq!(registered.id, 4);
    assert_eq!(registered.token, "QpwL5tke4Pnpja7X4");
}

#[tokio::test]
async fn test_register_unknown_user() {
    let client = TestClient::for_default_app();

    let body = json!({
        "email": "sydney@fife",
        "password": "pistol"
    });

    let response = client.post_json("/api/register", &body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(
        json["error"],
        "Note: Only defined \"eve.holt@reqres.in\" succeeds in this mock"
    );
}

#[tokio::test]
async fn test_register_missing_email() {
    let client = TestClient::for_default_app();

    let response = client
        .post_json("/api/register", &json!({ "password": "pistol" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "Missing email or username");
}

#[tokio::test]
async fn test_login_email_must_match_exactly() {
    let client = TestClient::for_default_app();

    for email in ["Eve.Holt@reqres.in", " eve.holt@reqres.in "] {
        let response = client
            .post_json("/api/login", &json!({ "email": email, "password": "cityslicka" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json["error"], "user not found");
    }
}
