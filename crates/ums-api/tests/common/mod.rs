use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde::Deserialize;
use tower::ServiceExt;
use ums_api::{ApiConfig, ApiState, router};

/// API key used by tests that enable the key check
pub const TEST_API_KEY: &str = "reqres-free-v1";

/// Test state builder for creating an `ApiState`
pub struct TestStateBuilder {
    config: ApiConfig,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Require `x-api-key` on every `/api` request
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.api_key = Some(key.to_string());
        self
    }

    pub fn build(self) -> ApiState {
        ApiState::new(&self.config)
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
    api_key: Option<String>,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            api_key: None,
        }
    }

    /// Client for the default (keyless) application
    pub fn for_default_app() -> Self {
        Self::new(router::router(TestStateBuilder::new().build()))
    }

    /// Send `x-api-key` with every request
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    fn builder(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.api_key {
            Some(key) => builder.header("x-api-key", key),
            None => builder,
        }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = self
            .builder("GET", uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a DELETE request
    pub async fn delete(&self, uri: &str) -> TestResponse {
        let request = self
            .builder("DELETE", uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("POST", uri, body).await
    }

    /// Send a PUT request with JSON body
    pub async fn put_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("PUT", uri, body).await
    }

    async fn send_json<T: serde::Serialize>(
        &self,
        method: &str,
        uri: &str,
        body: &T,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = self
            .builder(method, uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}
