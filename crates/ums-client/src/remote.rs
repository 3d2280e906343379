//! Remote API access.
//!
//! The collection manager and the auth session only see the [`UsersRemote`]
//! and [`AuthRemote`] traits; [`HttpRemote`] implements both over `reqwest`.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use ums_model::{
    CreatedUser, Credentials, ErrorBody, LoginResponse, NewUser, RegisterResponse, UpdatedUser,
    UserId, UserPage, UserPatch,
};

use crate::{config::ClientConfig, error::RemoteError};

const API_KEY_HEADER: &str = "x-api-key";

/// User CRUD endpoints
pub trait UsersRemote: Send + Sync {
    /// `GET /users?page={page}`
    fn list_users(&self, page: u32) -> impl Future<Output = Result<UserPage, RemoteError>> + Send;

    /// `POST /users`
    fn create_user(
        &self,
        draft: &NewUser,
    ) -> impl Future<Output = Result<CreatedUser, RemoteError>> + Send;

    /// `PUT /users/{id}`
    fn update_user(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> impl Future<Output = Result<UpdatedUser, RemoteError>> + Send;

    /// `DELETE /users/{id}`
    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Login and registration endpoints
pub trait AuthRemote: Send + Sync {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, RemoteError>> + Send;

    fn register(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<RegisterResponse, RemoteError>> + Send;
}

/// JSON over HTTP client for the user API
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    bearer_token: Option<String>,
}

impl HttpRemote {
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("ums-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bearer_token: None,
        })
    }

    /// Send `Authorization: Bearer {token}` with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));

        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let response = builder.send().await?;
        check_status(response).await
    }
}

/// Turn a non-2xx response into [`RemoteError::Status`], preferring the
/// server's `{"error": ...}` message over the bare reason phrase.
async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .ok()
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    tracing::debug!(status = status.as_u16(), %message, "Remote request failed");

    Err(RemoteError::Status {
        status: status.as_u16(),
        message,
    })
}

impl UsersRemote for HttpRemote {
    async fn list_users(&self, page: u32) -> Result<UserPage, RemoteError> {
        let builder = self
            .request(Method::GET, "/users")
            .query(&[("page", page)]);
        Ok(self.send(builder).await?.json().await?)
    }

    async fn create_user(&self, draft: &NewUser) -> Result<CreatedUser, RemoteError> {
        let builder = self.request(Method::POST, "/users").json(draft);
        Ok(self.send(builder).await?.json().await?)
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<UpdatedUser, RemoteError> {
        let builder = self
            .request(Method::PUT, &format!("/users/{id}"))
            .json(patch);
        Ok(self.send(builder).await?.json().await?)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), RemoteError> {
        let builder = self.request(Method::DELETE, &format!("/users/{id}"));
        self.send(builder).await?;
        Ok(())
    }
}

impl AuthRemote for HttpRemote {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, RemoteError> {
        let builder = self.request(Method::POST, "/login").json(credentials);
        Ok(self.send(builder).await?.json().await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse, RemoteError> {
        let builder = self.request(Method::POST, "/register").json(credentials);
        Ok(self.send(builder).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let remote = HttpRemote::new(&ClientConfig::new("http://localhost:3000/api/")).unwrap();
        assert_eq!(remote.base_url(), "http://localhost:3000/api");
        assert_eq!(remote.url("/users"), "http://localhost:3000/api/users");
    }
}
