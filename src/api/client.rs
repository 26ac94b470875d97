//! HTTP client for the WhenWorks session endpoints
//!
//! The session cookie rides on the browser transport; the client itself is
//! stateless. Exactly one remote call per invocation, no retries.

use std::sync::OnceLock;

use async_trait::async_trait;
use dioxus::prelude::use_context;
use serde::de::DeserializeOwned;

use super::error::{normalize, ApiError};
use crate::types::{Credentials, User, UserEnvelope};

static API_BASE: OnceLock<String> = OnceLock::new();

/// Initialize the API base path. Call this once at startup.
pub fn init_api_base(url: String) {
    API_BASE.set(url).ok();
}

/// Get the configured API base path
pub fn api_base() -> &'static str {
    API_BASE.get().map(|s| s.as_str()).unwrap_or("/api")
}

/// Create a client bound to the configured base path
pub fn default_client() -> ApiClient {
    ApiClient::new(api_base())
}

/// Hook to access the client provided by the root component
pub fn use_api_client() -> ApiClient {
    use_context()
}

/// Where the current session subject comes from.
///
/// Injectable so the session cache can be exercised without a server.
#[async_trait(?Send)]
pub trait CurrentUserSource {
    async fn fetch_current_user(&self) -> Result<Option<User>, ApiError>;
}

/// Client for the WhenWorks API
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// `GET /v1/me`.
    ///
    /// An `UNAUTHORIZED` failure means "no active session" and maps to
    /// `Ok(None)`; every other failure propagates to the caller.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, ApiError> {
        let request = self.client.get(self.url("/v1/me"));
        match self.execute::<UserEnvelope>(request).await {
            Ok(envelope) => Ok(Some(envelope.user)),
            Err(err) if err.is_unauthorized() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// `POST /v1/auth/login`.
    ///
    /// Failures propagate uninterpreted; the caller decides how to present
    /// them.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let request = self.client.post(self.url("/v1/auth/login")).json(credentials);
        let envelope: UserEnvelope = self.execute(request).await?;
        Ok(envelope.user)
    }

    /// `POST /v1/auth/logout`. The success response carries no body.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.send(self.client.post(self.url("/v1/auth/logout"))).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        if response.status().is_success() {
            response.json::<T>().await.map_err(|err| {
                tracing::warn!(error = %err, "malformed success body");
                ApiError::unknown()
            })
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        request.send().await.map_err(|err| {
            tracing::warn!(error = %err, "transport failure");
            ApiError::unknown()
        })
    }

    async fn error_from(response: reqwest::Response) -> ApiError {
        match response.json::<serde_json::Value>().await {
            Ok(body) => normalize(body),
            Err(_) => ApiError::unknown(),
        }
    }
}

#[async_trait(?Send)]
impl CurrentUserSource for ApiClient {
    async fn fetch_current_user(&self) -> Result<Option<User>, ApiError> {
        ApiClient::fetch_current_user(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_body() -> serde_json::Value {
        json!({
            "user": {
                "id": "7d793037-a076-4d6d-ad8d-5ed49d3bb1b3",
                "username": "alice",
                "email": "alice@example.com",
                "name": "Alice Doe",
                "is_admin": false,
                "created_at": "2024-01-01T00:00:00Z"
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_current_user_present() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_body().to_string())
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let user = client.fetch_current_user().await.unwrap();

        let user = user.expect("session should be present");
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.is_admin);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_current_user_unauthorized_is_absence() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/me")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "code": "UNAUTHORIZED",
                    "message": "you are not authorized to access this resource",
                    "details": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        assert_eq!(client.fetch_current_user().await, Ok(None));
    }

    #[tokio::test]
    async fn test_fetch_current_user_other_errors_propagate() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/me")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "code": "INTERNAL_SERVER_ERROR",
                    "message": "the server encountered a problem",
                    "details": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client.fetch_current_user().await.unwrap_err();
        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn test_unstructured_failure_becomes_unknown_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/me")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client.fetch_current_user().await.unwrap_err();
        assert_eq!(err, ApiError::unknown());
    }

    #[tokio::test]
    async fn test_login_success_returns_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/auth/login")
            .match_body(mockito::Matcher::Json(json!({
                "username": "alice",
                "password": "secret"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_body().to_string())
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };

        let user = client.login(&credentials).await.unwrap();
        assert_eq!(user.name, "Alice Doe");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_failure_passes_server_error_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/auth/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "code": "INVALID_CREDENTIALS",
                    "message": "invalid username or password",
                    "details": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        };

        let err = client.login(&credentials).await.unwrap_err();
        assert_eq!(err.code, "INVALID_CREDENTIALS");
        assert_eq!(err.message, "invalid username or password");
    }

    #[tokio::test]
    async fn test_logout_accepts_empty_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/auth/logout")
            .with_status(204)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        assert_eq!(client.logout().await, Ok(()));
    }
}
