//! GitHub REST API client
//!
//! A thin authenticated wrapper: every call is a single attempt, and any
//! status code of 300 or above is a failure.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::types::{AccessToken, Installation};

/// Public GitHub REST API
pub const GITHUB_API: &str = "https://api.github.com/";

const USER_AGENT_VALUE: &str = concat!("github-app-token/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client
///
/// Holds no credentials; the bearer token is passed per request since the
/// same client is used with different credentials.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    /// Create a client for api.github.com
    pub fn github() -> Self {
        Self::new(GITHUB_API)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Absolute URLs are used as-is, anything else is relative to the base URL
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            return path.to_string();
        }

        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make an authenticated request and decode the JSON response into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        bearer: &str,
    ) -> Result<T, ApiError> {
        let url = self.resolve_url(path);
        let response = self.execute(&method, &url, bearer).await?;

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Transport { method, url, source }),
        };

        serde_json::from_slice(&body).map_err(|source| {
            error!("Failed to parse body of {} {}: {}", method, url, source);
            ApiError::Decode { method, url, source }
        })
    }

    /// Make an authenticated request, ignoring the response body
    pub async fn send(&self, method: Method, path: &str, bearer: &str) -> Result<(), ApiError> {
        let url = self.resolve_url(path);
        self.execute(&method, &url, bearer).await?;
        Ok(())
    }

    /// List installations of the authenticated app
    ///
    /// Requires the app JWT, not an installation token.
    pub async fn list_installations(&self, app_jwt: &str) -> Result<Vec<Installation>, ApiError> {
        self.request(Method::GET, "app/installations", app_jwt).await
    }

    /// Exchange the app JWT for an installation access token
    pub async fn create_access_token(
        &self,
        installation: &Installation,
        app_jwt: &str,
    ) -> Result<AccessToken, ApiError> {
        self.request(Method::POST, &installation.access_tokens_url, app_jwt)
            .await
    }

    async fn execute(&self, method: &Method, url: &str, bearer: &str) -> Result<Response, ApiError> {
        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, format!("Bearer {}", bearer))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|source| {
                error!("Failed to execute {} {}: {}", method, url, source);
                ApiError::Transport {
                    method: method.clone(),
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_default();
            error!(
                status_code = status.as_u16(),
                "{} {} failed: {}", method, url, body
            );
            return Err(ApiError::Status {
                method: method.clone(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}
