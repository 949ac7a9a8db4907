//! Async client for the auth API endpoints.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;

use super::{ApiError, AuthResponse, HealthResponse, LoginRequest, RegisterRequest, UserResponse};

// Paths are joined onto the base URL, so they stay relative.
const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";
const ME_PATH: &str = "auth/me";
const HEALTH_PATH: &str = "health";

/// HTTP client bound to one API base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// A trailing slash is normalized away so that endpoint joining
    /// behaves the same for "http://host" and "http://host/".
    pub fn new(base_url: &str) -> Result<Self> {
        let mut normalized = base_url.trim().trim_end_matches('/').to_string();
        normalized.push('/');

        let parsed = Url::parse(&normalized)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
        })
    }

    /// Creates a client from configuration, honoring the env override.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.effective_api_base_url())
    }

    /// The base URL this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// POST auth/login with email and password.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        tracing::debug!(email = %request.email, "sending login request");
        self.post_json(LOGIN_PATH, request).await
    }

    /// POST auth/register with the new account details.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ApiError> {
        tracing::debug!(email = %request.email, "sending register request");
        self.post_json(REGISTER_PATH, request).await
    }

    /// GET auth/me for the profile behind an access token.
    pub async fn me(&self, access_token: &str) -> Result<UserResponse, ApiError> {
        self.get_json(ME_PATH, Some(access_token)).await
    }

    /// GET health to check the API is reachable.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json(HEALTH_PATH, None).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::network(format!("Invalid endpoint {path}: {err}")))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::network(err.to_string()))?;

        Self::read_json(response).await
    }

    async fn get_json<T>(&self, path: &str, bearer: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut request = self.http.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::network(err.to_string()))?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::decode(err.to_string()))
    }
}
