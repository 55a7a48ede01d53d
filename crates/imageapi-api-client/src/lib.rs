//! HTTP client for the image API.
//!
//! Provides a minimal client with optional auth (Bearer token or X-API-Key),
//! generic GET/POST/DELETE helpers that turn non-2xx answers into
//! [`ApiError::Http`], and the domain methods used by the smoke test
//! (upload, download, metrics, delete).

pub mod api;
pub mod error;
pub mod image_info;

use std::time::Duration;

use bytes::Bytes;
use imageapi_core::config::normalize_base_url;
use imageapi_core::{AuthConfig, SmokeConfig};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

pub use api::DownloadedImage;
pub use error::{ApiError, ApiResult};
pub use imageapi_core::{ImageInfo, MetricsSnapshot, UploadResult, Variant};

/// Authentication strategy for the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

impl Auth {
    /// Bearer token wins when both are configured.
    pub fn from_config(config: &AuthConfig) -> Option<Self> {
        config
            .bearer_token
            .clone()
            .map(Auth::Bearer)
            .or_else(|| config.api_key.clone().map(Auth::XApiKey))
    }
}

/// HTTP client for the image API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<Auth>,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: Option<Auth>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            auth,
        })
    }

    pub fn from_config(config: &SmokeConfig) -> ApiResult<Self> {
        Self::new(
            &config.base_url,
            Auth::from_config(&config.auth),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(Auth::Bearer(token)) => {
                request.header("Authorization", format!("Bearer {}", token))
            }
            Some(Auth::XApiKey(key)) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    /// Send with auth applied; any non-2xx status becomes [`ApiError::Http`].
    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(%status, body = %body, "API request failed");
            return Err(ApiError::Http { status, body });
        }

        Ok(response)
    }

    async fn json_body<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET");
        let response = self.execute(self.client.get(&url)).await?;
        Self::json_body(response).await
    }

    /// GET request. Returns the raw body and its Content-Type header.
    pub async fn get_bytes(&self, path: &str) -> ApiResult<(Bytes, Option<String>)> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET");
        let response = self.execute(self.client.get(&url)).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok((body, content_type))
    }

    /// GET request. Returns the body as text.
    pub async fn get_text(&self, path: &str) -> ApiResult<String> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET");
        let response = self.execute(self.client.get(&url)).await?;
        Ok(response.text().await?)
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "POST multipart");
        let response = self.execute(self.client.post(&url).multipart(form)).await?;
        Self::json_body(response).await
    }

    /// DELETE request and deserialize response.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "DELETE");
        let response = self.execute(self.client.delete(&url)).await?;
        Self::json_body(response).await
    }
}
