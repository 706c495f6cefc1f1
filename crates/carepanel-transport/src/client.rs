//! Transport trait and its reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

use carepanel_core::config::ApiConfig;
use carepanel_core::error::AppError;
use carepanel_core::result::AppResult;

use crate::error::TransportError;
use crate::response::TransportResponse;

/// Executes one request against the data API per call.
///
/// Implementations attach the base URL and credentials themselves; callers
/// pass only a path relative to the API root.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send a request and return the raw response.
    ///
    /// Non-2xx statuses are returned as responses, not errors; use
    /// [`TransportResponse::into_success`] to interpret them.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError>;
}

/// HTTP client bound to one data API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    ///
    /// The API key is installed as a default header flagged sensitive so it
    /// never shows up in reqwest's debug output.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let header_name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|e| {
            AppError::configuration(format!(
                "Invalid API key header '{}': {e}",
                config.api_key_header
            ))
        })?;
        let mut header_value = HeaderValue::from_str(&config.api_key)
            .map_err(|e| AppError::configuration(format!("Invalid API key value: {e}")))?;
        header_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header_name, header_value);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.url(path);
        debug!(%method, %url, "Sending request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(TransportError::from_reqwest)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(TransportError::from_reqwest)?;

        debug!(%method, %url, status, "Received response");
        Ok(TransportResponse::new(
            status,
            TransportResponse::decode_body(&text),
        ))
    }
}
