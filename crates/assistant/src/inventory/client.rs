//! HTTP client for the inventory-data service.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use sams_core::ToolInvocation;
use tracing::{debug, instrument, warn};

use crate::config::InventoryConfig;

use super::ToolDispatcher;
use super::error::ToolError;
use super::types::{CallResponse, ErrorBody, ToolCatalog};

const CLIENT_USER_AGENT: &str = concat!("sams-assistant/", env!("CARGO_PKG_VERSION"));

/// Inventory-data service client.
///
/// One pooled connection set is shared by every clone.
#[derive(Clone)]
pub struct InventoryClient {
    inner: Arc<InventoryClientInner>,
}

struct InventoryClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a new inventory client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &InventoryConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(InventoryClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// The service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetch the service's tool catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with an error
    /// status, or returns an undecodable body.
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    pub async fn list_tools(&self) -> Result<ToolCatalog, ToolError> {
        let url = format!("{}/tools", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::Unreachable(e.to_string()))?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ToolError::Malformed(format!("Failed to parse tool catalog: {e}")))
    }
}

#[async_trait]
impl ToolDispatcher for InventoryClient {
    #[instrument(skip(self, invocation), fields(tool = %invocation.name))]
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        let url = format!("{}/call/{}", self.inner.base_url, invocation.name);
        debug!(params = ?invocation.params, "Calling inventory tool");

        let response = self
            .inner
            .client
            .post(&url)
            .json(&invocation.params)
            .send()
            .await
            .map_err(|e| ToolError::Unreachable(e.to_string()))?;

        let body = read_success_body(response).await?;
        let envelope: CallResponse = serde_json::from_str(&body)
            .map_err(|e| ToolError::Malformed(format!("Failed to parse response: {e}")))?;

        debug!(result_len = envelope.result.len(), "Inventory tool returned");
        Ok(envelope.result)
    }
}

/// Read the body of a successful response, or turn an error status into
/// `ToolError::BadStatus`.
async fn read_success_body(response: reqwest::Response) -> Result<String, ToolError> {
    let status = response.status();
    let body = response.text().await;

    if !status.is_success() {
        let message = match body {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .map_or(body, |error| error.message()),
            Err(e) => e.to_string(),
        };
        warn!(status = status.as_u16(), message = %message, "Inventory service error");
        return Err(ToolError::BadStatus {
            status: status.as_u16(),
            message,
        });
    }

    body.map_err(|e| ToolError::Malformed(format!("Failed to read response body: {e}")))
}
