//! Gemini API client for single-turn text generation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{instrument, warn};

use crate::config::GeminiConfig;
use crate::services::TextGenerator;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER: u64 = 60;

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| GeminiError::Unauthorized(format!("Invalid API key format: {e}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-goog-api-key", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint,
            }),
        })
    }

    /// The model this client calls.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send one prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an error,
    /// or the response carries no text.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model, prompt_len = prompt.len()))]
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::user_text(prompt);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        response.text().ok_or_else(|| {
            let reason = response.empty_reason();
            warn!(reason = %reason, "Gemini returned no text");
            GeminiError::EmptyResponse(reason)
        })
    }

    /// Handle a response, decoding the body on success.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER);
            return GeminiError::QuotaExceeded(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return GeminiError::Unauthorized(format!(
                "Gemini rejected the API key for model {} ({status})",
                self.inner.model
            ));
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => api_error.error.into_gemini_error(status.as_u16()),
                Err(_) => GeminiError::Api {
                    status: status.as_u16().to_string(),
                    message: body,
                },
            },
            Err(e) => GeminiError::Http(e),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        self.generate_content(prompt).await
    }
}
