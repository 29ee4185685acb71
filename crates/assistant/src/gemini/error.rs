//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the API (e.g. `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Quota exhausted or rate limited.
    #[error("quota exceeded, retry after {0} seconds")]
    QuotaExceeded(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no candidate text (e.g. a blocked prompt).
    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// API error response from Gemini.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric HTTP code.
    #[serde(default)]
    pub code: u16,
    /// Error message.
    pub message: String,
    /// Canonical status name.
    #[serde(default)]
    pub status: String,
}

impl ApiError {
    /// Convert to [`GeminiError::Api`].
    ///
    /// A missing status name falls back to the numeric `code`, then to
    /// `http_status` when the body carried no code either.
    #[must_use]
    pub fn into_gemini_error(self, http_status: u16) -> GeminiError {
        let status = if self.status.is_empty() {
            let code = if self.code == 0 { http_status } else { self.code };
            code.to_string()
        } else {
            self.status
        };
        GeminiError::Api {
            status,
            message: self.message,
        }
    }
}
