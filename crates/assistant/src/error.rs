//! Unified error handling for the assistant.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::gemini::GeminiError;
use crate::services::ComposeError;

/// Request-level error type for the query API.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Answer composition failed with a configured model.
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),
}

impl From<JsonRejection> for AssistantError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl AssistantError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Compose(ComposeError::Model(_)) => StatusCode::BAD_GATEWAY,
            Self::Compose(ComposeError::Template(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Compose(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Query request error"
            );
        }

        // Don't expose model or template details to clients
        let message = match &self {
            Self::BadRequest(_) => self.to_string(),
            Self::Compose(ComposeError::Model(GeminiError::EmptyResponse(_))) => {
                "AI model returned empty response".to_string()
            }
            Self::Compose(ComposeError::Model(_)) => {
                "Failed to get response from AI model".to_string()
            }
            Self::Compose(ComposeError::Template(_)) => "Internal server error".to_string(),
        };

        (self.status(), Json(ErrorResponse { error: message })).into_response()
    }
}

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Gemini client could not be built.
    #[error("Gemini client error: {0}")]
    Gemini(#[from] GeminiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::BadRequest("message must not be empty".to_string());
        assert_eq!(err.to_string(), "Bad request: message must not be empty");
    }

    #[test]
    fn test_assistant_error_status_codes() {
        assert_eq!(
            AssistantError::BadRequest("test".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AssistantError::from(ComposeError::Model(GeminiError::QuotaExceeded(60))).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_model_error_body_hides_details() {
        let err = AssistantError::from(ComposeError::Model(GeminiError::Unauthorized(
            "Gemini rejected the API key".to_string(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Failed to get response from AI model"})
        );
    }

    #[tokio::test]
    async fn test_empty_model_response_body() {
        let err = AssistantError::from(ComposeError::Model(GeminiError::EmptyResponse(
            "no candidates".to_string(),
        )));
        let response = err.into_response();
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "AI model returned empty response"})
        );
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let response = AssistantError::BadRequest("invalid input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Bad request: invalid input"})
        );
    }
}
