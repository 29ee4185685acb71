//! The natural-language query endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AssistantError;
use crate::state::AppState;

/// Request body for `POST /api/v1/ai/query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub message: String,
}

/// Response body for `POST /api/v1/ai/query`.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

/// Answer one asset question.
///
/// # Errors
///
/// Returns 400 for a malformed body or blank message, and 5xx when a
/// configured model fails. Inventory failures still produce an answer.
#[instrument(skip(state, payload))]
pub async fn query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AssistantError> {
    let Json(request) = payload?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(AssistantError::BadRequest(
            "message must not be empty".to_string(),
        ));
    }

    let result = state.service().answer(message).await?;

    Ok(Json(QueryResponse {
        response: result.answer.text,
    }))
}
