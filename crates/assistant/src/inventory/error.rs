//! Error types for the inventory-data service client.

use thiserror::Error;

/// Errors from a single tool call.
///
/// These never abort a query: the pipeline turns them into text for the
/// composer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The request could not be sent or no response arrived.
    #[error("inventory service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("inventory service returned {status}: {message}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body, or the raw body.
        message: String,
    },

    /// The response body was not the expected envelope.
    #[error("malformed inventory response: {0}")]
    Malformed(String),
}
