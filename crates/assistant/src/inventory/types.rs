//! Wire types for the inventory-data service.

use serde::{Deserialize, Serialize};

/// Envelope returned by `POST /call/{tool}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    pub result: String,
}

/// Error body returned by the service on non-success statuses.
///
/// `detail` is a string for handled errors and a list of objects for request
/// validation failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable form of `detail`.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Catalog returned by `GET /tools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    pub tools: Vec<ToolDescriptor>,
}

/// One tool in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON Schema of the tool's parameters.
    #[serde(default)]
    pub parameters: serde_json::Value,
}
