//! Inventory-data service access.
//!
//! The service exposes a fixed set of read-only tools (`search_assets`,
//! `get_asset_summary`, ...) over HTTP:
//!
//! - `POST {base}/call/{tool}` with a JSON object of parameters, answering
//!   `{"result": "<text>"}`
//! - `GET {base}/tools` listing the tool catalog
//!
//! Each query makes exactly one tool call. There are no retries and no
//! timeout beyond the transport default.

mod client;
mod error;
mod types;

use async_trait::async_trait;
use sams_core::ToolInvocation;

pub use client::InventoryClient;
pub use error::ToolError;
pub use types::{CallResponse, ToolCatalog, ToolDescriptor};

/// Executes tool invocations against an inventory backend.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Run one tool and return its text result.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the call fails; callers treat this as data,
    /// not as a reason to abort.
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<String, ToolError>;
}
