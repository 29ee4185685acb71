//! CLI command implementations.
//!
//! Each command returns the text to print so it can be tested without
//! capturing stdout.

pub mod ask;
pub mod classify;
pub mod taxonomy;
pub mod tools;

use sams_assistant::config::ConfigError;
use sams_assistant::error::StartupError;
use sams_assistant::intent::TaxonomyError;
use sams_assistant::inventory::ToolError;
use sams_assistant::services::ComposeError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The pipeline could not be built.
    #[error("{0}")]
    Startup(#[from] StartupError),

    /// Taxonomy could not be loaded or is invalid.
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// The inventory service call failed.
    #[error("Inventory error: {0}")]
    Inventory(#[from] ToolError),

    /// Answer composition failed.
    #[error("Answer error: {0}")]
    Compose(#[from] ComposeError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
