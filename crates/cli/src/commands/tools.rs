//! Inventory tool catalog.

use sams_assistant::config::AssistantConfig;
use sams_assistant::error::StartupError;
use sams_assistant::inventory::{InventoryClient, ToolCatalog};

use super::CommandError;

/// Fetch and render the inventory service's tool catalog.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the service call fails.
pub async fn list() -> Result<String, CommandError> {
    let config = AssistantConfig::from_env()?;
    let client = InventoryClient::new(&config.inventory).map_err(StartupError::from)?;

    tracing::info!(base_url = %client.base_url(), "Listing inventory tools");
    let catalog = client.list_tools().await?;
    Ok(render(&catalog))
}

/// One line per tool: name, then description.
#[must_use]
pub fn render(catalog: &ToolCatalog) -> String {
    let width = catalog
        .tools
        .iter()
        .map(|tool| tool.name.len())
        .max()
        .unwrap_or(0);

    catalog
        .tools
        .iter()
        .map(|tool| format!("{:<width$}  {}", tool.name, tool.description.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
