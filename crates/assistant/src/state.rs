//! Application state shared across handlers.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AssistantConfig;
use crate::error::StartupError;
use crate::gemini::GeminiClient;
use crate::intent::IntentClassifier;
use crate::inventory::InventoryClient;
use crate::services::{AssistantService, ResponseComposer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: AssistantService,
    inventory: InventoryClient,
}

impl AppState {
    /// Create state from already-built parts.
    ///
    /// `inventory` backs the readiness probe; the service may dispatch
    /// through a different implementation.
    #[must_use]
    pub fn new(service: AssistantService, inventory: InventoryClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { service, inventory }),
        }
    }

    /// Build the taxonomy, clients and pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the taxonomy file cannot be loaded or a client
    /// cannot be built.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, StartupError> {
        let taxonomy = Arc::new(config.load_taxonomy()?);
        let classifier = IntentClassifier::new(taxonomy);
        let inventory = InventoryClient::new(&config.inventory)?;

        let composer = match config.gemini() {
            Some(gemini) => {
                let client = GeminiClient::new(gemini)?;
                info!(model = %client.model(), "Gemini configured, answers are model-written");
                ResponseComposer::with_generator(Arc::new(client))
            }
            None => {
                warn!(
                    "GEMINI_API_KEY is unset or a placeholder, answers use the fallback template"
                );
                ResponseComposer::fallback()
            }
        };

        let service = AssistantService::new(classifier, Arc::new(inventory.clone()), composer);
        Ok(Self::new(service, inventory))
    }

    /// The query pipeline.
    #[must_use]
    pub fn service(&self) -> &AssistantService {
        &self.inner.service
    }

    /// The inventory-data service client.
    #[must_use]
    pub fn inventory(&self) -> &InventoryClient {
        &self.inner.inventory
    }
}
