//! Assistant configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Nothing is required: with an empty environment the service starts in
//! fallback mode against the default inventory service address.
//!
//! ## Server
//! - `SERVER_HOST` - Bind address (default: 0.0.0.0)
//! - `SERVER_PORT` - Listen port (default: 8080)
//!
//! ## Inventory-data service
//! - `MCP_SERVER_URL` - Base URL (default: <http://sams-mcp-server:8081>)
//!
//! ## Gemini (optional - enables model-written answers)
//! - `GEMINI_API_KEY` - API key. Unset or a placeholder value selects the
//!   deterministic fallback composer.
//! - `GEMINI_MODEL` - Model ID (default: gemini-1.5-flash)
//! - `GEMINI_API_BASE` - REST base URL (default:
//!   <https://generativelanguage.googleapis.com/v1beta>)
//!
//! ## Classification
//! - `SAMS_TAXONOMY_FILE` - YAML keyword taxonomy replacing the built-in one
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use crate::intent::{KeywordTaxonomy, TaxonomyError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_INVENTORY_URL: &str = "http://sams-mcp-server:8081";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Values that mark an API key as not really configured (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_",
    "your-",
    "changeme",
    "placeholder",
    "replace",
    "xxx",
    "insert",
    "api_key_here",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to load keyword taxonomy: {0}")]
    Taxonomy(#[from] TaxonomyError),
}

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Inventory-data service configuration
    pub inventory: InventoryConfig,
    /// Gemini configuration (`None` selects the fallback composer)
    pub gemini: Option<GeminiConfig>,
    /// Keyword taxonomy file replacing the built-in vocabulary
    pub taxonomy_file: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Inventory-data service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Google AI API key
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-1.5-flash)
    pub model: String,
    /// REST base URL, without a trailing slash
    pub api_base: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SERVER_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SERVER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SERVER_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SERVER_PORT".to_string(), e.to_string()))?;

        let inventory = InventoryConfig::from_env()?;
        let gemini = GeminiConfig::from_env()?;
        let taxonomy_file = get_optional_env("SAMS_TAXONOMY_FILE").map(PathBuf::from);
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            inventory,
            gemini,
            taxonomy_file,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Gemini configuration, if available.
    ///
    /// Returns `None` if `GEMINI_API_KEY` was unset or a placeholder, which
    /// selects the deterministic fallback composer.
    #[must_use]
    pub const fn gemini(&self) -> Option<&GeminiConfig> {
        self.gemini.as_ref()
    }

    /// Build the keyword taxonomy: the configured file, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Taxonomy` if the file cannot be loaded.
    pub fn load_taxonomy(&self) -> Result<KeywordTaxonomy, ConfigError> {
        match &self.taxonomy_file {
            Some(path) => Ok(KeywordTaxonomy::from_yaml_file(path)?),
            None => Ok(KeywordTaxonomy::builtin()),
        }
    }
}

impl InventoryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("MCP_SERVER_URL", DEFAULT_INVENTORY_URL);
        Ok(Self {
            base_url: validate_base_url(&base_url, "MCP_SERVER_URL")?,
        })
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INVENTORY_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Create a configuration with the default model and API base.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }

    /// Load Gemini configuration from environment.
    ///
    /// Returns `None` if `GEMINI_API_KEY` is unset or a placeholder
    /// (fallback mode).
    fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_api_key(get_optional_env("GEMINI_API_KEY"))
    }

    /// Build from an already-read key; model and API base still come from
    /// the environment. Runs before tracing is set up, so the fallback
    /// decision is logged later by the caller.
    fn from_api_key(api_key: Option<String>) -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = api_key.filter(|key| !is_placeholder_key(key)) else {
            return Ok(None);
        };

        let api_base = get_env_or_default("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE);
        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            api_base: validate_base_url(&api_base, "GEMINI_API_BASE")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Whether an API key is empty or a known placeholder literal.
#[must_use]
pub fn is_placeholder_key(key: &str) -> bool {
    let lower = key.trim().to_lowercase();
    lower.is_empty() || PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Require an http(s) URL and strip any trailing slash.
fn validate_base_url(url: &str, var_name: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be an http(s) URL (got '{url}')"),
        ))
    }
}
