//! Offline classification.
//!
//! # Usage
//!
//! ```bash
//! sams classify "Samsung Galaxy Tab S7 in IT"
//! sams classify "list assets in jakarta" --taxonomy custom.yaml
//! ```

use std::path::Path;
use std::sync::Arc;

use sams_assistant::intent::{IntentClassifier, KeywordTaxonomy};
use serde_json::json;

use super::CommandError;

/// Classify a query and render the tier and tool call as pretty JSON.
///
/// Makes no network calls.
///
/// # Errors
///
/// Returns an error if the taxonomy file cannot be loaded.
pub fn classify(query: &str, taxonomy_file: Option<&Path>) -> Result<String, CommandError> {
    let taxonomy = match taxonomy_file {
        Some(path) => KeywordTaxonomy::from_yaml_file(path)?,
        None => KeywordTaxonomy::builtin(),
    };

    let classification = IntentClassifier::new(Arc::new(taxonomy)).classify(query);
    let invocation = classification.invocation();

    let output = json!({
        "tier": classification.tier,
        "tool": invocation.name,
        "params": invocation.params,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
