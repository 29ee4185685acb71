//! Keyword taxonomy commands.
//!
//! # Usage
//!
//! ```bash
//! # Start a custom taxonomy from the built-in one
//! sams taxonomy dump > taxonomy.yaml
//!
//! # Check it before pointing SAMS_TAXONOMY_FILE at it
//! sams taxonomy validate taxonomy.yaml
//! ```

use std::path::Path;

use sams_assistant::intent::KeywordTaxonomy;

use super::CommandError;

/// Render the built-in taxonomy as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn dump() -> Result<String, CommandError> {
    Ok(KeywordTaxonomy::builtin().to_yaml()?)
}

/// Load and validate a taxonomy file.
///
/// # Errors
///
/// Returns `TaxonomyError::Invalid` with every problem found, or an I/O or
/// parse error.
pub fn validate(path: &Path) -> Result<String, CommandError> {
    let taxonomy = KeywordTaxonomy::from_yaml_file(path)?;
    Ok(format!(
        "{} is valid: {} categories, {} departments, {} statuses, {} brands",
        path.display(),
        taxonomy.category_keywords.len(),
        taxonomy.department_keywords.len(),
        taxonomy.status_keywords.len(),
        taxonomy.specific_asset_keywords.len(),
    ))
}
