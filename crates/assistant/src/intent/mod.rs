//! Query intent classification.
//!
//! Free-text questions about the asset inventory are mapped to exactly one
//! inventory tool call by deterministic keyword matching. There is no model
//! in this stage: every decision can be traced to a term in the
//! [`KeywordTaxonomy`] and a tier of the [`IntentClassifier`] cascade.
//!
//! ## Stages
//!
//! 1. **Normalization** - the query is lower-cased and padded ([`QueryText`])
//! 2. **Specific-reference detection** - brand + model lookups are claimed
//!    first so "Samsung Galaxy Tab S7 in IT" is a search, not a category list
//! 3. **Tier cascade** - value, category, department, summary, status,
//!    location and search rules in fixed priority order
//! 4. **Default** - anything unmatched becomes the overall asset summary

mod classifier;
pub mod detector;
mod error;
mod query;
pub mod taxonomy;
mod types;

pub use classifier::{IntentClassifier, Tier, TierBuilder, TierPredicate};
pub use detector::is_specific_asset_reference;
pub use error::TaxonomyError;
pub use query::QueryText;
pub use taxonomy::{CategoryKeywords, DepartmentKeywords, KeywordTaxonomy, StatusKeywords};
pub use types::{
    Classification, DepartmentMatch, FILTER_LIMIT, Intent, SEARCH_LIMIT, SPECIFIC_SEARCH_LIMIT,
    TierKind, VALUE_CATEGORY_LIMIT,
};
