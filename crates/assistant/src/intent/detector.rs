//! Specific-asset reference detection.
//!
//! Decides whether a query names one particular asset ("Samsung Galaxy Tab
//! S7") or asks a general question that merely mentions a brand ("how many
//! Dell laptops do we have?"). A query counts as a specific reference only
//! when it carries both a brand token and a model token and reads neither as
//! a question nor as an aggregate request.

use tracing::trace;

use super::query::QueryText;
use super::taxonomy::KeywordTaxonomy;

/// Tokens this short are never brand or model evidence.
const MIN_TOKEN_LEN: usize = 3;

/// Whether `query` names a particular asset by brand and model.
#[must_use]
pub fn is_specific_asset_reference(query: &str, taxonomy: &KeywordTaxonomy) -> bool {
    detect(&QueryText::new(query), taxonomy)
}

pub(crate) fn detect(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    let mentions_brand = taxonomy
        .specific_asset_keywords
        .iter()
        .any(|k| query.lower().contains(k.as_str()));
    if !mentions_brand {
        return false;
    }

    if let Some(first) = query.tokens().next()
        && taxonomy.question_words.contains(&first)
    {
        trace!(first_word = %first, "Rejected specific reference: question word");
        return false;
    }

    if query.contains_any(&taxonomy.general_query_phrases) {
        trace!("Rejected specific reference: general query phrase");
        return false;
    }

    let mut brand = false;
    let mut model = false;
    for token in query.tokens() {
        if token.chars().count() < MIN_TOKEN_LEN || taxonomy.common_words.contains(&token) {
            continue;
        }
        if taxonomy.specific_asset_keywords.contains(&token) {
            brand = true;
        } else {
            model = true;
        }
        if brand && model {
            return true;
        }
    }

    trace!(brand, model, "Rejected specific reference: missing brand or model token");
    false
}
