//! Rule-based intent classification.
//!
//! The classifier is an ordered list of [`Tier`]s. Each tier pairs a
//! predicate with an intent builder; the first tier whose predicate accepts
//! the query builds the intent and later tiers are not consulted. When no tier
//! matches, the query falls through to [`Intent::DefaultSummary`], so
//! classification never fails.
//!
//! The standard cascade, highest priority first:
//!
//! | Tier | Trigger | Tool |
//! |------|---------|------|
//! | specific reference | brand + model tokens | `search_assets` |
//! | value or cost | "total value", "cost of", ... | `get_assets_by_category` / `get_asset_summary` |
//! | category | IT equipment, vehicle, tool vocabulary | `get_assets_by_category` |
//! | department | "department", "dept" | `get_assets_by_department` |
//! | summary | "summary", "overview", "count", "how many" | `get_asset_summary` |
//! | status | "inactive", "active", "maintenance", "disposed" | `get_assets_by_status` |
//! | location | location words or a city | `get_assets_by_location` |
//! | generic search | "search", "find", "computer" | `search_assets` |

use std::sync::Arc;

use sams_core::{AssetCategory, AssetStatus};
use tracing::{debug, instrument};

use super::detector;
use super::query::{QueryText, normalize_token};
use super::taxonomy::KeywordTaxonomy;
use super::types::{Classification, DepartmentMatch, Intent, TierKind};

/// Decides whether a tier claims a query.
pub type TierPredicate = fn(&QueryText<'_>, &KeywordTaxonomy) -> bool;

/// Builds the intent for a query a tier has claimed.
pub type TierBuilder = fn(&QueryText<'_>, &KeywordTaxonomy) -> Intent;

/// One rule of the classification cascade.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    kind: TierKind,
    matches: TierPredicate,
    build: TierBuilder,
}

impl Tier {
    #[must_use]
    pub const fn new(kind: TierKind, matches: TierPredicate, build: TierBuilder) -> Self {
        Self {
            kind,
            matches,
            build,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TierKind {
        self.kind
    }

    /// Whether this tier claims the query.
    #[must_use]
    pub fn matches(&self, query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
        (self.matches)(query, taxonomy)
    }

    /// Build the intent for a query this tier has claimed.
    #[must_use]
    pub fn build(&self, query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
        (self.build)(query, taxonomy)
    }

    /// The standard cascade in priority order.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        vec![
            Self::new(
                TierKind::SpecificReference,
                detector::detect,
                build_specific_reference,
            ),
            Self::new(TierKind::ValueOrCost, matches_value, build_value),
            Self::new(TierKind::Category, matches_category, build_category),
            Self::new(TierKind::Department, matches_department, build_department),
            Self::new(TierKind::Summary, matches_summary, |_, _| {
                Intent::GeneralSummary
            }),
            Self::new(TierKind::Status, matches_status, build_status),
            Self::new(TierKind::Location, matches_location, build_location),
            Self::new(TierKind::GenericSearch, matches_search, build_search),
        ]
    }
}

/// Maps free-text queries to intents.
///
/// Cheap to clone; the taxonomy is shared.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    taxonomy: Arc<KeywordTaxonomy>,
    tiers: Vec<Tier>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(KeywordTaxonomy::builtin()))
    }
}

impl IntentClassifier {
    /// Create a classifier with the standard cascade.
    #[must_use]
    pub fn new(taxonomy: Arc<KeywordTaxonomy>) -> Self {
        Self::with_tiers(taxonomy, Tier::standard())
    }

    /// Create a classifier with a custom cascade.
    #[must_use]
    pub const fn with_tiers(taxonomy: Arc<KeywordTaxonomy>, tiers: Vec<Tier>) -> Self {
        Self { taxonomy, tiers }
    }

    /// Insert a tier at `index`, shifting lower-priority tiers down.
    ///
    /// An index past the end appends the tier.
    #[must_use]
    pub fn insert_tier(mut self, index: usize, tier: Tier) -> Self {
        let index = index.min(self.tiers.len());
        self.tiers.insert(index, tier);
        self
    }

    /// Remove every tier of the given kind.
    #[must_use]
    pub fn without_tier(mut self, kind: TierKind) -> Self {
        self.tiers.retain(|tier| tier.kind != kind);
        self
    }

    /// The cascade in priority order, not including the default.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn taxonomy(&self) -> &KeywordTaxonomy {
        &self.taxonomy
    }

    /// Whether `query` names a particular asset by brand and model.
    #[must_use]
    pub fn is_specific_asset_reference(&self, query: &str) -> bool {
        detector::is_specific_asset_reference(query, &self.taxonomy)
    }

    /// Classify a query. Always returns exactly one intent.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub fn classify(&self, query: &str) -> Classification {
        let text = QueryText::new(query);

        let classification = self
            .tiers
            .iter()
            .find(|tier| tier.matches(&text, &self.taxonomy))
            .map_or(
                Classification {
                    tier: TierKind::Default,
                    intent: Intent::DefaultSummary,
                },
                |tier| Classification {
                    tier: tier.kind,
                    intent: tier.build(&text, &self.taxonomy),
                },
            );

        debug!(
            tier = %classification.tier,
            tool = %classification.intent.tool(),
            "Classified query"
        );
        classification
    }
}

// =============================================================================
// Tier predicates and builders
// =============================================================================

fn build_specific_reference(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    Intent::SearchBySpecificReference {
        name: strip_query_phrases(query.raw(), taxonomy),
    }
}

fn matches_value(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    query.contains_any(&taxonomy.value_phrases)
}

fn build_value(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    let category = category_of(query, taxonomy).or_else(|| {
        query
            .contains_any(&taxonomy.value_it_mentions)
            .then_some(AssetCategory::ItEquipment)
    });
    Intent::ValueOrCostSummary { category }
}

fn matches_category(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    category_of(query, taxonomy).is_some()
}

fn build_category(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    category_of(query, taxonomy).map_or(Intent::DefaultSummary, |category| {
        Intent::CategoryFilter { category }
    })
}

fn matches_department(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    query.contains_any(&taxonomy.department_triggers)
}

fn build_department(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    let department = taxonomy
        .department_keywords
        .iter()
        .find(|entry| query.contains_any(&entry.terms))
        .map_or_else(
            || DepartmentMatch::Defaulted(taxonomy.default_department.clone()),
            |entry| DepartmentMatch::Named(entry.name.clone()),
        );
    Intent::DepartmentFilter { department }
}

fn matches_summary(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    query.contains_any(&taxonomy.summary_phrases)
}

fn matches_status(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    status_of(query, taxonomy).is_some()
}

fn build_status(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    status_of(query, taxonomy).map_or(Intent::DefaultSummary, |status| Intent::StatusFilter {
        status,
    })
}

fn matches_location(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    query.contains_any(&taxonomy.location_keywords) || query.contains_any(&taxonomy.cities)
}

fn build_location(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    let location = query
        .first_match(&taxonomy.cities)
        .or_else(|| query.first_match(&taxonomy.location_labels))
        .map_or_else(|| query.raw().trim().to_string(), title_case);
    Intent::LocationFilter { location }
}

fn matches_search(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> bool {
    query.contains_any(&taxonomy.search_keywords)
}

fn build_search(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Intent {
    let term = query
        .first_match(&taxonomy.preferred_search_terms)
        .map_or_else(|| query.raw().trim().to_string(), |t| t.trim().to_string());
    Intent::GenericSearch { term }
}

// =============================================================================
// Helpers
// =============================================================================

fn category_of(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Option<AssetCategory> {
    taxonomy
        .category_keywords
        .iter()
        .find(|entry| query.contains_any(&entry.terms))
        .map(|entry| entry.category)
}

fn status_of(query: &QueryText<'_>, taxonomy: &KeywordTaxonomy) -> Option<AssetStatus> {
    taxonomy
        .status_keywords
        .iter()
        .find(|entry| query.contains_any(&entry.terms))
        .map(|entry| entry.status)
}

/// Capitalize the first letter of each word: "yogyakarta" -> "Yogyakarta".
fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove conversational phrases ("show me", "details of", "please") from a
/// query, keeping the remaining words in their original casing.
///
/// Phrases are matched word by word, longest first at each position.
/// Punctuation is trimmed from the ends of the result and whitespace is
/// collapsed. If nothing is left, the trimmed query is returned unchanged.
fn strip_query_phrases(raw: &str, taxonomy: &KeywordTaxonomy) -> String {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let normalized: Vec<String> = words.iter().map(|w| normalize_token(w)).collect();
    let phrases: Vec<Vec<&str>> = taxonomy
        .query_phrases
        .iter()
        .map(|p| p.split_whitespace().collect::<Vec<_>>())
        .filter(|p| !p.is_empty())
        .collect();

    let mut kept: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let skip = phrases
            .iter()
            .filter(|phrase| {
                normalized.get(i..i + phrase.len()).is_some_and(|window| {
                    window.iter().zip(phrase.iter()).all(|(w, p)| w == p)
                })
            })
            .map(Vec::len)
            .max();

        match skip {
            Some(len) => i += len,
            None => {
                if let Some(word) = words.get(i) {
                    kept.push(*word);
                }
                i += 1;
            }
        }
    }

    let joined = kept.join(" ");
    let cleaned = joined.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
    if cleaned.is_empty() {
        raw.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use sams_core::ToolName;

    use super::*;

    fn classify(query: &str) -> Classification {
        IntentClassifier::default().classify(query)
    }

    fn tier(kind: TierKind) -> Tier {
        Tier::standard()
            .into_iter()
            .find(|t| t.kind() == kind)
            .expect("standard tier")
    }

    fn tier_matches(kind: TierKind, query: &str) -> bool {
        tier(kind).matches(&QueryText::new(query), &KeywordTaxonomy::builtin())
    }

    // -------------------------------------------------------------------------
    // Cascade
    // -------------------------------------------------------------------------

    #[test]
    fn test_specific_reference_beats_category() {
        let result = classify("Samsung Galaxy Tab S7 in IT");
        assert_eq!(result.tier, TierKind::SpecificReference);
        let invocation = result.invocation();
        assert_eq!(invocation.name, ToolName::SearchAssets);
        assert_eq!(invocation.params.get_str("query"), Some("Samsung Galaxy Tab S7 in IT"));
        assert_eq!(invocation.params.get_i64("limit"), Some(10));
    }

    #[test]
    fn test_value_with_category() {
        let result = classify("What is the total value of our IT equipment?");
        assert_eq!(result.tier, TierKind::ValueOrCost);
        let invocation = result.invocation();
        assert_eq!(invocation.name, ToolName::GetAssetsByCategory);
        assert_eq!(invocation.params.get_str("category"), Some("IT Equipment"));
        assert_eq!(invocation.params.get_i64("limit"), Some(50));
    }

    #[test]
    fn test_value_with_bare_it_mention() {
        let result = classify("What is the total value of IT?");
        assert_eq!(result.tier, TierKind::ValueOrCost);
        let invocation = result.invocation();
        assert_eq!(invocation.name, ToolName::GetAssetsByCategory);
        assert_eq!(invocation.params.get_str("category"), Some("IT Equipment"));
        assert_eq!(invocation.params.get_i64("limit"), Some(50));

        // A bare IT mention alone is still a department question.
        assert_eq!(classify("assets in the IT department").tier, TierKind::Department);
    }

    #[test]
    fn test_value_without_category_is_summary() {
        let result = classify("What is the total cost of everything we own?");
        assert_eq!(
            result.intent,
            Intent::ValueOrCostSummary { category: None }
        );
        assert_eq!(result.invocation().name, ToolName::GetAssetSummary);
        assert!(result.invocation().params.is_empty());
    }

    #[test]
    fn test_category_filter() {
        let result = classify("list all vehicles");
        assert_eq!(
            result.intent,
            Intent::CategoryFilter {
                category: AssetCategory::Vehicles
            }
        );
        assert_eq!(result.invocation().params.get_i64("limit"), Some(20));

        let result = classify("Which power tools are available?");
        assert_eq!(
            result.intent,
            Intent::CategoryFilter {
                category: AssetCategory::Tools
            }
        );
    }

    #[test]
    fn test_department_filter() {
        let result = classify("show me assets in the Finance department");
        let invocation = result.invocation();
        assert_eq!(invocation.name, ToolName::GetAssetsByDepartment);
        assert_eq!(invocation.params.get_str("department"), Some("Finance"));
        assert_eq!(invocation.params.get_i64("limit"), Some(20));
    }

    #[test]
    fn test_department_aliases() {
        let cases = [
            ("assets of the accounting dept", "Finance"),
            ("HC department assets", "Human Capital"),
            ("what does the ops department have", "Operation"),
            ("assets in the IT departement", "Information Technology (IT)"),
            ("marketing department laptops", "Marketing"),
            ("project department assets", "Project"),
        ];
        for (query, expected) in cases {
            match classify(query).intent {
                Intent::DepartmentFilter {
                    department: DepartmentMatch::Named(name),
                } => assert_eq!(name, expected, "query: {query}"),
                other => panic!("query {query:?} classified as {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_department_defaults_to_it() {
        let result = classify("assets in the legal department");
        assert_eq!(
            result.intent,
            Intent::DepartmentFilter {
                department: DepartmentMatch::Defaulted("Information Technology (IT)".to_string())
            }
        );
        assert_eq!(
            result.invocation().params.get_str("department"),
            Some("Information Technology (IT)")
        );
    }

    #[test]
    fn test_summary() {
        let result = classify("asset summary please");
        assert_eq!(result.intent, Intent::GeneralSummary);
        assert_eq!(result.invocation().name, ToolName::GetAssetSummary);
        assert!(result.invocation().params.is_empty());

        assert_eq!(classify("How many assets do we have?").tier, TierKind::Summary);
    }

    #[test]
    fn test_status_filter() {
        let cases = [
            ("list active assets", AssetStatus::Active),
            ("which assets are inactive", AssetStatus::Inactive),
            ("assets under maintenance", AssetStatus::Maintenance),
            ("show disposed assets", AssetStatus::Disposed),
        ];
        for (query, expected) in cases {
            let result = classify(query);
            assert_eq!(
                result.intent,
                Intent::StatusFilter { status: expected },
                "query: {query}"
            );
            assert_eq!(result.invocation().params.get_i64("limit"), Some(20));
        }
    }

    #[test]
    fn test_location_prefers_city() {
        let result = classify("What do we have in the Bandung office?");
        assert_eq!(
            result.intent,
            Intent::LocationFilter {
                location: "Bandung".to_string()
            }
        );
    }

    #[test]
    fn test_location_city_alone_triggers() {
        let result = classify("assets in Jakarta");
        assert_eq!(
            result.intent,
            Intent::LocationFilter {
                location: "Jakarta".to_string()
            }
        );
    }

    #[test]
    fn test_location_label_then_raw_query() {
        assert_eq!(
            classify("what is in room 4B").intent,
            Intent::LocationFilter {
                location: "Room".to_string()
            }
        );
        assert_eq!(
            classify("  where are the spare chairs  ").intent,
            Intent::LocationFilter {
                location: "where are the spare chairs".to_string()
            }
        );
    }

    #[test]
    fn test_generic_search_prefers_laptop() {
        let result = classify("find a laptop for the new intern");
        assert_eq!(
            result.intent,
            Intent::GenericSearch {
                term: "laptop".to_string()
            }
        );
        assert_eq!(result.invocation().params.get_i64("limit"), Some(10));
    }

    #[test]
    fn test_generic_search_sends_raw_query() {
        let result = classify("  Please search for projector screens ");
        assert_eq!(
            result.intent,
            Intent::GenericSearch {
                term: "Please search for projector screens".to_string()
            }
        );
        assert_eq!(
            classify("find me the projector").intent,
            Intent::GenericSearch {
                term: "find me the projector".to_string()
            }
        );
    }

    #[test]
    fn test_default() {
        let result = classify("random unrelated text");
        assert_eq!(result.tier, TierKind::Default);
        assert_eq!(result.intent, Intent::DefaultSummary);
        assert_eq!(result.invocation().name, ToolName::GetAssetSummary);
        assert!(result.invocation().params.is_empty());
    }

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(classify("").intent, Intent::DefaultSummary);
        assert_eq!(classify("   ?!").intent, Intent::DefaultSummary);
    }

    // -------------------------------------------------------------------------
    // Individual tiers
    // -------------------------------------------------------------------------

    #[test]
    fn test_tier_predicates_in_isolation() {
        assert!(tier_matches(TierKind::ValueOrCost, "worth of all trucks"));
        assert!(!tier_matches(TierKind::ValueOrCost, "valuable trucks"));
        assert!(tier_matches(TierKind::Category, "spare hardware"));
        assert!(!tier_matches(TierKind::Category, "items with it"));
        assert!(tier_matches(TierKind::Department, "finance dept"));
        assert!(tier_matches(TierKind::Status, "INACTIVE"));
        assert!(tier_matches(TierKind::Location, "Surabaya"));
        assert!(tier_matches(TierKind::GenericSearch, "computer"));
    }

    #[test]
    fn test_whole_word_terms() {
        // " car " must not match "card" and " it " must not match "item".
        assert!(!tier_matches(TierKind::Category, "access card item"));
        assert!(tier_matches(TierKind::Category, "company car"));
    }

    #[test]
    fn test_standard_tier_order() {
        let kinds: Vec<TierKind> = Tier::standard().iter().map(Tier::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TierKind::SpecificReference,
                TierKind::ValueOrCost,
                TierKind::Category,
                TierKind::Department,
                TierKind::Summary,
                TierKind::Status,
                TierKind::Location,
                TierKind::GenericSearch,
            ]
        );
    }

    // -------------------------------------------------------------------------
    // Builder API
    // -------------------------------------------------------------------------

    #[test]
    fn test_insert_tier_takes_priority() {
        let classifier = IntentClassifier::default().insert_tier(
            0,
            Tier::new(
                TierKind::Status,
                |query, _| query.contains(" broken "),
                |_, _| Intent::StatusFilter {
                    status: AssetStatus::Maintenance,
                },
            ),
        );
        let result = classifier.classify("broken vehicles");
        assert_eq!(
            result.intent,
            Intent::StatusFilter {
                status: AssetStatus::Maintenance
            }
        );
    }

    #[test]
    fn test_insert_tier_past_end_appends() {
        let classifier = IntentClassifier::default().insert_tier(
            usize::MAX,
            Tier::new(TierKind::Summary, |_, _| true, |_, _| Intent::GeneralSummary),
        );
        assert_eq!(classifier.tiers().len(), 9);
        assert_eq!(classifier.classify("random unrelated text").tier, TierKind::Summary);
    }

    #[test]
    fn test_without_tier() {
        let classifier = IntentClassifier::default().without_tier(TierKind::SpecificReference);
        let result = classifier.classify("Samsung Galaxy Tab S7 in IT");
        assert_eq!(result.tier, TierKind::Default);
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_strip_query_phrases_keeps_casing() {
        let taxonomy = KeywordTaxonomy::builtin();
        assert_eq!(
            strip_query_phrases("Dell Latitude 5420 details please?", &taxonomy),
            "Dell Latitude 5420"
        );
        assert_eq!(
            strip_query_phrases("MacBook   Pro  info about", &taxonomy),
            "MacBook Pro"
        );
    }

    #[test]
    fn test_strip_query_phrases_falls_back_to_raw() {
        let taxonomy = KeywordTaxonomy::builtin();
        assert_eq!(strip_query_phrases("  show me  ", &taxonomy), "show me");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("yogyakarta"), "Yogyakarta");
        assert_eq!(title_case("north jakarta"), "North Jakarta");
    }
}
