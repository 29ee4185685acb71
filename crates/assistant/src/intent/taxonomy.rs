//! Keyword taxonomy used by every classification rule.
//!
//! The taxonomy is built once at start-up (either the built-in vocabulary or
//! a YAML file named by `SAMS_TAXONOMY_FILE`) and then shared read-only behind
//! an `Arc`. Nothing mutates it after construction.
//!
//! ## Matching
//!
//! Terms are matched as substrings of the query after it has been lower-cased
//! and had punctuation folded to single spaces, with one space of padding on
//! each side. A term written with surrounding spaces (`" it "`, `" hc "`)
//! therefore only matches a whole word, while a bare term (`"vehicle"`) also
//! matches inside longer words (`"vehicles"`).
//!
//! ## YAML Format
//!
//! ```yaml
//! category_keywords:
//!   - category: IT Equipment
//!     terms: ["it equipment", "hardware"]
//! department_triggers: ["department", " dept"]
//! department_keywords:
//!   - name: Finance
//!     terms: ["finance", "accounting"]
//! default_department: Information Technology (IT)
//! # ... every field of `KeywordTaxonomy` is required
//! ```

use std::path::Path;

use sams_core::{AssetCategory, AssetStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::TaxonomyError;

/// Terms that select one asset category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryKeywords {
    pub category: AssetCategory,
    pub terms: Vec<String>,
}

/// Terms that resolve to one canonical department name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepartmentKeywords {
    /// Canonical name sent to the inventory service.
    pub name: String,
    pub terms: Vec<String>,
}

/// Terms that select one asset status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusKeywords {
    pub status: AssetStatus,
    pub terms: Vec<String>,
}

/// Every lexicon the classifier consults.
///
/// Lists are ordered: where several entries could match, the first one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordTaxonomy {
    /// Category vocabulary, in resolution order.
    pub category_keywords: Vec<CategoryKeywords>,
    /// Words that make a query a department question.
    pub department_triggers: Vec<String>,
    /// Department vocabulary, in resolution order.
    pub department_keywords: Vec<DepartmentKeywords>,
    /// Department used when a department question names none we know.
    pub default_department: String,
    /// Brand and model tokens that name a particular asset.
    pub specific_asset_keywords: Vec<String>,
    /// Stop-words ignored when looking for brand and model tokens.
    pub common_words: Vec<String>,
    /// Leading words that make a query a question rather than a lookup.
    pub question_words: Vec<String>,
    /// Phrases that signal an aggregate question.
    pub general_query_phrases: Vec<String>,
    /// Conversational phrases removed when extracting an asset name.
    pub query_phrases: Vec<String>,
    /// Phrases that ask for a total value, cost or worth.
    pub value_phrases: Vec<String>,
    /// Bare IT mentions that pick IT Equipment in value questions only.
    /// Kept out of `category_keywords` so "IT department" stays a
    /// department question.
    #[serde(default)]
    pub value_it_mentions: Vec<String>,
    /// Phrases that ask for a summary or a count.
    pub summary_phrases: Vec<String>,
    /// Status vocabulary, in resolution order.
    pub status_keywords: Vec<StatusKeywords>,
    /// Words that make a query a location question.
    pub location_keywords: Vec<String>,
    /// City names, in resolution order.
    pub cities: Vec<String>,
    /// Generic location labels used when no city is named.
    pub location_labels: Vec<String>,
    /// Words that make a query a free-text search.
    pub search_keywords: Vec<String>,
    /// Search terms preferred over the query text itself.
    pub preferred_search_terms: Vec<String>,
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_string()).collect()
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordTaxonomy {
    /// The built-in vocabulary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            category_keywords: vec![
                CategoryKeywords {
                    category: AssetCategory::ItEquipment,
                    terms: terms(&[
                        "it equipment",
                        "it asset",
                        "it hardware",
                        "it device",
                        "hardware",
                        "electronics",
                    ]),
                },
                CategoryKeywords {
                    category: AssetCategory::Vehicles,
                    terms: terms(&[
                        "vehicle",
                        " car ",
                        " cars ",
                        "truck",
                        "motorcycle",
                        "motorbike",
                        " van ",
                        "forklift",
                    ]),
                },
                CategoryKeywords {
                    category: AssetCategory::Tools,
                    terms: terms(&[" tool", "drill", "generator", "machinery", "welding"]),
                },
            ],
            department_triggers: terms(&["department", " dept", "departement"]),
            department_keywords: vec![
                DepartmentKeywords {
                    name: "Project".to_string(),
                    terms: terms(&["project"]),
                },
                DepartmentKeywords {
                    name: "Finance".to_string(),
                    terms: terms(&["finance", "accounting"]),
                },
                DepartmentKeywords {
                    name: "Human Capital".to_string(),
                    terms: terms(&["human capital", " hc "]),
                },
                DepartmentKeywords {
                    name: "Operation".to_string(),
                    terms: terms(&["operation", " ops "]),
                },
                DepartmentKeywords {
                    name: "Information Technology (IT)".to_string(),
                    terms: terms(&["information technology", " it "]),
                },
                DepartmentKeywords {
                    name: "Marketing".to_string(),
                    terms: terms(&["marketing"]),
                },
            ],
            default_department: "Information Technology (IT)".to_string(),
            specific_asset_keywords: terms(&[
                "samsung", "galaxy", "apple", "macbook", "iphone", "ipad", "imac", "dell",
                "latitude", "inspiron", "lenovo", "thinkpad", "ideapad", "asus", "zenbook",
                "acer", "aspire", "hp", "elitebook", "probook", "microsoft", "surface",
                "logitech", "canon", "epson", "brother", "cisco", "xiaomi", "huawei", "toyota",
                "avanza", "innova", "honda", "yamaha", "suzuki", "mitsubishi", "daihatsu",
                "isuzu", "bosch", "makita",
            ]),
            common_words: terms(&[
                "a", "an", "the", "and", "or", "for", "with", "our", "all", "any", "are", "was",
                "were", "has", "have", "this", "that", "from", "into", "about", "of", "in", "on",
                "at", "to", "is", "it", "its", "my", "me", "we", "you", "your", "please", "there",
                "their", "some", "much", "many", "does", "do", "new", "old", "one",
            ]),
            question_words: terms(&[
                "what", "how", "show", "find", "list", "get", "give", "tell", "which", "where",
                "who", "when", "why", "is", "are", "do", "does", "can", "could", "would",
                "please", "search", "display", "count",
            ]),
            general_query_phrases: terms(&[
                "total",
                "value",
                "cost",
                "worth",
                "summary",
                "overview",
                "count",
                "how many",
                "equipment",
                "assets",
                "category",
            ]),
            query_phrases: terms(&[
                "search for",
                "search",
                "find me",
                "find",
                "look for",
                "look up",
                "lookup",
                "show me",
                "show",
                "details of",
                "details for",
                "details about",
                "details",
                "information about",
                "info about",
                "info on",
                "tell me about",
                "do we have",
                "where is",
                "i need",
                "i want",
                "please",
            ]),
            value_phrases: terms(&[
                "total value",
                "total cost",
                "total worth",
                "value of",
                "cost of",
                "worth of",
            ]),
            value_it_mentions: terms(&[" it "]),
            summary_phrases: terms(&["summary", "overview", "count", "how many"]),
            status_keywords: vec![
                StatusKeywords {
                    status: AssetStatus::Inactive,
                    terms: terms(&["inactive"]),
                },
                StatusKeywords {
                    status: AssetStatus::Active,
                    terms: terms(&["active"]),
                },
                StatusKeywords {
                    status: AssetStatus::Maintenance,
                    terms: terms(&["maintenance"]),
                },
                StatusKeywords {
                    status: AssetStatus::Disposed,
                    terms: terms(&["disposed"]),
                },
            ],
            location_keywords: terms(&[
                "location", "address", "building", "room", "office", "where", "place",
            ]),
            cities: terms(&[
                "jakarta",
                "bandung",
                "surabaya",
                "medan",
                "semarang",
                "yogyakarta",
                "makassar",
                "denpasar",
                "bali",
                "tangerang",
                "bekasi",
                "bogor",
                "depok",
                "palembang",
                "balikpapan",
            ]),
            location_labels: terms(&["office", "building", "room"]),
            search_keywords: terms(&["search", "find", "computer"]),
            preferred_search_terms: terms(&["laptop", "computer"]),
        }
    }

    /// Parse a taxonomy from YAML and validate it.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Parse` for malformed YAML and
    /// `TaxonomyError::Invalid` listing every validation problem.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TaxonomyError> {
        let taxonomy: Self = serde_yaml::from_str(yaml)
            .map_err(|e| TaxonomyError::Parse(format!("Failed to parse YAML: {e}")))?;

        let problems = taxonomy.validate();
        if problems.is_empty() {
            Ok(taxonomy)
        } else {
            Err(TaxonomyError::Invalid(problems))
        }
    }

    /// Load and validate a taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TaxonomyError::Io(format!("Failed to read {}: {e}", path.display())))?;

        let taxonomy = Self::from_yaml_str(&content)?;
        info!(
            brands = taxonomy.specific_asset_keywords.len(),
            departments = taxonomy.department_keywords.len(),
            "Loaded keyword taxonomy"
        );
        Ok(taxonomy)
    }

    /// Serialize the taxonomy as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, TaxonomyError> {
        serde_yaml::to_string(self).map_err(|e| TaxonomyError::Parse(e.to_string()))
    }

    /// Check the taxonomy for problems that would break classification.
    ///
    /// Returns one message per problem; an empty list means the taxonomy is
    /// usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let required: [(&str, &[String]); 9] = [
            ("department_triggers", &self.department_triggers),
            ("specific_asset_keywords", &self.specific_asset_keywords),
            ("question_words", &self.question_words),
            ("general_query_phrases", &self.general_query_phrases),
            ("value_phrases", &self.value_phrases),
            ("summary_phrases", &self.summary_phrases),
            ("location_keywords", &self.location_keywords),
            ("search_keywords", &self.search_keywords),
            ("location_labels", &self.location_labels),
        ];
        for (field, list) in required {
            if list.is_empty() {
                errors.push(format!("{field} must not be empty"));
            }
        }

        let optional: [(&str, &[String]); 5] = [
            ("common_words", &self.common_words),
            ("query_phrases", &self.query_phrases),
            ("value_it_mentions", &self.value_it_mentions),
            ("cities", &self.cities),
            ("preferred_search_terms", &self.preferred_search_terms),
        ];
        for (field, list) in required.into_iter().chain(optional) {
            check_terms(field, list, &mut errors);
        }

        if self.category_keywords.is_empty() {
            errors.push("category_keywords must not be empty".to_string());
        }
        for entry in &self.category_keywords {
            let field = format!("category_keywords[{}]", entry.category);
            if entry.terms.is_empty() {
                errors.push(format!("{field} has no terms"));
            }
            check_terms(&field, &entry.terms, &mut errors);
        }

        if self.department_keywords.is_empty() {
            errors.push("department_keywords must not be empty".to_string());
        }
        for entry in &self.department_keywords {
            let field = format!("department_keywords[{}]", entry.name);
            if entry.name.trim().is_empty() {
                errors.push("department_keywords contains an entry with a blank name".to_string());
            }
            if entry.terms.is_empty() {
                errors.push(format!("{field} has no terms"));
            }
            check_terms(&field, &entry.terms, &mut errors);
        }

        if self.default_department.trim().is_empty() {
            errors.push("default_department must not be blank".to_string());
        }

        if self.status_keywords.is_empty() {
            errors.push("status_keywords must not be empty".to_string());
        }
        for entry in &self.status_keywords {
            let field = format!("status_keywords[{}]", entry.status);
            if entry.terms.is_empty() {
                errors.push(format!("{field} has no terms"));
            }
            check_terms(&field, &entry.terms, &mut errors);
        }

        errors
    }
}

/// Terms are compared against a lower-cased query, so they must be
/// lower-case themselves and contain something besides whitespace.
fn check_terms(field: &str, list: &[String], errors: &mut Vec<String>) {
    for (i, term) in list.iter().enumerate() {
        if term.trim().is_empty() {
            errors.push(format!("{field}: blank term at index {i}"));
        } else if term.to_lowercase() != *term {
            errors.push(format!("{field}: term '{term}' must be lower-case"));
        }
    }
}
