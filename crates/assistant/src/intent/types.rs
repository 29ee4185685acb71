//! Intent types produced by the classifier.

use sams_core::{AssetCategory, AssetStatus, ToolInvocation, ToolName, ToolParams};
use serde::Serialize;

/// Result limit for a lookup of one named asset.
pub const SPECIFIC_SEARCH_LIMIT: i64 = 10;
/// Result limit for category value questions.
pub const VALUE_CATEGORY_LIMIT: i64 = 50;
/// Result limit for category, department, status and location filters.
pub const FILTER_LIMIT: i64 = 20;
/// Result limit for free-text searches.
pub const SEARCH_LIMIT: i64 = 10;

/// How a department question was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "resolution", content = "name")]
pub enum DepartmentMatch {
    /// The query named a known department.
    Named(String),
    /// No department was recognized; the configured default was used.
    Defaulted(String),
}

impl DepartmentMatch {
    /// The department name sent to the inventory service.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) | Self::Defaulted(name) => name,
        }
    }

    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// The classified action a query maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "intent")]
pub enum Intent {
    /// Look up one asset named by brand and model.
    SearchBySpecificReference { name: String },
    /// Total value, cost or worth, optionally of one category.
    ValueOrCostSummary { category: Option<AssetCategory> },
    /// Assets in one category.
    CategoryFilter { category: AssetCategory },
    /// Assets owned by one department.
    DepartmentFilter { department: DepartmentMatch },
    /// Summary, overview or count.
    GeneralSummary,
    /// Assets with one status.
    StatusFilter { status: AssetStatus },
    /// Assets at one location.
    LocationFilter { location: String },
    /// Free-text search.
    GenericSearch { term: String },
    /// Nothing matched; answer with the overall summary.
    DefaultSummary,
}

impl Intent {
    /// The tool this intent calls.
    #[must_use]
    pub const fn tool(&self) -> ToolName {
        match self {
            Self::SearchBySpecificReference { .. } | Self::GenericSearch { .. } => {
                ToolName::SearchAssets
            }
            Self::ValueOrCostSummary { category: None }
            | Self::GeneralSummary
            | Self::DefaultSummary => ToolName::GetAssetSummary,
            Self::ValueOrCostSummary { category: Some(_) } | Self::CategoryFilter { .. } => {
                ToolName::GetAssetsByCategory
            }
            Self::DepartmentFilter { .. } => ToolName::GetAssetsByDepartment,
            Self::StatusFilter { .. } => ToolName::GetAssetsByStatus,
            Self::LocationFilter { .. } => ToolName::GetAssetsByLocation,
        }
    }

    /// The parameters sent with the tool call.
    #[must_use]
    pub fn params(&self) -> ToolParams {
        match self {
            Self::SearchBySpecificReference { name } => ToolParams::new()
                .with("query", name.as_str())
                .with("limit", SPECIFIC_SEARCH_LIMIT),
            Self::ValueOrCostSummary {
                category: Some(category),
            } => ToolParams::new()
                .with("category", *category)
                .with("limit", VALUE_CATEGORY_LIMIT),
            Self::ValueOrCostSummary { category: None }
            | Self::GeneralSummary
            | Self::DefaultSummary => ToolParams::new(),
            Self::CategoryFilter { category } => ToolParams::new()
                .with("category", *category)
                .with("limit", FILTER_LIMIT),
            Self::DepartmentFilter { department } => ToolParams::new()
                .with("department", department.name())
                .with("limit", FILTER_LIMIT),
            Self::StatusFilter { status } => ToolParams::new()
                .with("status", *status)
                .with("limit", FILTER_LIMIT),
            Self::LocationFilter { location } => ToolParams::new()
                .with("location", location.as_str())
                .with("limit", FILTER_LIMIT),
            Self::GenericSearch { term } => ToolParams::new()
                .with("query", term.as_str())
                .with("limit", SEARCH_LIMIT),
        }
    }

    /// The concrete tool call for this intent.
    #[must_use]
    pub fn invocation(&self) -> ToolInvocation {
        ToolInvocation::new(self.tool(), self.params())
    }
}

/// The tier of the cascade that claimed a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    SpecificReference,
    ValueOrCost,
    Category,
    Department,
    Summary,
    Status,
    Location,
    GenericSearch,
    Default,
}

impl TierKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpecificReference => "specific_reference",
            Self::ValueOrCost => "value_or_cost",
            Self::Category => "category",
            Self::Department => "department",
            Self::Summary => "summary",
            Self::Status => "status",
            Self::Location => "location",
            Self::GenericSearch => "generic_search",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for TierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Tier that claimed the query.
    pub tier: TierKind,
    /// The selected intent.
    pub intent: Intent,
}

impl Classification {
    /// The concrete tool call for the selected intent.
    #[must_use]
    pub fn invocation(&self) -> ToolInvocation {
        self.intent.invocation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_summary_without_category_has_no_params() {
        let intent = Intent::ValueOrCostSummary { category: None };
        let invocation = intent.invocation();
        assert_eq!(invocation.name, ToolName::GetAssetSummary);
        assert!(invocation.params.is_empty());
    }

    #[test]
    fn test_value_summary_with_category() {
        let intent = Intent::ValueOrCostSummary {
            category: Some(AssetCategory::Vehicles),
        };
        let invocation = intent.invocation();
        assert_eq!(invocation.name, ToolName::GetAssetsByCategory);
        assert_eq!(invocation.params.get_str("category"), Some("Vehicles"));
        assert_eq!(invocation.params.get_i64("limit"), Some(50));
    }

    #[test]
    fn test_defaulted_department_still_sends_name() {
        let intent = Intent::DepartmentFilter {
            department: DepartmentMatch::Defaulted("Information Technology (IT)".to_string()),
        };
        let params = intent.params();
        assert_eq!(
            params.get_str("department"),
            Some("Information Technology (IT)")
        );
        assert_eq!(params.get_i64("limit"), Some(20));
    }

    #[test]
    fn test_status_param_is_wire_value() {
        let intent = Intent::StatusFilter {
            status: AssetStatus::Maintenance,
        };
        assert_eq!(intent.params().get_str("status"), Some("maintenance"));
    }

    #[test]
    fn test_intent_serializes_tagged() {
        let intent = Intent::DepartmentFilter {
            department: DepartmentMatch::Named("Finance".to_string()),
        };
        let json = serde_json::to_value(&intent).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "intent": "department_filter",
                "department": {"resolution": "named", "name": "Finance"}
            })
        );
    }
}
