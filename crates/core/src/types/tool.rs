//! Tool vocabulary of the inventory-data service.
//!
//! A [`ToolInvocation`] is the unit of work handed from the classifier to the
//! dispatcher: a fixed [`ToolName`] plus a bag of string/integer parameters
//! that serializes to the JSON object the service expects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named read operations exposed by the inventory-data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Free-text search over asset names and models.
    SearchAssets,
    /// Totals: asset count, total value, active and critical counts.
    GetAssetSummary,
    /// Assets in one category.
    GetAssetsByCategory,
    /// Assets owned by one department.
    GetAssetsByDepartment,
    /// Assets with a given operational status.
    GetAssetsByStatus,
    /// Assets at a city, building, room or office.
    GetAssetsByLocation,
}

impl ToolName {
    /// Every tool the service exposes, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::SearchAssets,
        Self::GetAssetSummary,
        Self::GetAssetsByCategory,
        Self::GetAssetsByDepartment,
        Self::GetAssetsByStatus,
        Self::GetAssetsByLocation,
    ];

    /// Wire name used in the `call/{tool}` path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchAssets => "search_assets",
            Self::GetAssetSummary => "get_asset_summary",
            Self::GetAssetsByCategory => "get_assets_by_category",
            Self::GetAssetsByDepartment => "get_assets_by_department",
            Self::GetAssetsByStatus => "get_assets_by_status",
            Self::GetAssetsByLocation => "get_assets_by_location",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("unknown tool: {s}"))
    }
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Text(String),
}

impl ParamValue {
    /// The text value, if this is a string parameter.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The integer value, if this is an integer parameter.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// Parameters for a tool call, serialized as a flat JSON object.
///
/// Keys are kept sorted so the serialized payload is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolParams(BTreeMap<String, ParamValue>);

impl ToolParams {
    /// Create an empty parameter bag.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a parameter, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Look up a string parameter.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// Look up an integer parameter.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ParamValue::as_i64)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A concrete call against the inventory-data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Which tool to call.
    pub name: ToolName,
    /// Parameters sent as the JSON request body.
    pub params: ToolParams,
}

impl ToolInvocation {
    /// Create an invocation with parameters.
    #[must_use]
    pub const fn new(name: ToolName, params: ToolParams) -> Self {
        Self { name, params }
    }

    /// Create an invocation that takes no parameters.
    #[must_use]
    pub const fn bare(name: ToolName) -> Self {
        Self::new(name, ToolParams::new())
    }
}
