//! Operational status of an asset.

use serde::{Deserialize, Serialize};

/// Asset operational status.
///
/// Matches the status column of the inventory's asset model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    Inactive,
    Maintenance,
    Disposed,
}

impl AssetStatus {
    /// Value sent to the inventory service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
            Self::Disposed => "disposed",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            "disposed" => Ok(Self::Disposed),
            _ => Err(format!("invalid asset status: {s}")),
        }
    }
}

impl From<AssetStatus> for crate::ParamValue {
    fn from(status: AssetStatus) -> Self {
        Self::Text(status.as_str().to_string())
    }
}
