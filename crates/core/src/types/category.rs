//! Asset categories known to the classifier.

use serde::{Deserialize, Serialize};

/// Asset category, as named in the inventory.
///
/// The display name is the exact value the inventory service filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "IT Equipment")]
    ItEquipment,
    #[serde(rename = "Vehicles")]
    Vehicles,
    #[serde(rename = "Tools")]
    Tools,
}

impl AssetCategory {
    /// Display name, also used as the `category` tool parameter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ItEquipment => "IT Equipment",
            Self::Vehicles => "Vehicles",
            Self::Tools => "Tools",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<AssetCategory> for crate::ParamValue {
    fn from(category: AssetCategory) -> Self {
        Self::Text(category.name().to_string())
    }
}
