//! Typed view of a data product descriptor (`product.yaml`).
//!
//! Only the fields the rules look at are modeled; unknown keys are ignored.

use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DataProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, rename = "rover_group", alias = "owner_group")]
    pub owner_group: String,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Warehouse {
    #[serde(default, rename = "type")]
    pub warehouse_type: String,
    #[serde(default)]
    pub size: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Tags {
    #[serde(default)]
    pub data_product: String,
}

impl DataProduct {
    /// A document with no warehouses, used for the missing side of an added or deleted file.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Parse descriptor text. Blank input yields an empty document.
pub fn parse_data_product(text: &str) -> Result<DataProduct, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(DataProduct::empty());
    }
    serde_yaml::from_str(text)
}
