use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `mrguard.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MrguardConfigV1 {
    /// Optional schema string for tooling (`mrguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset to start from: `strict` (default), `permissive`, or `locked`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Map of rule_id -> config.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// warehouse_rule: auto-approve size decreases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_decreases: Option<bool>,

    /// warehouse_rule: how many tiers an increase may climb and still auto-approve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_increase_steps: Option<u8>,

    /// warehouse_rule: highest tier an auto-approved increase may reach (e.g. `LARGE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
}
