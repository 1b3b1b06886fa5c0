use mrguard_domain::policy::{EffectiveConfig, RulePolicy, WarehousePolicy};
use mrguard_domain::sizes::WarehouseSize;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "permissive" => permissive_profile(),
        "locked" => locked_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        rules: default_rules(),
        warehouse: WarehousePolicy::default(),
    }
}

fn permissive_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "permissive".to_string(),
        rules: default_rules(),
        warehouse: WarehousePolicy {
            allow_decreases: true,
            max_increase_steps: 1,
            max_size: Some(WarehouseSize::Large),
        },
    }
}

fn locked_profile() -> EffectiveConfig {
    // Every warehouse change goes to a human.
    EffectiveConfig {
        profile: "locked".to_string(),
        rules: default_rules(),
        warehouse: WarehousePolicy {
            allow_decreases: false,
            max_increase_steps: 0,
            max_size: None,
        },
    }
}

fn default_rules() -> BTreeMap<String, RulePolicy> {
    use mrguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(RULE_WAREHOUSE.to_string(), RulePolicy::enabled());

    m
}
