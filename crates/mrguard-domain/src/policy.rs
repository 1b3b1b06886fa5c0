use crate::sizes::WarehouseSize;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct RulePolicy {
    pub enabled: bool,
}

impl RulePolicy {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// What counts as a safe warehouse size change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarehousePolicy {
    /// Decreases auto-approve.
    pub allow_decreases: bool,
    /// Tiers an increase may climb and still auto-approve; 0 escalates every increase.
    pub max_increase_steps: u8,
    /// Auto-approved increases may not land above this tier.
    pub max_size: Option<WarehouseSize>,
}

impl Default for WarehousePolicy {
    fn default() -> Self {
        Self {
            allow_decreases: true,
            max_increase_steps: 0,
            max_size: None,
        }
    }
}

impl WarehousePolicy {
    /// `Ok(())` if the change may auto-approve, otherwise why not.
    pub fn check(&self, from: WarehouseSize, to: WarehouseSize) -> Result<(), String> {
        if to < from {
            return if self.allow_decreases {
                Ok(())
            } else {
                Err("decreases require review".to_string())
            };
        }

        let steps = to.ordinal() - from.ordinal();
        if steps > self.max_increase_steps {
            return Err(format!(
                "increase of {steps} tier(s) exceeds the allowed {}",
                self.max_increase_steps
            ));
        }
        if let Some(ceiling) = self.max_size
            && to > ceiling
        {
            return Err(format!("{to} is above the auto-approve ceiling {ceiling}"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub rules: BTreeMap<String, RulePolicy>,
    pub warehouse: WarehousePolicy,
}

impl EffectiveConfig {
    pub fn rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).is_some_and(|p| p.enabled)
    }
}
