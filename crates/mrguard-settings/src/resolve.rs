use crate::{model::MrguardConfigV1, presets};
use anyhow::Context;
use mrguard_domain::policy::EffectiveConfig;
use mrguard_domain::sizes::WarehouseSize;
use mrguard_types::ids;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: MrguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // per-rule overrides
    for (rule_id, rc) in cfg.rules.iter() {
        let Some(entry) = effective.rules.get_mut(rule_id) else {
            anyhow::bail!("unknown rule in config: {rule_id}");
        };

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }

        if rule_id == ids::RULE_WAREHOUSE {
            if let Some(allow) = rc.allow_decreases {
                effective.warehouse.allow_decreases = allow;
            }
            if let Some(steps) = rc.max_increase_steps {
                effective.warehouse.max_increase_steps = steps;
            }
            if let Some(label) = rc.max_size.as_deref() {
                effective.warehouse.max_size = Some(
                    parse_size(label).with_context(|| format!("invalid max_size for {rule_id}"))?,
                );
            }
        }
    }

    Ok(ResolvedConfig { effective })
}

fn parse_size(v: &str) -> anyhow::Result<WarehouseSize> {
    WarehouseSize::from_label(v).with_context(|| {
        let known: Vec<&str> = WarehouseSize::ALL.iter().map(|s| s.label()).collect();
        format!("unknown warehouse size: {v} (expected one of {})", known.join("|"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn empty_config_is_strict() {
        let resolved = resolve_config(MrguardConfigV1::default(), Overrides::default())
            .expect("resolve");
        let eff = resolved.effective;
        assert_eq!(eff.profile, "strict");
        assert!(eff.rule_enabled(ids::RULE_WAREHOUSE));
        assert!(eff.warehouse.allow_decreases);
        assert_eq!(eff.warehouse.max_increase_steps, 0);
    }

    #[test]
    fn rule_overrides_apply_on_top_of_profile() {
        let cfg = parse_config_toml(
            r#"
profile = "locked"

[rules.warehouse_rule]
allow_decreases = true
max_increase_steps = 2
max_size = "XLARGE"
"#,
        )
        .expect("parse");
        let eff = resolve_config(cfg, Overrides::default())
            .expect("resolve")
            .effective;
        assert_eq!(eff.profile, "locked");
        assert!(eff.warehouse.allow_decreases);
        assert_eq!(eff.warehouse.max_increase_steps, 2);
        assert_eq!(eff.warehouse.max_size, Some(WarehouseSize::XLarge));
    }

    #[test]
    fn cli_profile_wins_over_config() {
        let cfg = parse_config_toml("profile = \"locked\"\n").expect("parse");
        let eff = resolve_config(
            cfg,
            Overrides {
                profile: Some("permissive".to_string()),
            },
        )
        .expect("resolve")
        .effective;
        assert_eq!(eff.profile, "permissive");
        assert_eq!(eff.warehouse.max_size, Some(WarehouseSize::Large));
    }

    #[test]
    fn disabling_a_rule() {
        let cfg = parse_config_toml("[rules.warehouse_rule]\nenabled = false\n").expect("parse");
        let eff = resolve_config(cfg, Overrides::default())
            .expect("resolve")
            .effective;
        assert!(!eff.rule_enabled(ids::RULE_WAREHOUSE));
    }

    #[test]
    fn unknown_rule_and_size_are_errors() {
        let cfg = parse_config_toml("[rules.consumer_rule]\nenabled = true\n").expect("parse");
        assert!(resolve_config(cfg, Overrides::default()).is_err());

        let cfg = parse_config_toml("[rules.warehouse_rule]\nmax_size = \"HUGE\"\n").expect("parse");
        let err = resolve_config(cfg, Overrides::default()).expect_err("bad size");
        assert!(format!("{err:#}").contains("HUGE"));
    }

    #[test]
    fn unknown_profile_falls_back_to_strict() {
        let cfg = parse_config_toml("profile = \"whatever\"\n").expect("parse");
        let eff = resolve_config(cfg, Overrides::default())
            .expect("resolve")
            .effective;
        assert_eq!(eff.profile, "strict");
    }
}
