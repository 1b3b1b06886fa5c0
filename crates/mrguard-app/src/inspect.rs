//! Offline inspection use cases: which rules are registered and which lines they claim.

use anyhow::Context;
use mrguard_domain::policy::EffectiveConfig;
use mrguard_domain::rules::RuleSet;
use mrguard_types::{LineRange, RepoPath};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleInfo {
    pub id: &'static str,
    pub description: &'static str,
    /// Ranges this rule claims in the inspected file; empty for plain listings.
    pub owned: Vec<LineRange>,
}

/// Rules the effective config enables, in registration order.
pub fn list_rules(cfg: &EffectiveConfig) -> anyhow::Result<Vec<RuleInfo>> {
    let rules = RuleSet::from_config(cfg, None).context("register rules")?;
    Ok(rules
        .iter()
        .map(|r| RuleInfo {
            id: r.id(),
            description: r.description(),
            owned: Vec::new(),
        })
        .collect())
}

/// Ranges each enabled rule claims in `text`. Rules that do not govern `path` are omitted.
pub fn owned_ranges(
    cfg: &EffectiveConfig,
    path: &RepoPath,
    text: &str,
) -> anyhow::Result<Vec<RuleInfo>> {
    let rules = RuleSet::from_config(cfg, None).context("register rules")?;
    Ok(rules
        .iter()
        .filter(|r| r.applies_to(path))
        .map(|r| RuleInfo {
            id: r.id(),
            description: r.description(),
            owned: r.owned_ranges(path, text),
        })
        .collect())
}
