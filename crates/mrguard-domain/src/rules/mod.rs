//! The rule contract and the ordered rule registry.

use crate::policy::EffectiveConfig;
use crate::vcs::VersionControl;
use mrguard_types::{Decision, LineRange, RepoPath, ids};
use std::sync::Arc;

mod warehouse;


pub use warehouse::{WarehouseRule, is_data_product_file};

/// A rule's local decision over the lines it was asked about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleVerdict {
    pub decision: Decision,
    pub code: &'static str,
    pub reason: String,
}

impl RuleVerdict {
    pub fn approve(code: &'static str, reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Approve,
            code,
            reason: reason.into(),
        }
    }

    pub fn manual_review(code: &'static str, reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::ManualReview,
            code,
            reason: reason.into(),
        }
    }
}

/// Identity of the merge request under review, plus the host to read it from.
#[derive(Clone)]
pub struct MrContext {
    pub project_id: u64,
    pub mr_iid: u64,
    pub vcs: Arc<dyn VersionControl>,
}

impl std::fmt::Debug for MrContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MrContext")
            .field("project_id", &self.project_id)
            .field("mr_iid", &self.mr_iid)
            .finish_non_exhaustive()
    }
}

/// Every rule claims line ranges and decides over only those lines.
pub trait Rule: Send + Sync {
    /// Stable short name, unique across the registry.
    fn id(&self) -> &'static str;

    /// Which files and sections the rule governs.
    fn description(&self) -> &'static str;

    /// Domain file filter.
    fn applies_to(&self, path: &RepoPath) -> bool;

    /// Line ranges of `text` the rule claims. Empty for files it does not govern.
    fn owned_ranges(&self, path: &RepoPath, text: &str) -> Vec<LineRange>;

    /// Decide over `changed`: added lines of the source-branch `text`, already restricted to
    /// this rule's ranges. Empty when the rule only claims removed lines.
    fn validate(&self, path: &RepoPath, text: &str, changed: &[LineRange]) -> RuleVerdict;
}

#[derive(Debug, thiserror::Error)]
#[error("rule id registered twice: {0}")]
pub struct DuplicateRuleId(pub String);

/// Rules in explicit registration order.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every rule the config enables.
    pub fn from_config(
        cfg: &EffectiveConfig,
        context: Option<MrContext>,
    ) -> Result<Self, DuplicateRuleId> {
        let mut set = RuleSet::new();
        if cfg.rule_enabled(ids::RULE_WAREHOUSE) {
            set.register(Box::new(WarehouseRule::new(cfg.warehouse.clone(), context)))?;
        }
        Ok(set)
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<&mut Self, DuplicateRuleId> {
        if self.rules.iter().any(|r| r.id() == rule.id()) {
            return Err(DuplicateRuleId(rule.id().to_string()));
        }
        self.rules.push(rule);
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| &**r as &dyn Rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|r| r.id())).finish()
    }
}
