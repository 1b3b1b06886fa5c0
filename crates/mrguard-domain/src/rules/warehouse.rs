use super::{MrContext, Rule, RuleVerdict};
use crate::diff::WarehouseChange;
use crate::policy::WarehousePolicy;
use crate::resolve;
use crate::sections::SectionScanner;
use crate::sizes::WarehouseSize;
use mrguard_types::{LineRange, RepoPath, ids};
use tracing::{debug, warn};

const DESCRIPTOR_NAMES: [&str; 2] = ["product.yaml", "product.yml"];
const SECTIONS: SectionScanner = SectionScanner::new(&["warehouses", "service_account"]);

/// `true` when the final path component is a data product descriptor, ignoring case.
pub fn is_data_product_file(path: &RepoPath) -> bool {
    path.file_name().is_some_and(|name| {
        DESCRIPTOR_NAMES
            .iter()
            .any(|known| name.eq_ignore_ascii_case(known))
    })
}

/// Auto-approves warehouse size changes in `product.yaml` that the policy deems safe.
pub struct WarehouseRule {
    policy: WarehousePolicy,
    context: Option<MrContext>,
}

impl WarehouseRule {
    pub fn new(policy: WarehousePolicy, context: Option<MrContext>) -> Self {
        Self { policy, context }
    }

    fn assess(&self, changes: &[WarehouseChange]) -> RuleVerdict {
        if changes.is_empty() {
            return RuleVerdict::manual_review(
                ids::CODE_UNCLASSIFIED,
                "no warehouse size changes could be classified",
            );
        }

        let mut violations = Vec::new();
        for change in changes {
            // The diff only emits rankable sizes, so both lookups succeed.
            let (Some(from), Some(to)) = (
                WarehouseSize::from_label(&change.from_size),
                WarehouseSize::from_label(&change.to_size),
            ) else {
                violations.push(format!(
                    "{}: {} -> {} (unranked size)",
                    change.locator(),
                    change.from_size,
                    change.to_size
                ));
                continue;
            };
            if let Err(why) = self.policy.check(from, to) {
                violations.push(format!("{}: {from} -> {to} ({why})", change.locator()));
            }
        }

        if violations.is_empty() {
            let summary: Vec<String> = changes
                .iter()
                .map(|c| format!("{} {} -> {}", c.warehouse_type, c.from_size, c.to_size))
                .collect();
            RuleVerdict::approve(
                ids::CODE_SAFE_SIZE_CHANGE,
                format!("safe warehouse size change: {}", summary.join(", ")),
            )
        } else {
            RuleVerdict::manual_review(
                ids::CODE_UNSAFE_SIZE_CHANGE,
                format!(
                    "warehouse size change requires manual review: {}",
                    violations.join("; ")
                ),
            )
        }
    }
}

impl Rule for WarehouseRule {
    fn id(&self) -> &'static str {
        ids::RULE_WAREHOUSE
    }

    fn description(&self) -> &'static str {
        "Auto-approves safe warehouse size changes in data product files (product.yaml / product.yml); \
         claims the warehouses and service_account sections"
    }

    fn applies_to(&self, path: &RepoPath) -> bool {
        is_data_product_file(path)
    }

    fn owned_ranges(&self, path: &RepoPath, text: &str) -> Vec<LineRange> {
        if !self.applies_to(path) {
            return Vec::new();
        }
        SECTIONS.scan(path, text)
    }

    fn validate(&self, path: &RepoPath, _text: &str, changed: &[LineRange]) -> RuleVerdict {
        if !self.applies_to(path) {
            return RuleVerdict::approve(
                ids::CODE_NOT_GOVERNED,
                "Not a warehouse file; not a file this rule governs",
            );
        }

        let Some(ctx) = self.context.as_ref().filter(|_| !changed.is_empty()) else {
            return RuleVerdict::manual_review(
                ids::CODE_NEEDS_CONTEXT,
                "Warehouse validation requires full context (merge request branches and changed lines)",
            );
        };

        match resolve::analyze_file(ctx.vcs.as_ref(), ctx.project_id, ctx.mr_iid, path) {
            Ok(changes) => {
                debug!(path = path.as_str(), changes = changes.len(), "warehouse diff");
                self.assess(&changes)
            }
            Err(err) => {
                warn!(
                    project_id = ctx.project_id,
                    mr_iid = ctx.mr_iid,
                    path = path.as_str(),
                    error = %err,
                    "warehouse evaluation failed"
                );
                RuleVerdict::manual_review(
                    ids::CODE_EVALUATION_FAILED,
                    format!("warehouse evaluation failed: {err}"),
                )
            }
        }
    }
}
