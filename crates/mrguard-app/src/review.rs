//! The `review` use case: gather a merge request, evaluate rules, and produce a report.

use anyhow::Context;
use mrguard_domain::hunks::{self, DiffLines};
use mrguard_domain::model::{ChangedFile, FileContent, ReviewModel};
use mrguard_domain::rules::{MrContext, RuleSet};
use mrguard_domain::vcs::{MrDetails, MrFileChange, VersionControl};
use mrguard_settings::{MrguardConfigV1, Overrides, ResolvedConfig};
use mrguard_types::{RepoPath, ReviewReport, SCHEMA_REPORT_V1, ToolMeta};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Input for the review use case.
#[derive(Clone, Debug)]
pub struct ReviewInput<'a> {
    pub project_id: u64,
    pub mr_iid: u64,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the review use case.
#[derive(Clone, Debug)]
pub struct ReviewOutput {
    pub report: ReviewReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Parse and resolve config text; empty text means defaults.
pub fn resolve_settings(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        MrguardConfigV1::default()
    } else {
        mrguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    mrguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run the review use case against a version-control host.
pub fn run_review(
    input: ReviewInput<'_>,
    vcs: Arc<dyn VersionControl>,
) -> anyhow::Result<ReviewOutput> {
    let started_at = OffsetDateTime::now_utc();
    let ReviewInput {
        project_id,
        mr_iid,
        config_text,
        overrides,
    } = input;

    let resolved = resolve_settings(config_text, overrides)?;
    info!(
        project_id,
        mr_iid,
        profile = resolved.effective.profile.as_str(),
        "reviewing merge request"
    );

    let context = MrContext {
        project_id,
        mr_iid,
        vcs: Arc::clone(&vcs),
    };
    let rules = RuleSet::from_config(&resolved.effective, Some(context))
        .context("register rules")?;

    let changes = vcs
        .mr_changes(project_id, mr_iid)
        .context("list merge request changes")?;
    let details = vcs
        .mr_details(project_id, mr_iid)
        .context("fetch merge request details")?;

    let model = build_model(vcs.as_ref(), project_id, &details, &changes, &rules);
    let domain = mrguard_domain::evaluate(&model, &rules, &resolved.effective.profile);
    info!(
        decision = domain.decision.as_str(),
        files = domain.data.files_total,
        manual_review = domain.counts.manual_review,
        "review complete"
    );

    let report = ReviewReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        project_id: Some(project_id),
        mr_iid: Some(mr_iid),
        decision: domain.decision,
        reason: domain.reason,
        files: domain.files,
        data: domain.data,
    };

    Ok(ReviewOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "mrguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Content is fetched only for files some rule governs, and only for the sides the diff
/// touches: the source branch for added lines, the target branch for removed ones. Every other
/// file can only be decided by its unowned lines, so its text is never read.
fn build_model(
    vcs: &dyn VersionControl,
    project_id: u64,
    details: &MrDetails,
    changes: &[MrFileChange],
    rules: &RuleSet,
) -> ReviewModel {
    let source_project = details.source_project(project_id);

    let files = changes
        .iter()
        .map(|change| {
            let path = RepoPath::new(&change.new_path);
            let lines = hunks::classify(change);
            let (needs_new, needs_old) = match &lines {
                DiffLines::Hunks(c) => (!c.added.is_empty(), !c.removed.is_empty()),
                _ => (false, false),
            };

            let governed = rules.iter().any(|r| r.applies_to(&path));
            let content = if change.deleted_file {
                FileContent::Deleted
            } else if governed && needs_new {
                fetch(vcs, source_project, &change.new_path, &details.source_branch)
            } else {
                FileContent::Text(String::new())
            };
            let old_content = if change.new_file {
                FileContent::Deleted
            } else if governed && needs_old {
                fetch(vcs, project_id, &change.old_path, &details.target_branch)
            } else {
                FileContent::Text(String::new())
            };
            debug!(
                path = path.as_str(),
                old_path = change.old_path.as_str(),
                governed,
                needs_new,
                needs_old,
                "changed file"
            );

            ChangedFile {
                path,
                content,
                old_content,
                lines,
            }
        })
        .collect();

    ReviewModel { files }
}

fn fetch(vcs: &dyn VersionControl, project_id: u64, path: &str, git_ref: &str) -> FileContent {
    match vcs.fetch_file(project_id, path, git_ref) {
        Ok(text) => FileContent::Text(text),
        Err(err) => FileContent::Unavailable(err.to_string()),
    }
}
