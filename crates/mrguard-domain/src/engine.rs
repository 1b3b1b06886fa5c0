use crate::hunks::{DiffLines, owned_lines, to_ranges};
use crate::model::{ChangedFile, FileContent, ReviewModel};
use crate::report::{DecisionCounts, DomainReport};
use crate::rules::{Rule, RuleSet};
use mrguard_types::{Decision, FileDecision, RepoPath, ReviewData, RuleDecision, ids};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Decide every changed file, then the request as a whole.
///
/// Files are independent and evaluated in parallel; the result keeps input order.
pub fn evaluate(model: &ReviewModel, rules: &RuleSet, profile: &str) -> DomainReport {
    let files: Vec<FileDecision> = model
        .files
        .par_iter()
        .map(|file| evaluate_file(file, rules))
        .collect();

    let counts = DecisionCounts::from_files(&files);
    let total = files.len() as u32;

    let (decision, reason) = if files.is_empty() {
        (Decision::Approve, "no changed files".to_string())
    } else if counts.manual_review == 0 {
        (
            Decision::Approve,
            format!("all {total} changed file(s) are safe to auto-approve"),
        )
    } else {
        (
            Decision::ManualReview,
            format!(
                "{} of {total} changed file(s) require manual review",
                counts.manual_review
            ),
        )
    };

    DomainReport {
        decision,
        reason,
        data: ReviewData {
            profile: profile.to_string(),
            files_total: total,
            files_approved: counts.approved,
            files_manual_review: counts.manual_review,
        },
        files,
        counts,
    }
}

fn evaluate_file(file: &ChangedFile, rules: &RuleSet) -> FileDecision {
    let path = &file.path;

    let changes = match &file.lines {
        DiffLines::Hunks(changes) if !changes.is_empty() => changes,
        DiffLines::Hunks(_) => {
            return settled(path, Decision::Approve, ids::CODE_NO_CHANGES, "no changed lines");
        }
        DiffLines::NoContent => {
            return settled(
                path,
                Decision::Approve,
                ids::CODE_NO_CHANGES,
                "no content lines changed",
            );
        }
        DiffLines::Opaque(why) => {
            return settled(
                path,
                Decision::ManualReview,
                ids::CODE_DIFF_NOT_INSPECTABLE,
                format!("changed lines cannot be inspected: {why}"),
            );
        }
    };

    let new_text = side_text(&file.content, !changes.added.is_empty());
    let old_text = side_text(&file.old_content, !changes.removed.is_empty());
    let (new_text, old_text) = match (new_text, old_text) {
        (Ok(new_text), Ok(old_text)) => (new_text, old_text),
        (Err(why), _) | (_, Err(why)) => {
            return settled(
                path,
                Decision::ManualReview,
                ids::CODE_CONTENT_UNAVAILABLE,
                format!("could not evaluate file: {why}"),
            );
        }
    };

    let mut claimed_added: BTreeSet<u32> = BTreeSet::new();
    let mut claimed_removed: BTreeSet<u32> = BTreeSet::new();
    let mut rule_decisions: Vec<RuleDecision> = Vec::new();

    for rule in rules.iter() {
        let added = claim(rule, path, new_text, &changes.added);
        let removed = claim(rule, path, old_text, &changes.removed);
        if added.is_empty() && removed.is_empty() {
            continue;
        }
        claimed_added.extend(&added);
        claimed_removed.extend(&removed);

        let ranges = to_ranges(path, &added);
        let verdict = rule.validate(path, new_text, &ranges);
        debug!(
            rule = rule.id(),
            path = path.as_str(),
            decision = verdict.decision.as_str(),
            "rule decided"
        );
        rule_decisions.push(RuleDecision {
            rule_id: rule.id().to_string(),
            decision: verdict.decision,
            code: verdict.code.to_string(),
            reason: verdict.reason,
            ranges,
            removed: to_ranges(path, &removed),
        });
    }

    let unowned_added: BTreeSet<u32> = changes.added.difference(&claimed_added).copied().collect();
    let unowned_removed: BTreeSet<u32> =
        changes.removed.difference(&claimed_removed).copied().collect();
    let unowned = to_ranges(path, &unowned_added);
    let unowned_removed = to_ranges(path, &unowned_removed);

    let joined = rule_decisions
        .iter()
        .map(|d| d.decision)
        .fold(Decision::Approve, Decision::stricter);

    let (decision, code, reason) = if !unowned.is_empty() || !unowned_removed.is_empty() {
        let mut spans: Vec<String> = unowned.iter().map(|r| r.to_string()).collect();
        spans.extend(unowned_removed.iter().map(|r| format!("{r} (removed)")));
        (
            Decision::ManualReview,
            ids::CODE_UNOWNED_LINES,
            format!("unowned lines changed: {}", spans.join(", ")),
        )
    } else if !joined.is_approve() {
        let escalations: Vec<String> = rule_decisions
            .iter()
            .filter(|d| !d.decision.is_approve())
            .map(|d| format!("{}: {}", d.rule_id, d.reason))
            .collect();
        (
            Decision::ManualReview,
            ids::CODE_RULE_ESCALATED,
            escalations.join("; "),
        )
    } else {
        let approvers: Vec<&str> = rule_decisions.iter().map(|d| d.rule_id.as_str()).collect();
        (
            Decision::Approve,
            ids::CODE_ALL_OWNED_APPROVED,
            format!("all changed lines approved by {}", approvers.join(", ")),
        )
    };

    FileDecision {
        path: path.clone(),
        decision,
        code: code.to_string(),
        reason,
        unowned,
        unowned_removed,
        rules: rule_decisions,
    }
}

/// A decision reached before any rule was consulted.
fn settled(
    path: &RepoPath,
    decision: Decision,
    code: &str,
    reason: impl Into<String>,
) -> FileDecision {
    FileDecision {
        path: path.clone(),
        decision,
        code: code.to_string(),
        reason: reason.into(),
        unowned: Vec::new(),
        unowned_removed: Vec::new(),
        rules: Vec::new(),
    }
}

/// Text of one side, or the fetch failure. A side with no changed lines is never read.
fn side_text(content: &FileContent, needed: bool) -> Result<&str, &str> {
    if !needed {
        return Ok("");
    }
    match content {
        FileContent::Text(text) => Ok(text),
        FileContent::Deleted => Ok(""),
        FileContent::Unavailable(why) => Err(why),
    }
}

/// The subset of `lines` that `rule` claims in `text`.
fn claim(rule: &dyn Rule, path: &RepoPath, text: &str, lines: &BTreeSet<u32>) -> BTreeSet<u32> {
    if lines.is_empty() {
        return BTreeSet::new();
    }
    owned_lines(lines, &rule.owned_ranges(path, text))
}
