use mrguard_types::{Decision, LineRange, ReviewReport};

fn label(decision: Decision) -> &'static str {
    match decision {
        Decision::Approve => "APPROVE",
        Decision::ManualReview => "MANUAL REVIEW",
    }
}

fn spans(ranges: &[LineRange]) -> String {
    let spans: Vec<String> = ranges
        .iter()
        .map(|r| {
            if r.start_line == r.end_line {
                format!("{}", r.start_line)
            } else {
                format!("{}-{}", r.start_line, r.end_line)
            }
        })
        .collect();
    spans.join(", ")
}

pub fn render_markdown(report: &ReviewReport) -> String {
    let mut out = String::new();

    out.push_str("# mrguard review\n\n");
    out.push_str(&format!(
        "- Decision: **{}**\n- Reason: {}\n- Files: {} approved / {} manual review ({} total)\n- Profile: `{}`\n\n",
        label(report.decision),
        report.reason,
        report.data.files_approved,
        report.data.files_manual_review,
        report.data.files_total,
        report.data.profile,
    ));

    if report.files.is_empty() {
        out.push_str("No changed files.\n");
        return out;
    }

    out.push_str("## Files\n\n");

    for f in &report.files {
        out.push_str(&format!(
            "- [{}] `{}`: {}\n",
            label(f.decision),
            f.path.as_str(),
            f.reason
        ));

        if !f.unowned.is_empty() {
            out.push_str(&format!("  - unowned lines: {}\n", spans(&f.unowned)));
        }
        if !f.unowned_removed.is_empty() {
            out.push_str(&format!(
                "  - unowned removed lines (target branch): {}\n",
                spans(&f.unowned_removed)
            ));
        }
        for r in &f.rules {
            out.push_str(&format!(
                "  - `{}` [{}]: {}\n",
                r.rule_id,
                label(r.decision),
                r.reason
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrguard_types::{
        FileDecision, RepoPath, ReviewData, RuleDecision, SCHEMA_REPORT_V1, ToolMeta,
    };
    use time::macros::datetime;

    fn report(files: Vec<FileDecision>, decision: Decision) -> ReviewReport {
        let manual = files
            .iter()
            .filter(|f| f.decision == Decision::ManualReview)
            .count() as u32;
        ReviewReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "mrguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2026-01-01 0:00 UTC),
            finished_at: datetime!(2026-01-01 0:00 UTC),
            project_id: Some(12),
            mr_iid: Some(2042),
            decision,
            reason: "summary".to_string(),
            data: ReviewData {
                profile: "strict".to_string(),
                files_total: files.len() as u32,
                files_approved: files.len() as u32 - manual,
                files_manual_review: manual,
            },
            files,
        }
    }

    #[test]
    fn renders_empty_report() {
        let md = render_markdown(&report(Vec::new(), Decision::Approve));
        assert!(md.contains("Decision: **APPROVE**"));
        assert!(md.contains("No changed files"));
    }

    #[test]
    fn renders_files_with_unowned_lines_and_rule_decisions() {
        let path = RepoPath::new("dataproducts/ebs/dev/product.yaml");
        let file = FileDecision {
            path: path.clone(),
            decision: Decision::ManualReview,
            code: "unowned_lines".to_string(),
            reason: "unowned lines changed".to_string(),
            unowned: vec![
                LineRange::single(path.clone(), 5),
                LineRange::new(path.clone(), 7, 9),
            ],
            unowned_removed: Vec::new(),
            rules: vec![RuleDecision {
                rule_id: "warehouse_rule".to_string(),
                decision: Decision::Approve,
                code: "safe_size_change".to_string(),
                reason: "safe warehouse size change: user SMALL -> XSMALL".to_string(),
                ranges: vec![LineRange::single(path, 3)],
                removed: Vec::new(),
            }],
        };

        let md = render_markdown(&report(vec![file], Decision::ManualReview));
        assert!(md.contains("Decision: **MANUAL REVIEW**"));
        assert!(md.contains("## Files"));
        assert!(md.contains("`dataproducts/ebs/dev/product.yaml`"));
        assert!(md.contains("unowned lines: 5, 7-9"));
        assert!(md.contains("`warehouse_rule` [APPROVE]"));
        assert!(md.contains("1 manual review (1 total)"));
    }

    #[test]
    fn renders_unowned_removed_lines_separately() {
        let path = RepoPath::new("dataproducts/ebs/dev/product.yaml");
        let file = FileDecision {
            path: path.clone(),
            decision: Decision::ManualReview,
            code: "unowned_lines".to_string(),
            reason: "unowned lines changed".to_string(),
            unowned: Vec::new(),
            unowned_removed: vec![LineRange::new(path, 2, 3)],
            rules: Vec::new(),
        };

        let md = render_markdown(&report(vec![file], Decision::ManualReview));
        assert!(md.contains("unowned removed lines (target branch): 2-3"));
        assert!(!md.contains("  - unowned lines:"));
    }
}
