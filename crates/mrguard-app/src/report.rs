use crate::review::tool_meta;
use anyhow::Context;
use mrguard_types::{Decision, ReviewData, ReviewReport, SCHEMA_REPORT_V1};
use time::OffsetDateTime;

pub fn serialize_report(report: &ReviewReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// A report for a run that failed before a decision was reached. It always asks for manual
/// review.
pub fn runtime_error_report(
    project_id: Option<u64>,
    mr_iid: Option<u64>,
    message: &str,
) -> ReviewReport {
    let now = OffsetDateTime::now_utc();
    ReviewReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        project_id,
        mr_iid,
        decision: Decision::ManualReview,
        reason: format!("{}: {message}", mrguard_types::ids::CODE_RUNTIME_ERROR),
        files: Vec::new(),
        data: ReviewData {
            profile: "unknown".to_string(),
            ..ReviewData::default()
        },
    }
}

/// Map decision to exit code: 0 = approve, 2 = manual review.
pub fn decision_exit_code(decision: Decision) -> i32 {
    match decision {
        Decision::Approve => 0,
        Decision::ManualReview => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_exit_codes() {
        assert_eq!(decision_exit_code(Decision::Approve), 0);
        assert_eq!(decision_exit_code(Decision::ManualReview), 2);
    }

    #[test]
    fn runtime_error_report_asks_for_review() {
        let report = runtime_error_report(Some(12), Some(2042), "connection refused");
        assert_eq!(report.decision, Decision::ManualReview);
        assert!(report.reason.contains("connection refused"));
        assert!(report.files.is_empty());

        let json = String::from_utf8(serialize_report(&report).expect("serialize")).expect("utf8");
        assert!(json.contains("\"decision\": \"manual_review\""));
        assert!(json.contains("\"schema\": \"mrguard.report.v1\""));
        assert!(json.contains("\"mr_iid\": 2042"));
    }
}
