use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for mrguard reports.
pub const SCHEMA_REPORT_V1: &str = "mrguard.report.v1";

/// Outcome of evaluating a file (or a whole merge request).
///
/// There is no reject: the reviewer only auto-approves or escalates to a human. Variants are
/// ordered by strictness so that `max` picks the stricter of two decisions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    ManualReview,
}

impl Decision {
    /// Join two decisions; `ManualReview` wins.
    pub fn stricter(self, other: Decision) -> Decision {
        self.max(other)
    }

    pub fn is_approve(self) -> bool {
        self == Decision::Approve
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::ManualReview => "manual_review",
        }
    }
}

/// 1-based, inclusive span of lines in one file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub struct LineRange {
    pub file_path: RepoPath,
    pub start_line: u32,
    pub end_line: u32,
}

impl LineRange {
    /// Build a range, swapping the bounds if given backwards and clamping to line 1.
    pub fn new(file_path: RepoPath, start_line: u32, end_line: u32) -> Self {
        let (lo, hi) = if start_line <= end_line {
            (start_line, end_line)
        } else {
            (end_line, start_line)
        };
        Self {
            file_path,
            start_line: lo.max(1),
            end_line: hi.max(1),
        }
    }

    pub fn single(file_path: RepoPath, line: u32) -> Self {
        Self::new(file_path, line, line)
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn lines(&self) -> impl Iterator<Item = u32> {
        self.start_line..=self.end_line
    }

    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "{}:{}", self.file_path, self.start_line)
        } else {
            write!(f, "{}:{}-{}", self.file_path, self.start_line, self.end_line)
        }
    }
}

/// One rule's local decision over the lines it owns in one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleDecision {
    pub rule_id: String,
    pub decision: Decision,
    pub code: String,
    pub reason: String,

    /// Changed lines this rule was asked to decide over.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<LineRange>,

    /// Removed lines this rule claims, numbered in the target-branch file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<LineRange>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileDecision {
    pub path: RepoPath,
    pub decision: Decision,
    pub code: String,
    pub reason: String,

    /// Changed lines that no registered rule claims.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unowned: Vec<LineRange>,

    /// Removed lines that no rule claims in the target-branch file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unowned_removed: Vec<LineRange>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleDecision>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Summary counts for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ReviewData {
    pub profile: String,
    pub files_total: u32,
    pub files_approved: u32,
    pub files_manual_review: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mr_iid: Option<u64>,

    pub decision: Decision,
    pub reason: String,
    pub files: Vec<FileDecision>,
    pub data: ReviewData,
}
