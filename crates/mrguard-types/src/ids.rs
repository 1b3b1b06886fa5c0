//! Stable identifiers for rules and decision reason codes.
//!
//! `rule_id` is a short snake_case name, unique across the registry. `code` discriminates
//! why a file or rule landed on its decision.

// Rules
pub const RULE_WAREHOUSE: &str = "warehouse_rule";

// Codes: aggregator
pub const CODE_NO_CHANGES: &str = "no_changes";
pub const CODE_ALL_OWNED_APPROVED: &str = "all_owned_approved";
pub const CODE_UNOWNED_LINES: &str = "unowned_lines";
pub const CODE_RULE_ESCALATED: &str = "rule_escalated";
pub const CODE_CONTENT_UNAVAILABLE: &str = "content_unavailable";
pub const CODE_DIFF_NOT_INSPECTABLE: &str = "diff_not_inspectable";

// Codes: warehouse_rule
pub const CODE_NOT_GOVERNED: &str = "not_governed";
pub const CODE_NEEDS_CONTEXT: &str = "needs_context";
pub const CODE_SAFE_SIZE_CHANGE: &str = "safe_size_change";
pub const CODE_UNSAFE_SIZE_CHANGE: &str = "unsafe_size_change";
pub const CODE_UNCLASSIFIED: &str = "unclassified";
pub const CODE_EVALUATION_FAILED: &str = "evaluation_failed";

// Tool-level
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
