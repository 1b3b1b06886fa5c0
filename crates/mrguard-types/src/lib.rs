//! Stable DTOs and IDs used across the mrguard workspace.
//!
//! This crate is intentionally boring:
//! - decision values and line ranges exchanged between rules and the aggregator
//! - stable string IDs for rules and reason codes
//! - canonical repo-relative path handling
//! - the serialized review report

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod receipt;

pub use path::RepoPath;
pub use receipt::{
    Decision, FileDecision, LineRange, ReviewData, ReviewReport, RuleDecision, ToolMeta,
    SCHEMA_REPORT_V1,
};
