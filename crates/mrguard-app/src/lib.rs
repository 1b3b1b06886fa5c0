//! Use case orchestration for mrguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. The version-control adapter is injected by the caller.
//!
//! The CLI crate depends on this; it only handles argument parsing, I/O, and exit codes.

#![forbid(unsafe_code)]

mod inspect;
mod render;
mod report;
mod review;

pub use inspect::{RuleInfo, list_rules, owned_ranges};
pub use render::{render_markdown, write_report, write_text};
pub use report::{decision_exit_code, runtime_error_report, serialize_report};
pub use review::{ReviewInput, ReviewOutput, resolve_settings, run_review};
