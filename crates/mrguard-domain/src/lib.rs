//! Line-scoped policy evaluation.
//!
//! Input: the changed files of one merge request, each with its final content and changed lines.
//! Output: a decision per file and for the whole request.
//!
//! Rules claim line ranges they understand and decide only over those. Any changed line no rule
//! claims escalates its file to manual review. Network access happens only through the
//! [`vcs::VersionControl`] trait, implemented elsewhere.

#![forbid(unsafe_code)]

pub mod diff;
pub mod document;
pub mod hunks;
pub mod model;
pub mod policy;
pub mod report;
pub mod resolve;
pub mod rules;
pub mod sections;
pub mod sizes;
pub mod vcs;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
