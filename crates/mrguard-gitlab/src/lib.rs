//! GitLab adapter: merge request metadata, change lists, and raw file content over REST v4.
//!
//! This crate is allowed to do network IO. Everything it returns is already mapped into
//! `mrguard-domain` types.

#![forbid(unsafe_code)]

mod api;
mod client;

pub use client::GitLabClient;
