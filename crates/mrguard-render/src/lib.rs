//! Rendering utilities for merge request surfaces (Markdown comments).

#![forbid(unsafe_code)]

mod markdown;

pub use markdown::render_markdown;
