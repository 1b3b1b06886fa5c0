//! Render and artifact-writing use cases.

use crate::report::serialize_report;
use anyhow::Context;
use camino::Utf8Path;
use mrguard_types::ReviewReport;

pub fn render_markdown(report: &ReviewReport) -> String {
    mrguard_render::render_markdown(report)
}

/// Write the JSON report, creating parent directories as needed.
pub fn write_report(path: &Utf8Path, report: &ReviewReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_bytes(path, &data).with_context(|| format!("write report: {path}"))
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes()).with_context(|| format!("write text: {path}"))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
