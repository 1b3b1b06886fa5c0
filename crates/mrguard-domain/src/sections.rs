//! Cheap textual pre-pass that finds top-level YAML section markers.
//!
//! This never parses the document: ownership claims are computed from raw lines, and full
//! parsing happens only inside a rule's validation.

use mrguard_types::{LineRange, RepoPath};

#[derive(Clone, Copy, Debug)]
pub struct SectionScanner {
    markers: &'static [&'static str],
}

impl SectionScanner {
    pub const fn new(markers: &'static [&'static str]) -> Self {
        Self { markers }
    }

    /// One range per marker line, in text order.
    ///
    /// A range covers the marker line only, not the nested block beneath it. Lines inside the
    /// block stay unowned.
    pub fn scan(&self, path: &RepoPath, text: &str) -> Vec<LineRange> {
        text.lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let key = top_level_key(line)?;
                self.markers
                    .contains(&key)
                    .then(|| LineRange::single(path.clone(), idx as u32 + 1))
            })
            .collect()
    }
}

/// The mapping key of an unindented `key:` line, unquoted.
fn top_level_key(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if first.is_whitespace() || matches!(first, '#' | '-' | '[' | '{') {
        return None;
    }
    let colon = line.find(':')?;
    let rest = &line[colon + 1..];
    if !(rest.is_empty() || rest.starts_with([' ', '\t', '#'])) {
        return None;
    }
    let key = line[..colon].trim_end();
    let key = key
        .strip_prefix('"')
        .and_then(|k| k.strip_suffix('"'))
        .or_else(|| key.strip_prefix('\'').and_then(|k| k.strip_suffix('\'')))
        .unwrap_or(key);
    Some(key)
}
