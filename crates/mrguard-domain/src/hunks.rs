//! Changed-line extraction from unified diff hunks.
//!
//! Added lines are numbered in the new (source-branch) file, removed lines in the old
//! (target-branch) file. The two sets are never mixed.

use crate::vcs::MrFileChange;
use mrguard_types::{LineRange, RepoPath};
use std::collections::BTreeSet;

/// Lines a diff touches on each side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineChanges {
    /// Added lines, numbered in the source-branch file.
    pub added: BTreeSet<u32>,
    /// Removed lines, numbered in the target-branch file.
    pub removed: BTreeSet<u32>,
}

impl LineChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// What a change entry reveals about its lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLines {
    Hunks(LineChanges),
    /// Pure rename, mode change, or an empty file added or removed.
    NoContent,
    /// Binary, too large, collapsed, or otherwise without hunks: changed lines are unknown.
    Opaque(String),
}

/// Classify a change entry. Only entries that provably touch no content line are
/// [`DiffLines::NoContent`].
pub fn classify(change: &MrFileChange) -> DiffLines {
    if change.too_large || change.collapsed {
        return DiffLines::Opaque("diff too large or collapsed by the host".to_string());
    }
    if is_binary(&change.diff) {
        return DiffLines::Opaque("binary file changed".to_string());
    }
    if let Some(lines) = parse_hunks(&change.diff) {
        return DiffLines::Hunks(lines);
    }

    let structural =
        change.renamed_file || change.mode_changed() || change.new_file || change.deleted_file;
    if change.diff.trim().is_empty() && structural {
        DiffLines::NoContent
    } else {
        DiffLines::Opaque("diff has no hunks".to_string())
    }
}

fn is_binary(diff: &str) -> bool {
    diff.lines().any(|line| {
        (line.starts_with("Binary files ") && line.trim_end().ends_with(" differ"))
            || line.starts_with("GIT binary patch")
    })
}

/// Added and removed lines of a unified diff; `None` when it has no hunk header.
pub fn parse_hunks(diff: &str) -> Option<LineChanges> {
    let mut out = LineChanges::default();
    let mut seen_hunk = false;
    // (old line, new line) of the next hunk body line.
    let mut cursor: Option<(u32, u32)> = None;

    for line in diff.lines() {
        if let Some(header) = line.strip_prefix("@@") {
            seen_hunk = true;
            cursor = parse_start(header, '-').zip(parse_start(header, '+'));
            continue;
        }
        // File headers before the first hunk.
        let Some((old, new)) = cursor.as_mut() else {
            continue;
        };
        match line.as_bytes().first() {
            Some(b'+') => {
                out.added.insert((*new).max(1));
                *new = new.saturating_add(1);
            }
            Some(b'-') => {
                out.removed.insert((*old).max(1));
                *old = old.saturating_add(1);
            }
            Some(b'\\') => {}
            _ => {
                *old = old.saturating_add(1);
                *new = new.saturating_add(1);
            }
        }
    }

    seen_hunk.then_some(out)
}

/// `-a,b +c,d @@ ...` -> `a` for `-`, `c` for `+`.
fn parse_start(header: &str, sign: char) -> Option<u32> {
    let at = header.find(sign)?;
    let digits: String = header[at + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Compress a set of line numbers into sorted, non-overlapping ranges.
pub fn to_ranges(path: &RepoPath, lines: &BTreeSet<u32>) -> Vec<LineRange> {
    let mut ranges: Vec<LineRange> = Vec::new();
    for &line in lines {
        match ranges.last_mut() {
            Some(last) if last.end_line.checked_add(1) == Some(line) => last.end_line = line,
            _ => ranges.push(LineRange::single(path.clone(), line)),
        }
    }
    ranges
}

/// Changed lines that fall inside at least one of `owned`.
pub fn owned_lines(changed: &BTreeSet<u32>, owned: &[LineRange]) -> BTreeSet<u32> {
    changed
        .iter()
        .copied()
        .filter(|line| owned.iter().any(|r| r.contains(*line)))
        .collect()
}
