use crate::hunks::{DiffLines, LineChanges};
use mrguard_types::RepoPath;

/// Everything the aggregator needs about one merge request.
#[derive(Clone, Debug, Default)]
pub struct ReviewModel {
    pub files: Vec<ChangedFile>,
}

#[derive(Clone, Debug)]
pub struct ChangedFile {
    pub path: RepoPath,
    /// Content on the source branch, after the change.
    pub content: FileContent,
    /// Content on the target branch, before the change. Read only when lines were removed.
    pub old_content: FileContent,
    pub lines: DiffLines,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    /// Absent on this side of the request; the content is empty.
    Deleted,
    /// Fetching the content failed.
    Unavailable(String),
}

impl ChangedFile {
    /// A file whose `added` lines changed in `text`.
    pub fn new(path: impl Into<RepoPath>, text: impl Into<String>, added: &[u32]) -> Self {
        Self {
            path: path.into(),
            content: FileContent::Text(text.into()),
            old_content: FileContent::Text(String::new()),
            lines: DiffLines::Hunks(LineChanges {
                added: added.iter().copied().collect(),
                removed: Default::default(),
            }),
        }
    }

    /// Also remove `removed` lines of `old_text`.
    pub fn with_removed(mut self, old_text: impl Into<String>, removed: &[u32]) -> Self {
        self.old_content = FileContent::Text(old_text.into());
        if let DiffLines::Hunks(lines) = &mut self.lines {
            lines.removed = removed.iter().copied().collect();
        }
        self
    }
}
