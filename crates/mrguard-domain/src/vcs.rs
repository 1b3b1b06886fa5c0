//! The version-control collaborator consumed by the resolver and the review use case.

/// Merge request metadata needed to locate the source side of a change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MrDetails {
    pub source_branch: String,
    pub target_branch: String,
    /// Zero when the host did not report one.
    pub source_project_id: u64,
}

impl MrDetails {
    /// Project to read the source branch from.
    ///
    /// Cross-fork requests declare a different, non-zero source project; everything else reads
    /// from the target project.
    pub fn source_project(&self, target_project_id: u64) -> u64 {
        if self.source_project_id != 0 && self.source_project_id != target_project_id {
            self.source_project_id
        } else {
            target_project_id
        }
    }
}

/// One file entry of a merge request's change list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MrFileChange {
    pub old_path: String,
    pub new_path: String,
    pub new_file: bool,
    pub deleted_file: bool,
    pub renamed_file: bool,
    /// File modes before and after; empty when the host did not report them.
    pub old_mode: String,
    pub new_mode: String,
    /// The host withheld the diff.
    pub too_large: bool,
    pub collapsed: bool,
    /// Unified diff hunks for this file.
    pub diff: String,
}

impl MrFileChange {
    pub fn mode_changed(&self) -> bool {
        !self.old_mode.is_empty() && !self.new_mode.is_empty() && self.old_mode != self.new_mode
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VcsError {
    #[error("file not found: {path} at ref {git_ref} in project {project_id}")]
    NotFound {
        project_id: u64,
        path: String,
        git_ref: String,
    },
    #[error("{context}: {message}")]
    Request { context: String, message: String },
}

impl VcsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VcsError::NotFound { .. })
    }

    pub fn request(context: impl Into<String>, message: impl ToString) -> Self {
        VcsError::Request {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

/// Blocking access to merge request metadata and file content.
///
/// `fetch_file` must return [`VcsError::NotFound`] when the path does not exist at the ref;
/// every other failure is a [`VcsError::Request`]. `mr_changes` must fail rather than return a
/// change list the host truncated.
pub trait VersionControl: Send + Sync {
    fn target_branch(&self, project_id: u64, mr_iid: u64) -> Result<String, VcsError>;

    fn mr_details(&self, project_id: u64, mr_iid: u64) -> Result<MrDetails, VcsError>;

    fn fetch_file(&self, project_id: u64, path: &str, git_ref: &str) -> Result<String, VcsError>;

    fn mr_changes(&self, project_id: u64, mr_iid: u64) -> Result<Vec<MrFileChange>, VcsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_project_defaults_to_target() {
        let same = MrDetails {
            source_project_id: 42,
            ..MrDetails::default()
        };
        assert_eq!(same.source_project(42), 42);

        let unset = MrDetails::default();
        assert_eq!(unset.source_project(42), 42);

        let fork = MrDetails {
            source_project_id: 7,
            ..MrDetails::default()
        };
        assert_eq!(fork.source_project(42), 7);
    }

    #[test]
    fn not_found_is_distinguishable() {
        let nf = VcsError::NotFound {
            project_id: 1,
            path: "product.yaml".to_string(),
            git_ref: "main".to_string(),
        };
        assert!(nf.is_not_found());
        assert!(!VcsError::request("fetch", "HTTP 500").is_not_found());
    }
}
