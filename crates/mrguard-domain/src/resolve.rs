//! Branch & content resolution for one changed file, and the warehouse diff built on it.

use crate::diff::{WarehouseChange, compare_warehouses};
use crate::document::{DataProduct, parse_data_product};
use crate::vcs::{VcsError, VersionControl};
use mrguard_types::RepoPath;
use tracing::debug;

/// Which snapshot of a file an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Old => f.write_str("old"),
            Side::New => f.write_str("new"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("failed to resolve merge request {mr_iid} in project {project_id}: {source}")]
    Metadata {
        project_id: u64,
        mr_iid: u64,
        #[source]
        source: VcsError,
    },
    #[error(
        "failed to fetch {side} content of {path} from project {project_id}, branch {git_ref}: {source}"
    )]
    Resolution {
        side: Side,
        project_id: u64,
        git_ref: String,
        path: String,
        #[source]
        source: VcsError,
    },
    #[error("failed to parse {side} YAML of {path}: {source}")]
    Parse {
        side: Side,
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Before/after content of one file across the target and source branches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Snapshots {
    Modified { old: String, new: String },
    Added { new: String },
    Deleted { old: String },
    /// Present on neither branch.
    Missing,
}

pub struct ContentResolver<'a> {
    vcs: &'a dyn VersionControl,
}

impl<'a> ContentResolver<'a> {
    pub fn new(vcs: &'a dyn VersionControl) -> Self {
        Self { vcs }
    }

    /// Fetch the target-branch and source-branch content of `path`.
    ///
    /// The target fetch always happens first: whether the file is new depends on it.
    pub fn resolve(
        &self,
        project_id: u64,
        mr_iid: u64,
        path: &str,
    ) -> Result<Snapshots, EvaluationError> {
        let metadata_err = |source| EvaluationError::Metadata {
            project_id,
            mr_iid,
            source,
        };
        let target_branch = self
            .vcs
            .target_branch(project_id, mr_iid)
            .map_err(metadata_err)?;
        let details = self
            .vcs
            .mr_details(project_id, mr_iid)
            .map_err(metadata_err)?;
        let source_project = details.source_project(project_id);
        let source_branch = details.source_branch.as_str();

        debug!(
            project_id,
            source_project,
            target_branch = %target_branch,
            source_branch,
            path,
            "resolving file snapshots"
        );

        let fetch_err = |side, project_id, git_ref: &str, source| EvaluationError::Resolution {
            side,
            project_id,
            git_ref: git_ref.to_string(),
            path: path.to_string(),
            source,
        };

        let old = match self.vcs.fetch_file(project_id, path, &target_branch) {
            Ok(text) => Some(text),
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(fetch_err(Side::Old, project_id, &target_branch, err)),
        };

        let new = match self.vcs.fetch_file(source_project, path, source_branch) {
            Ok(text) => Some(text),
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(fetch_err(Side::New, source_project, source_branch, err)),
        };

        Ok(match (old, new) {
            (Some(old), Some(new)) => Snapshots::Modified { old, new },
            (None, Some(new)) => Snapshots::Added { new },
            (Some(old), None) => Snapshots::Deleted { old },
            (None, None) => Snapshots::Missing,
        })
    }
}

/// Resolve both snapshots of `path` and diff their warehouses.
pub fn analyze_file(
    vcs: &dyn VersionControl,
    project_id: u64,
    mr_iid: u64,
    path: &RepoPath,
) -> Result<Vec<WarehouseChange>, EvaluationError> {
    let snapshots = ContentResolver::new(vcs).resolve(project_id, mr_iid, path.as_str())?;

    let (old, new) = match snapshots {
        Snapshots::Modified { old, new } => {
            (parse(Side::Old, path, &old)?, parse(Side::New, path, &new)?)
        }
        Snapshots::Added { new } => (DataProduct::empty(), parse(Side::New, path, &new)?),
        Snapshots::Deleted { old } => (parse(Side::Old, path, &old)?, DataProduct::empty()),
        Snapshots::Missing => {
            debug!(path = path.as_str(), "file exists on neither branch");
            return Ok(Vec::new());
        }
    };

    Ok(compare_warehouses(path, &old, &new))
}

fn parse(side: Side, path: &RepoPath, text: &str) -> Result<DataProduct, EvaluationError> {
    parse_data_product(text).map_err(|source| EvaluationError::Parse {
        side,
        path: path.as_str().to_string(),
        source,
    })
}
