//! Wire DTOs for the subset of the GitLab API mrguard reads.

use mrguard_domain::vcs::{MrDetails, MrFileChange};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct MergeRequestDto {
    pub target_branch: String,
    pub source_branch: String,
    #[serde(default)]
    pub source_project_id: u64,
}

impl From<MergeRequestDto> for MrDetails {
    fn from(dto: MergeRequestDto) -> Self {
        MrDetails {
            source_branch: dto.source_branch,
            target_branch: dto.target_branch,
            source_project_id: dto.source_project_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MergeRequestChangesDto {
    #[serde(default)]
    pub changes: Vec<FileChangeDto>,
    /// The host cut the change list short.
    #[serde(default)]
    pub overflow: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FileChangeDto {
    pub old_path: String,
    pub new_path: String,
    #[serde(default)]
    pub new_file: bool,
    #[serde(default)]
    pub deleted_file: bool,
    #[serde(default)]
    pub renamed_file: bool,
    #[serde(default)]
    pub a_mode: String,
    #[serde(default)]
    pub b_mode: String,
    #[serde(default)]
    pub too_large: bool,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub diff: String,
}

impl From<FileChangeDto> for MrFileChange {
    fn from(dto: FileChangeDto) -> Self {
        MrFileChange {
            old_path: dto.old_path,
            new_path: dto.new_path,
            new_file: dto.new_file,
            deleted_file: dto.deleted_file,
            renamed_file: dto.renamed_file,
            old_mode: dto.a_mode,
            new_mode: dto.b_mode,
            too_large: dto.too_large,
            collapsed: dto.collapsed,
            diff: dto.diff,
        }
    }
}
