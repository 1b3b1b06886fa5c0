use crate::document::{DataProduct, Warehouse};
use crate::policy::{EffectiveConfig, RulePolicy, WarehousePolicy};
use crate::vcs::{MrDetails, MrFileChange, VcsError, VersionControl};
use mrguard_types::ids;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn data_product(warehouses: &[(&str, &str)]) -> DataProduct {
    DataProduct {
        name: "test".to_string(),
        warehouses: warehouses
            .iter()
            .map(|(t, s)| Warehouse {
                warehouse_type: t.to_string(),
                size: s.to_string(),
            })
            .collect(),
        ..DataProduct::default()
    }
}

pub fn config_with_warehouse(policy: WarehousePolicy) -> EffectiveConfig {
    let mut rules = BTreeMap::new();
    rules.insert(ids::RULE_WAREHOUSE.to_string(), RulePolicy::enabled());
    EffectiveConfig {
        profile: "test".to_string(),
        rules,
        warehouse: policy,
    }
}

/// In-memory merge request host: target branch `main`, source branch `feature`.
#[derive(Default)]
pub struct FakeVcs {
    source_project_id: u64,
    files: BTreeMap<(u64, String, String), Result<String, String>>,
    fetches: AtomicUsize,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_project(mut self, id: u64) -> Self {
        self.source_project_id = id;
        self
    }

    pub fn with_file(mut self, project: u64, git_ref: &str, path: &str, text: &str) -> Self {
        self.files.insert(
            (project, git_ref.to_string(), path.to_string()),
            Ok(text.to_string()),
        );
        self
    }

    pub fn with_failure(mut self, project: u64, git_ref: &str, path: &str, message: &str) -> Self {
        self.files.insert(
            (project, git_ref.to_string(), path.to_string()),
            Err(message.to_string()),
        );
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl VersionControl for FakeVcs {
    fn target_branch(&self, _project_id: u64, _mr_iid: u64) -> Result<String, VcsError> {
        Ok("main".to_string())
    }

    fn mr_details(&self, _project_id: u64, _mr_iid: u64) -> Result<MrDetails, VcsError> {
        Ok(MrDetails {
            source_branch: "feature".to_string(),
            target_branch: "main".to_string(),
            source_project_id: self.source_project_id,
        })
    }

    fn fetch_file(&self, project_id: u64, path: &str, git_ref: &str) -> Result<String, VcsError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self
            .files
            .get(&(project_id, git_ref.to_string(), path.to_string()))
        {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(VcsError::request("fetch file", message)),
            None => Err(VcsError::NotFound {
                project_id,
                path: path.to_string(),
                git_ref: git_ref.to_string(),
            }),
        }
    }

    fn mr_changes(&self, _project_id: u64, _mr_iid: u64) -> Result<Vec<MrFileChange>, VcsError> {
        Ok(Vec::new())
    }
}
