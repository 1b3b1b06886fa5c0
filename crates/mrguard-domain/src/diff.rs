//! Structural comparison of two descriptor snapshots.

use crate::document::DataProduct;
use crate::sizes;
use mrguard_types::RepoPath;
use std::collections::BTreeMap;

/// A size change of one warehouse type present in both snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarehouseChange {
    pub file_path: RepoPath,
    pub warehouse_type: String,
    pub from_size: String,
    pub to_size: String,
    pub is_decrease: bool,
}

impl WarehouseChange {
    /// Display locator, e.g. `dataproducts/ebs/product.yaml (type: user)`.
    pub fn locator(&self) -> String {
        format!("{} (type: {})", self.file_path, self.warehouse_type)
    }
}

/// Compare warehouses keyed by type.
///
/// Only types present in both snapshots with differing, rankable sizes produce a change.
/// Added or removed types and unknown size labels are skipped. Duplicate types collapse to the
/// last occurrence. Callers must not rely on the order of the result.
pub fn compare_warehouses(
    file_path: &RepoPath,
    old: &DataProduct,
    new: &DataProduct,
) -> Vec<WarehouseChange> {
    let old_sizes = size_by_type(old);
    let new_sizes = size_by_type(new);

    let mut changes = Vec::new();
    for (warehouse_type, new_size) in &new_sizes {
        let Some(old_size) = old_sizes.get(warehouse_type) else {
            continue;
        };
        if old_size == new_size {
            continue;
        }
        let Some(is_decrease) = sizes::is_decrease(old_size, new_size) else {
            continue;
        };
        changes.push(WarehouseChange {
            file_path: file_path.clone(),
            warehouse_type: (*warehouse_type).to_string(),
            from_size: (*old_size).to_string(),
            to_size: (*new_size).to_string(),
            is_decrease,
        });
    }
    changes
}

fn size_by_type(dp: &DataProduct) -> BTreeMap<&str, &str> {
    dp.warehouses
        .iter()
        .map(|w| (w.warehouse_type.as_str(), w.size.as_str()))
        .collect()
}
