//! Read-only cost center hierarchy.
//!
//! Built once from the flat cost center set. Construction rejects unknown
//! parents and cycles so traversal always terminates.

use std::collections::{BTreeMap, HashSet};

use finmart_shared::types::CostCenterId;

use super::error::DimensionError;
use super::types::CostCenter;

/// Parent/child tree over cost centers.
#[derive(Debug, Clone, Default)]
pub struct CostCenterHierarchy {
    parents: BTreeMap<CostCenterId, Option<CostCenterId>>,
    children: BTreeMap<CostCenterId, Vec<CostCenterId>>,
}

impl CostCenterHierarchy {
    /// Builds the hierarchy.
    ///
    /// # Errors
    ///
    /// - `DuplicateCostCenter` if an ID appears twice
    /// - `UnknownParent` if a parent ID is not in the set
    /// - `HierarchyCycle` if parent links loop
    pub fn build(cost_centers: &[CostCenter]) -> Result<Self, DimensionError> {
        let mut parents = BTreeMap::new();
        for cc in cost_centers {
            if parents
                .insert(cc.cost_center_id.clone(), cc.parent_cost_center_id.clone())
                .is_some()
            {
                return Err(DimensionError::DuplicateCostCenter(cc.cost_center_id.clone()));
            }
        }

        let mut children: BTreeMap<CostCenterId, Vec<CostCenterId>> = BTreeMap::new();
        for (child, parent) in &parents {
            if let Some(parent) = parent {
                if !parents.contains_key(parent) {
                    return Err(DimensionError::UnknownParent {
                        child: child.clone(),
                        parent: parent.clone(),
                    });
                }
                children.entry(parent.clone()).or_default().push(child.clone());
            }
        }

        // Every chain must reach a root within `parents.len()` steps.
        for start in parents.keys() {
            let mut seen = HashSet::new();
            let mut current = Some(start);
            while let Some(id) = current {
                if !seen.insert(id) {
                    return Err(DimensionError::HierarchyCycle(start.clone()));
                }
                current = parents.get(id).and_then(Option::as_ref);
            }
        }

        Ok(Self { parents, children })
    }

    /// Cost centers without a parent, in ID order.
    #[must_use]
    pub fn roots(&self) -> Vec<&CostCenterId> {
        self.parents
            .iter()
            .filter(|(_, parent)| parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Direct children of a cost center, in ID order.
    #[must_use]
    pub fn children(&self, id: &CostCenterId) -> &[CostCenterId] {
        self.children.get(id).map_or(&[][..], Vec::as_slice)
    }

    /// Ancestors of a cost center, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: &CostCenterId) -> Vec<&CostCenterId> {
        let mut out = Vec::new();
        let mut current = self.parents.get(id).and_then(Option::as_ref);
        while let Some(parent) = current {
            out.push(parent);
            current = self.parents.get(parent).and_then(Option::as_ref);
        }
        out
    }

    /// Distance from the root; roots have depth 0. `None` for unknown IDs.
    #[must_use]
    pub fn depth(&self, id: &CostCenterId) -> Option<usize> {
        self.parents.contains_key(id).then(|| self.ancestors(id).len())
    }

    /// Returns true if the ID is part of the hierarchy.
    #[must_use]
    pub fn contains(&self, id: &CostCenterId) -> bool {
        self.parents.contains_key(id)
    }
}
