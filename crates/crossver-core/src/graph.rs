//! The generated task graph: owned units plus the two aggregate groups.
//!
//! A graph is produced once by
//! [`GenerationOrchestrator::generate`](crate::orchestrator::GenerationOrchestrator::generate)
//! and never mutated afterwards. Groups reference units by [`UnitName`]; the
//! graph's `units` map is the single owner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::version::VersionId;
use crate::group::{AggregateGroup, GroupKind};
use crate::unit::{ExecutionUnit, UnitName};

/// Immutable result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossVersionGraph {
    /// Unit names in catalog order.
    order: Vec<UnitName>,
    units: BTreeMap<UnitName, ExecutionUnit>,
    by_version: BTreeMap<VersionId, UnitName>,
    all_versions: AggregateGroup,
    quick_feedback: AggregateGroup,
}

impl CrossVersionGraph {
    pub(crate) fn new(all_versions: AggregateGroup, quick_feedback: AggregateGroup) -> Self {
        Self {
            order: Vec::new(),
            units: BTreeMap::new(),
            by_version: BTreeMap::new(),
            all_versions,
            quick_feedback,
        }
    }

    /// Take ownership of `unit`. Callers guarantee names are unique, which a
    /// validated catalog ensures.
    pub(crate) fn insert_unit(&mut self, unit: ExecutionUnit) {
        self.order.push(unit.name.clone());
        self.by_version
            .insert(unit.target_version.clone(), unit.name.clone());
        self.units.insert(unit.name.clone(), unit);
    }

    pub(crate) fn group_mut(&mut self, kind: GroupKind) -> &mut AggregateGroup {
        match kind {
            GroupKind::AllVersions => &mut self.all_versions,
            GroupKind::QuickFeedback => &mut self.quick_feedback,
        }
    }

    /// Units in catalog order.
    pub fn units(&self) -> impl Iterator<Item = &ExecutionUnit> + '_ {
        self.order.iter().filter_map(|name| self.units.get(name))
    }

    pub fn unit_names(&self) -> &[UnitName] {
        &self.order
    }

    pub fn unit(&self, name: &UnitName) -> Option<&ExecutionUnit> {
        self.units.get(name)
    }

    pub fn unit_for_version(&self, version: &VersionId) -> Option<&ExecutionUnit> {
        self.by_version
            .get(version)
            .and_then(|name| self.units.get(name))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn all_versions(&self) -> &AggregateGroup {
        &self.all_versions
    }

    pub fn quick_feedback(&self) -> &AggregateGroup {
        &self.quick_feedback
    }

    pub fn group(&self, kind: GroupKind) -> &AggregateGroup {
        match kind {
            GroupKind::AllVersions => &self.all_versions,
            GroupKind::QuickFeedback => &self.quick_feedback,
        }
    }

    /// Resolve a group's dependency names against the owning unit map.
    pub fn group_units(&self, kind: GroupKind) -> Vec<&ExecutionUnit> {
        self.group(kind)
            .depends_on()
            .iter()
            .filter_map(|name| self.units.get(name))
            .collect()
    }

    /// SHA-256 over the graph's structure, stable across runs with the same
    /// catalog and config.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for unit in self.units() {
            hasher.update(unit.name.as_str().as_bytes());
            hasher.update(b"\0");
            hasher.update(unit.target_version.as_str().as_bytes());
            hasher.update(b"\0");
            hasher.update(unit.strategy.name().as_bytes());
            hasher.update(b"\0");
            hasher.update(unit.description.as_bytes());
            hasher.update(b"\0");
            hasher.update(unit.category.as_bytes());
            hasher.update(b"\0");
            for (key, value) in &unit.system_properties {
                hasher.update(key.as_bytes());
                hasher.update(b"=");
                hasher.update(value.as_bytes());
                hasher.update(b"\0");
            }
            hasher.update(b"\x1e");
        }
        for kind in GroupKind::ALL {
            let group = self.group(kind);
            hasher.update(group.name.as_bytes());
            hasher.update(b"\0");
            hasher.update(group.description.as_bytes());
            hasher.update(b"\0");
            for name in group.depends_on() {
                hasher.update(name.as_str().as_bytes());
                hasher.update(b"\0");
            }
            hasher.update(b"\x1e");
        }
        hex::encode(hasher.finalize())
    }

    /// Serializable view handed to external executors.
    pub fn manifest(&self) -> GraphManifest {
        GraphManifest {
            fingerprint: self.fingerprint(),
            units: self.units().cloned().collect(),
            groups: GroupKind::ALL
                .iter()
                .map(|kind| self.group(*kind).clone())
                .collect(),
        }
    }
}

/// JSON-friendly snapshot of a [`CrossVersionGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphManifest {
    pub fingerprint: String,
    /// Units in catalog order.
    pub units: Vec<ExecutionUnit>,
    pub groups: Vec<AggregateGroup>,
}

impl GraphManifest {
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
