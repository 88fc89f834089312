//! Aggregate groups bundling execution units for one invocation.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::unit::{ExecutionStrategy, ExecutionUnit, UnitName};

/// The two aggregate groups every generation run produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Depends on every generated unit.
    AllVersions,
    /// Depends on the units of the catalog's quick versions.
    QuickFeedback,
}

impl GroupKind {
    pub const ALL: [GroupKind; 2] = [GroupKind::AllVersions, GroupKind::QuickFeedback];

    /// Task name of the group.
    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::AllVersions => "allVersionsCrossVersionTests",
            GroupKind::QuickFeedback => "quickFeedbackCrossVersionTests",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named node depending on a set of units.
///
/// Units are referenced by name; the owning collection lives in
/// [`CrossVersionGraph`](crate::graph::CrossVersionGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub kind: GroupKind,
    pub name: String,
    pub description: String,
    pub category: String,
    depends_on: BTreeSet<UnitName>,
}

impl AggregateGroup {
    /// Add a dependency edge to `unit`. Linking the same unit twice is a no-op.
    pub fn link_unit(&mut self, unit: &ExecutionUnit) {
        self.depends_on.insert(unit.name.clone());
    }

    pub fn depends_on(&self) -> &BTreeSet<UnitName> {
        &self.depends_on
    }

    pub fn contains(&self, name: &UnitName) -> bool {
        self.depends_on.contains(name)
    }

    pub fn len(&self) -> usize {
        self.depends_on.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depends_on.is_empty()
    }
}

/// Creates the empty aggregate groups for one generation run.
#[derive(Debug, Clone)]
pub struct GroupBuilder<'a> {
    config: &'a GenerationConfig,
}

impl<'a> GroupBuilder<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    pub fn create_all_versions_group(&self) -> AggregateGroup {
        self.create(
            GroupKind::AllVersions,
            format!(
                "Runs the cross-version tests against all {} versions with '{}' executer",
                self.config.product_name,
                ExecutionStrategy::Forking
            ),
        )
    }

    pub fn create_quick_feedback_group(&self) -> AggregateGroup {
        self.create(
            GroupKind::QuickFeedback,
            format!(
                "Runs the cross-version tests against a subset of selected {} versions \
                 with '{}' executer for quick feedback",
                self.config.product_name,
                ExecutionStrategy::Forking
            ),
        )
    }

    fn create(&self, kind: GroupKind, description: String) -> AggregateGroup {
        AggregateGroup {
            kind,
            name: kind.name().to_string(),
            description,
            category: self.config.category.clone(),
            depends_on: BTreeSet::new(),
        }
    }
}
