//! Execution units: one parameterized cross-version test run per version.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::domain::version::VersionId;

/// Suffix shared by every unit name.
pub const UNIT_NAME_SUFFIX: &str = "CrossVersionTest";

/// How a unit executes the test suite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run in a separate process so the version under test cannot leak
    /// class or static state into other units.
    #[default]
    Forking,
}

impl ExecutionStrategy {
    /// Value handed to the test harness through the executer property.
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionStrategy::Forking => "forking",
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a generated unit, e.g. `gradle6.1CrossVersionTest`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitName {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// One test run scoped to exactly one released version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionUnit {
    pub name: UnitName,
    pub target_version: VersionId,
    pub strategy: ExecutionStrategy,
    pub description: String,
    pub category: String,
    /// Properties the test harness reads to select the version and executer.
    pub system_properties: BTreeMap<String, String>,
}

/// Builds [`ExecutionUnit`]s from catalog versions.
#[derive(Debug, Clone)]
pub struct UnitFactory {
    config: GenerationConfig,
}

impl UnitFactory {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Deterministic unit name for `version` under this factory's prefix.
    pub fn unit_name(&self, version: &VersionId) -> UnitName {
        unit_name_with_prefix(&self.config.unit_prefix, version)
    }

    /// Key of the property carrying the target version.
    pub fn versions_property(&self) -> String {
        format!("{}.integtest.versions", self.config.property_namespace)
    }

    /// Key of the property carrying the execution strategy.
    pub fn executer_property(&self) -> String {
        format!("{}.integtest.executer", self.config.property_namespace)
    }

    /// Create the unit for `version`.
    ///
    /// `version` must come from a validated catalog.
    pub fn create_unit(&self, version: &VersionId) -> ExecutionUnit {
        let strategy = ExecutionStrategy::Forking;

        let mut system_properties = BTreeMap::new();
        system_properties.insert(self.versions_property(), version.to_string());
        system_properties.insert(self.executer_property(), strategy.name().to_string());

        ExecutionUnit {
            name: self.unit_name(version),
            target_version: version.clone(),
            strategy,
            description: format!(
                "Runs the cross-version tests against {} {}",
                self.config.product_name, version
            ),
            category: self.config.category.clone(),
            system_properties,
        }
    }
}

/// `<prefix><version>CrossVersionTest`, usable without a factory.
pub fn unit_name_with_prefix(prefix: &str, version: &VersionId) -> UnitName {
    UnitName(format!("{}{}{}", prefix, version, UNIT_NAME_SUFFIX))
}
