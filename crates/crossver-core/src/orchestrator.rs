//! Generation entry point: catalog → units → aggregate groups.

use crate::catalog::{VersionCatalog, VersionCatalogProvider};
use crate::config::GenerationConfig;
use crate::domain::error::Result;
use crate::graph::CrossVersionGraph;
use crate::group::{GroupBuilder, GroupKind};
use crate::obs;
use crate::unit::UnitFactory;

/// Drives one generation run.
///
/// [`generate`](Self::generate) consumes the orchestrator, so each instance
/// produces at most one graph.
pub struct GenerationOrchestrator<P> {
    config: GenerationConfig,
    provider: P,
}

impl<P: VersionCatalogProvider> GenerationOrchestrator<P> {
    pub fn new(config: GenerationConfig, provider: P) -> Self {
        Self { config, provider }
    }

    /// Build the task graph.
    ///
    /// The catalog is read once, before any unit exists. Units are created in
    /// catalog order; each is linked into `AllVersions`, and into
    /// `QuickFeedback` when its version is in the quick set. Any error aborts
    /// the run without returning a partial graph.
    pub fn generate(self) -> Result<CrossVersionGraph> {
        let _span = obs::GenerationSpan::enter(&self.config.unit_prefix);
        self.build().inspect_err(|e| obs::emit_generation_failed(e))
    }

    fn build(self) -> Result<CrossVersionGraph> {
        self.config.validate()?;
        let catalog = VersionCatalog::fetch(&self.provider)?;
        obs::emit_generation_started(catalog.len(), catalog.quick().len());

        let builder = GroupBuilder::new(&self.config);
        let mut graph = CrossVersionGraph::new(
            builder.create_all_versions_group(),
            builder.create_quick_feedback_group(),
        );

        let factory = UnitFactory::new(self.config);
        for version in catalog.full() {
            let unit = factory.create_unit(version);
            let quick = catalog.is_quick(version);

            graph.group_mut(GroupKind::AllVersions).link_unit(&unit);
            if quick {
                graph.group_mut(GroupKind::QuickFeedback).link_unit(&unit);
            }

            obs::emit_unit_created(unit.name.as_str(), version.as_str(), quick);
            graph.insert_unit(unit);
        }

        obs::emit_generation_finished(
            graph.len(),
            graph.quick_feedback().len(),
            &graph.fingerprint(),
        );
        Ok(graph)
    }
}

/// Shorthand for `GenerationOrchestrator::new(config, provider).generate()`.
pub fn generate<P: VersionCatalogProvider>(
    config: GenerationConfig,
    provider: P,
) -> Result<CrossVersionGraph> {
    GenerationOrchestrator::new(config, provider).generate()
}
