//! Crossver Core - cross-version test task generation
//!
//! Turns a catalog of released versions into a static task graph:
//! - one forking [`ExecutionUnit`] per version
//! - an `allVersionsCrossVersionTests` group depending on every unit
//! - a `quickFeedbackCrossVersionTests` group depending on the quick subset

pub mod catalog;
pub mod config;
pub mod domain;
pub mod graph;
pub mod group;
pub mod obs;
pub mod orchestrator;
pub mod telemetry;
pub mod unit;

pub use catalog::{
    QuickSelection, ReleasedVersionsFile, StaticCatalogProvider, VersionCatalog,
    VersionCatalogProvider,
};
pub use config::GenerationConfig;
pub use domain::{CrossVersionError, Result, VersionId};
pub use graph::{CrossVersionGraph, GraphManifest};
pub use group::{AggregateGroup, GroupBuilder, GroupKind};
pub use orchestrator::{generate, GenerationOrchestrator};
pub use telemetry::init_tracing;
pub use unit::{
    unit_name_with_prefix, ExecutionStrategy, ExecutionUnit, UnitFactory, UnitName,
    UNIT_NAME_SUFFIX,
};

/// Crossver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
