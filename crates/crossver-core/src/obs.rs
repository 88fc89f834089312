//! Structured events for the generation lifecycle.
//!
//! Emits `generation.started`, `generation.unit_created` (debug),
//! `generation.finished` and `generation.failed` (warn). Filtering follows
//! `RUST_LOG`; see [`crate::telemetry::init_tracing`].

use tracing::{debug, info, warn};

/// RAII guard that enters a generation-scoped span.
///
/// ```ignore
/// let _span = GenerationSpan::enter("gradle");
/// // events emitted here carry unit_prefix = "gradle"
/// ```
pub struct GenerationSpan {
    _span: tracing::span::EnteredSpan,
}

impl GenerationSpan {
    pub fn enter(unit_prefix: &str) -> Self {
        let span = tracing::info_span!("crossver.generate", unit_prefix = %unit_prefix);
        Self {
            _span: span.entered(),
        }
    }
}

/// Catalog fetched; unit creation is about to begin.
pub fn emit_generation_started(full_versions: usize, quick_versions: usize) {
    info!(
        event = "generation.started",
        full_versions = full_versions,
        quick_versions = quick_versions,
    );
}

pub fn emit_unit_created(unit_name: &str, target_version: &str, quick: bool) {
    debug!(
        event = "generation.unit_created",
        unit = %unit_name,
        version = %target_version,
        quick = quick,
    );
}

pub fn emit_generation_finished(units: usize, quick_units: usize, fingerprint: &str) {
    info!(
        event = "generation.finished",
        units = units,
        quick_units = quick_units,
        fingerprint = %fingerprint,
    );
}

pub fn emit_generation_failed(error: &dyn std::fmt::Display) {
    warn!(event = "generation.failed", error = %error);
}
