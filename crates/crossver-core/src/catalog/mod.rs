//! Version catalog: the consumed interface and its validated snapshot.
//!
//! A [`VersionCatalogProvider`] answers two queries, the full ordered list of
//! released versions and the "quick" subset. [`VersionCatalog::fetch`] calls
//! each query exactly once and freezes the answers so a generation run sees a
//! single self-consistent view of the catalog.

pub mod file;

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::{CrossVersionError, Result};
use crate::domain::version::VersionId;

pub use file::{QuickSelection, ReleasedVersionsFile};

/// Source of the released versions to test against.
///
/// Implementations report unreachable release metadata as
/// [`CrossVersionError::CatalogUnavailable`].
pub trait VersionCatalogProvider {
    /// All versions to be tested, in release order.
    fn full_versions(&self) -> Result<Vec<VersionId>>;

    /// The subset of [`full_versions`](Self::full_versions) used for quick feedback.
    fn quick_versions(&self) -> Result<BTreeSet<VersionId>>;
}

impl<P: VersionCatalogProvider + ?Sized> VersionCatalogProvider for &P {
    fn full_versions(&self) -> Result<Vec<VersionId>> {
        (**self).full_versions()
    }

    fn quick_versions(&self) -> Result<BTreeSet<VersionId>> {
        (**self).quick_versions()
    }
}

/// Immutable, validated snapshot of a provider's answers.
///
/// Deserialization goes through [`VersionCatalog::new`], so a decoded
/// catalog upholds the same invariants as a fetched one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVersionCatalog")]
pub struct VersionCatalog {
    full: Vec<VersionId>,
    quick: BTreeSet<VersionId>,
}

#[derive(Deserialize)]
struct RawVersionCatalog {
    full: Vec<VersionId>,
    #[serde(default)]
    quick: BTreeSet<VersionId>,
}

impl TryFrom<RawVersionCatalog> for VersionCatalog {
    type Error = CrossVersionError;

    fn try_from(raw: RawVersionCatalog) -> Result<Self> {
        Self::new(raw.full, raw.quick)
    }
}

impl VersionCatalog {
    /// Build a snapshot from explicit lists, enforcing catalog invariants.
    ///
    /// Fails on empty or malformed identifiers, on a repeated full version,
    /// and when `quick` names a version that `full` does not contain.
    pub fn new(full: Vec<VersionId>, quick: BTreeSet<VersionId>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(full.len());
        for version in &full {
            version.validate()?;
            if !seen.insert(version) {
                return Err(CrossVersionError::DuplicateVersion {
                    version: version.to_string(),
                });
            }
        }

        let dangling: Vec<String> = quick
            .iter()
            .filter(|v| !seen.contains(v))
            .map(ToString::to_string)
            .collect();
        if !dangling.is_empty() {
            return Err(CrossVersionError::InvalidQuickSubset { versions: dangling });
        }

        Ok(Self { full, quick })
    }

    /// Query `provider` once for each list and validate the result.
    ///
    /// Any provider failure is reported as
    /// [`CrossVersionError::CatalogUnavailable`].
    pub fn fetch<P: VersionCatalogProvider + ?Sized>(provider: &P) -> Result<Self> {
        let full = provider.full_versions().map_err(into_unavailable)?;
        let quick = provider.quick_versions().map_err(into_unavailable)?;
        debug!(full = full.len(), quick = quick.len(), "fetched version catalog");
        Self::new(full, quick)
    }

    /// Every tested version, in catalog order.
    pub fn full(&self) -> &[VersionId] {
        &self.full
    }

    pub fn quick(&self) -> &BTreeSet<VersionId> {
        &self.quick
    }

    pub fn is_quick(&self, version: &VersionId) -> bool {
        self.quick.contains(version)
    }

    pub fn len(&self) -> usize {
        self.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }
}

fn into_unavailable(err: CrossVersionError) -> CrossVersionError {
    match err {
        CrossVersionError::CatalogUnavailable { .. } => err,
        other => CrossVersionError::catalog_unavailable(other),
    }
}

/// In-memory provider over fixed lists.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    full: Vec<VersionId>,
    quick: BTreeSet<VersionId>,
}

impl StaticCatalogProvider {
    pub fn new<F, Q>(full: F, quick: Q) -> Self
    where
        F: IntoIterator,
        F::Item: Into<VersionId>,
        Q: IntoIterator,
        Q::Item: Into<VersionId>,
    {
        Self {
            full: full.into_iter().map(Into::into).collect(),
            quick: quick.into_iter().map(Into::into).collect(),
        }
    }
}

impl VersionCatalogProvider for StaticCatalogProvider {
    fn full_versions(&self) -> Result<Vec<VersionId>> {
        Ok(self.full.clone())
    }

    fn quick_versions(&self) -> Result<BTreeSet<VersionId>> {
        Ok(self.quick.clone())
    }
}
