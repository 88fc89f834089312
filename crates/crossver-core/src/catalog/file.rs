//! Catalog provider backed by a released-versions JSON document.
//!
//! Expected shape (unknown fields such as `buildTime` are ignored):
//!
//! ```json
//! {
//!   "finalReleases": [{ "version": "6.0" }, { "version": "6.1" }],
//!   "quick": ["6.1"]
//! }
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::VersionCatalogProvider;
use crate::domain::error::{CrossVersionError, Result};
use crate::domain::version::VersionId;

/// How the quick-feedback subset is chosen from a release document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickSelection {
    /// Use the document's `quick` list; fall back to [`Boundaries`](Self::Boundaries)
    /// when the document has none.
    #[default]
    Declared,
    /// Oldest and newest tested release.
    Boundaries,
    /// No quick versions at all.
    Empty,
}

impl QuickSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickSelection::Declared => "declared",
            QuickSelection::Boundaries => "boundaries",
            QuickSelection::Empty => "empty",
        }
    }
}

impl fmt::Display for QuickSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickSelection {
    type Err = CrossVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "declared" => Ok(QuickSelection::Declared),
            "boundaries" => Ok(QuickSelection::Boundaries),
            "empty" => Ok(QuickSelection::Empty),
            other => Err(CrossVersionError::Config(format!(
                "unknown quick selection '{}' (expected declared, boundaries or empty)",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleasedVersionsDocument {
    final_releases: Vec<ReleaseEntry>,
    #[serde(default)]
    quick: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    version: String,
}

/// Released-versions document, read once at construction.
#[derive(Debug, Clone)]
pub struct ReleasedVersionsFile {
    source: Option<PathBuf>,
    releases: Vec<VersionId>,
    declared_quick: Option<Vec<VersionId>>,
    selection: QuickSelection,
}

impl ReleasedVersionsFile {
    /// Read and parse the document at `path`.
    ///
    /// A missing or malformed file is reported as
    /// [`CrossVersionError::CatalogUnavailable`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CrossVersionError::catalog_unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut file = Self::from_json_str(&raw).map_err(|e| match e {
            CrossVersionError::CatalogUnavailable { reason } => {
                CrossVersionError::catalog_unavailable(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;
        file.source = Some(path.to_path_buf());
        debug!(path = %path.display(), releases = file.releases.len(), "loaded released versions");
        Ok(file)
    }

    /// Parse a document held in memory.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: ReleasedVersionsDocument = serde_json::from_str(raw).map_err(|e| {
            CrossVersionError::catalog_unavailable(format!("malformed release metadata: {}", e))
        })?;
        Ok(Self {
            source: None,
            releases: doc
                .final_releases
                .into_iter()
                .map(|entry| VersionId::new(entry.version))
                .collect(),
            declared_quick: doc
                .quick
                .map(|quick| quick.into_iter().map(VersionId::new).collect()),
            selection: QuickSelection::default(),
        })
    }

    /// Override how the quick subset is chosen.
    pub fn with_quick_selection(mut self, selection: QuickSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn boundaries(&self) -> BTreeSet<VersionId> {
        self.releases
            .first()
            .into_iter()
            .chain(self.releases.last())
            .cloned()
            .collect()
    }
}

impl VersionCatalogProvider for ReleasedVersionsFile {
    fn full_versions(&self) -> Result<Vec<VersionId>> {
        Ok(self.releases.clone())
    }

    fn quick_versions(&self) -> Result<BTreeSet<VersionId>> {
        let quick = match (self.selection, &self.declared_quick) {
            (QuickSelection::Declared, Some(declared)) => declared.iter().cloned().collect(),
            (QuickSelection::Declared, None) | (QuickSelection::Boundaries, _) => {
                self.boundaries()
            }
            (QuickSelection::Empty, _) => BTreeSet::new(),
        };
        Ok(quick)
    }
}
