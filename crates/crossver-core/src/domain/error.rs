//! Error taxonomy for cross-version task generation.

/// Errors produced while fetching the catalog or building the task graph.
///
/// Any error aborts the whole generation run; no partial graph is returned.
#[derive(Debug, thiserror::Error)]
pub enum CrossVersionError {
    /// The catalog provider could not supply its version lists.
    #[error("version catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    /// Quick versions that the full catalog does not contain.
    #[error("quick versions not present in the full catalog: {versions:?}")]
    InvalidQuickSubset { versions: Vec<String> },

    /// A version listed more than once in the full catalog.
    #[error("duplicate version in catalog: {version}")]
    DuplicateVersion { version: String },

    /// An empty or malformed version identifier.
    #[error("invalid version identifier: {reason}")]
    InvalidVersion { reason: String },

    /// Generation settings failed to parse or validate.
    #[error("invalid generation config: {0}")]
    Config(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrossVersionError {
    /// Wrap any provider-side failure as [`CrossVersionError::CatalogUnavailable`].
    pub fn catalog_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::CatalogUnavailable {
            reason: reason.to_string(),
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, CrossVersionError>;
