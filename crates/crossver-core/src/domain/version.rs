//! Released version identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::{CrossVersionError, Result};

/// Opaque identifier of one released product version, e.g. `"7.4.2"`.
///
/// Only equality, ordering and hashing are meaningful. Ordering is lexical and
/// exists for deterministic set iteration, not for release chronology; the
/// catalog's sequence order is the release order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Wrap a raw identifier without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Wrap a raw identifier, rejecting empty or whitespace-bearing tokens.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let id = Self(raw.into());
        id.validate()?;
        Ok(id)
    }

    /// Check the identifier is usable inside a unit name.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(CrossVersionError::InvalidVersion {
                reason: "version identifier is empty".to_string(),
            });
        }
        if self.0.chars().any(char::is_whitespace) {
            return Err(CrossVersionError::InvalidVersion {
                reason: format!("version identifier {:?} contains whitespace", self.0),
            });
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for VersionId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for VersionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
