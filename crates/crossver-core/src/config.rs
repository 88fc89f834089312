//! Generation settings: naming, descriptions and unit parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::{CrossVersionError, Result};

/// Settings that shape generated unit and group metadata.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Product name used in human-readable descriptions.
    pub product_name: String,

    /// Prefix of every unit name: `<prefix><version>CrossVersionTest`.
    pub unit_prefix: String,

    /// Namespace of the system properties handed to each unit.
    pub property_namespace: String,

    /// Task category shared by units and aggregate groups.
    pub category: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            product_name: "Gradle".to_string(),
            unit_prefix: "gradle".to_string(),
            property_namespace: "org.gradle".to_string(),
            category: "verification".to_string(),
        }
    }
}

impl GenerationConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| CrossVersionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.unit_prefix.chars().any(char::is_whitespace) {
            return Err(CrossVersionError::Config(format!(
                "unit_prefix {:?} must not contain whitespace",
                self.unit_prefix
            )));
        }
        if self.property_namespace.trim().is_empty() {
            return Err(CrossVersionError::Config(
                "property_namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = GenerationConfig::from_toml_str("").expect("parse");
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let config = GenerationConfig::from_toml_str(
            r#"
            product_name = "Acme"
            unit_prefix = "acme"
            "#,
        )
        .expect("parse");
        assert_eq!(config.product_name, "Acme");
        assert_eq!(config.unit_prefix, "acme");
        assert_eq!(config.property_namespace, "org.gradle");
        assert_eq!(config.category, "verification");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = GenerationConfig::from_toml_str("executer = \"embedded\"").unwrap_err();
        assert!(matches!(err, CrossVersionError::Config(_)));
    }

    #[test]
    fn test_whitespace_prefix_is_rejected() {
        let err = GenerationConfig::from_toml_str("unit_prefix = \"my product\"").unwrap_err();
        assert!(err.to_string().contains("unit_prefix"));
    }

    #[test]
    fn test_empty_namespace_is_rejected() {
        assert!(GenerationConfig::from_toml_str("property_namespace = \"\"").is_err());
    }

    #[test]
    fn test_empty_prefix_is_allowed() {
        let config = GenerationConfig::from_toml_str("unit_prefix = \"\"").expect("parse");
        assert!(config.unit_prefix.is_empty());
    }
}
