//! Generator configuration
//!
//! Settings that shape the generated provider code but not the inferred
//! resources. They can be loaded from a YAML file and overridden from the
//! command line.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Provider-wide settings for code generation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Prefix of every Terraform type name (`<provider>_<resource>`)
    pub provider_name: String,

    /// Go package of the generated sources
    pub package_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider_name: "provider".to_string(),
            package_name: "provider".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Input(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_provider_name(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = provider_name.into();
        self
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    /// Both names end up verbatim in generated identifiers
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("provider_name", &self.provider_name),
            ("package_name", &self.package_name),
        ] {
            let valid = value
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_lowercase())
                && value
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
            if !valid {
                return Err(GeneratorError::Input(format!(
                    "Invalid {}: '{}' (expected lowercase letters, digits and underscores)",
                    key, value
                )));
            }
        }
        Ok(())
    }
}
