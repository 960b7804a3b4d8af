//! OpenAPI spec file parser

use super::types::OpenApiSpec;
use provider_codegen_common::{GeneratorError, ResourceDef, Result};
use std::fs;
use std::path::Path;

/// OpenAPI specification parser
///
/// Reads an OpenAPI 3.x document (JSON or YAML) and infers the resources it
/// describes.
pub struct OpenApiParser {
    /// Loaded OpenAPI spec
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load OpenAPI spec from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("openapi.yaml")?;
    /// let resources = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read(path.as_ref()).map_err(|e| {
            GeneratorError::Input(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_slice(&content)
    }

    /// Parse an OpenAPI document from raw bytes
    ///
    /// Documents whose first non-whitespace character is `{` are read as
    /// JSON, everything else as YAML.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| GeneratorError::Input(format!("OpenAPI document is not UTF-8: {}", e)))?;

        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            Self::from_yaml(text)
        }
    }

    /// Parse OpenAPI spec from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Input(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Parse OpenAPI spec from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Input(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Wrap an already-built document
    pub fn from_spec(spec: OpenApiSpec) -> Result<Self> {
        if !spec.openapi.starts_with("3.") {
            return Err(GeneratorError::Input(format!(
                "Unsupported OpenAPI version '{}' (expected 3.x)",
                spec.openapi
            )));
        }
        Ok(Self { spec })
    }

    /// Infer resources, sorted by name
    pub fn parse(&self) -> Result<Vec<ResourceDef>> {
        super::converter::convert_openapi_to_resources(&self.spec)
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}
