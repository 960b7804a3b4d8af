//! API description parsing
//!
//! This crate turns an OpenAPI document into the resource IR
//! (`Vec<ResourceDef>`) consumed by the generator.
//!
//! ## Parsing Strategy
//!
//! Paths are classified into collections and items:
//! - `/widgets` → collection: names the resource, supplies create/read schemas
//! - `/widgets/{id}` → item: supplies the update schema and delete support
//!
//! Request and response bodies are flattened into ordered field lists,
//! recursing into nested objects and lists of objects.

pub mod openapi;

pub use openapi::OpenApiParser;

use provider_codegen_common::{ResourceDef, Result};

/// Parse an OpenAPI document into resources sorted by name
///
/// # Arguments
/// * `bytes` - JSON or YAML document
///
/// # Returns
/// * `Vec<ResourceDef>` - one entry per collection path
pub fn parse_document(bytes: &[u8]) -> Result<Vec<ResourceDef>> {
    OpenApiParser::from_slice(bytes)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_rejects_garbage() {
        assert!(parse_document(b"not: [valid").is_err());
    }
}
