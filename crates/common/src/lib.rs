//! Common types and utilities for provider-codegen
//!
//! This crate contains the resource IR produced by the parser and consumed by
//! the generator, the shared error type, the naming rules used on both sides
//! of the pipeline, and the generator configuration.

pub mod config;
pub mod ir;
pub mod naming;
pub mod type_mapping;

pub use config::GeneratorConfig;
pub use ir::{FieldDef, FieldKind, PrimitiveType, ResourceDef, SchemaSpec};
pub use type_mapping::TypeMapping;

use thiserror::Error;

/// Errors that can occur while compiling an API description into resources
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The input document is unreadable or structurally invalid
    #[error("Input error: {0}")]
    Input(String),

    /// Two collection paths derived the same resource name
    #[error("Resource name conflict: '{name}' is derived from both '{first}' and '{second}'")]
    NameConflict {
        name: String,
        first: String,
        second: String,
    },

    /// A template could not be loaded or rendered
    #[error("Template error for '{resource}': {message}")]
    Template { resource: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// Creates an input error with the given message.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Creates a template error attributed to `resource`.
    pub fn template(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Whether the error was raised while reading the input document.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::NameConflict { .. } | Self::Json(_) | Self::Yaml(_)
        )
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
