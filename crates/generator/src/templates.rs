//! Template loading and management
//!
//! A [`TemplateSet`] is an explicit value handed to the generator; there is
//! no process-wide template state.

use crate::fields::go_string;
use crate::ArtifactKind;
use provider_codegen_common::naming::to_pascal_case;
use provider_codegen_common::{GeneratorError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::{Context, Tera, Value};

/// Renders named templates with a context
///
/// Implemented by [`TemplateSet`]; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer {
    fn render(&self, template: &str, context: &Context) -> tera::Result<String>;
}

/// The four templates used for every resource
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    /// Templates compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_raw(&[
            (
                ArtifactKind::Resource,
                include_str!("../templates/resource.go.tera"),
            ),
            (
                ArtifactKind::DataSource,
                include_str!("../templates/data_source.go.tera"),
            ),
            (
                ArtifactKind::ResourceDoc,
                include_str!("../templates/resource.md.tera"),
            ),
            (
                ArtifactKind::DataSourceDoc,
                include_str!("../templates/data_source.md.tera"),
            ),
        ])
    }

    /// Load templates from a directory
    ///
    /// Files are looked up by [`ArtifactKind::file_name`]; any that are
    /// missing fall back to the embedded version.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(GeneratorError::template(
                "*",
                format!("Template directory not found: {}", dir.display()),
            ));
        }

        let mut set = Self::embedded()?;
        for kind in ArtifactKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            set.add(kind, &content)?;
        }
        Ok(set)
    }

    /// Build a set from in-memory template sources
    pub fn from_raw(templates: &[(ArtifactKind, &str)]) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        // Register custom filters
        tera.register_filter("go_string", go_string_filter);
        tera.register_filter("pascal_case", pascal_case_filter);

        let mut set = Self { tera };
        for (kind, content) in templates {
            set.add(*kind, content)?;
        }
        Ok(set)
    }

    fn add(&mut self, kind: ArtifactKind, content: &str) -> Result<()> {
        self.tera
            .add_raw_template(kind.template_name(), content)
            .map_err(|e| {
                GeneratorError::template(
                    "*",
                    format!(
                        "Failed to load {} template: {}",
                        kind.template_name(),
                        describe_error(&e)
                    ),
                )
            })
    }
}

impl TemplateRenderer for TemplateSet {
    fn render(&self, template: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template, context)
    }
}

/// Tera errors keep the useful detail in their source chain
pub(crate) fn describe_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Filter to quote a value as a Go string literal
fn go_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("go_string filter expects a string"))?;

    Ok(Value::String(go_string(s)))
}

/// Filter to convert snake_case to PascalCase
fn pascal_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("pascal_case filter expects a string"))?;

    Ok(Value::String(to_pascal_case(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_templates_load() {
        assert!(TemplateSet::embedded().is_ok());
    }

    #[test]
    fn test_malformed_template_is_a_template_error() {
        let result = TemplateSet::from_raw(&[(ArtifactKind::Resource, "{% if %}")]);
        assert!(matches!(result, Err(GeneratorError::Template { .. })));
    }

    #[test]
    fn test_filters() {
        let set = TemplateSet::from_raw(&[(
            ArtifactKind::Resource,
            "{{ name | pascal_case }} {{ text | go_string }}",
        )])
        .unwrap();

        let mut context = Context::new();
        context.insert("name", "internal_network");
        context.insert("text", "a \"b\"");

        let rendered = set.render("resource", &context).unwrap();
        assert_eq!(rendered, "InternalNetwork \"a \\\"b\\\"\"");
    }

    #[test]
    fn test_missing_directory() {
        let result = TemplateSet::from_dir(Path::new("/nonexistent/templates"));
        assert!(matches!(result, Err(GeneratorError::Template { .. })));
    }
}
