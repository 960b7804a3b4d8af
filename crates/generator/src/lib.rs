//! Code and documentation generation for provider resources
//!
//! This crate transforms parsed resource definitions into four artifacts per
//! resource:
//! - `resource_<name>.go` - Terraform plugin-framework resource
//! - `datasource_<name>.go` - read-only companion data source
//! - `docs/resources/<name>.md`
//! - `docs/data-sources/<name>.md`
//!
//! Files are returned in memory; writing them is up to the caller.

mod fields;
mod templates;

pub use fields::{build_records, resource_fields, FieldRecord, NestedBlock};
pub use templates::{TemplateRenderer, TemplateSet};

use provider_codegen_common::naming::{last_segment, to_pascal_case};
use provider_codegen_common::{
    FieldKind, GeneratorConfig, GeneratorError, PrimitiveType, ResourceDef, Result,
};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Resource,
    DataSource,
    ResourceDoc,
    DataSourceDoc,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Resource,
        ArtifactKind::DataSource,
        ArtifactKind::ResourceDoc,
        ArtifactKind::DataSourceDoc,
    ];

    /// Name the template is registered under
    pub fn template_name(&self) -> &'static str {
        match self {
            ArtifactKind::Resource => "resource",
            ArtifactKind::DataSource => "data_source",
            ArtifactKind::ResourceDoc => "resource_doc",
            ArtifactKind::DataSourceDoc => "data_source_doc",
        }
    }

    /// Template file name inside a template directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Resource => "resource.go.tera",
            ArtifactKind::DataSource => "data_source.go.tera",
            ArtifactKind::ResourceDoc => "resource.md.tera",
            ArtifactKind::DataSourceDoc => "data_source.md.tera",
        }
    }

    /// Output path relative to the caller's output roots
    pub fn relative_path(&self, resource_name: &str) -> PathBuf {
        match self {
            ArtifactKind::Resource => PathBuf::from(format!("resource_{}.go", resource_name)),
            ArtifactKind::DataSource => PathBuf::from(format!("datasource_{}.go", resource_name)),
            ArtifactKind::ResourceDoc => {
                PathBuf::from("docs/resources").join(format!("{}.md", resource_name))
            }
            ArtifactKind::DataSourceDoc => {
                PathBuf::from("docs/data-sources").join(format!("{}.md", resource_name))
            }
        }
    }

    pub fn is_documentation(&self) -> bool {
        matches!(self, ArtifactKind::ResourceDoc | ArtifactKind::DataSourceDoc)
    }
}

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: ArtifactKind,
    /// Path relative to the output root, e.g. `docs/resources/widget.md`
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Outcome of a best-effort run over many resources
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    /// Resources that failed, with the reason
    pub failures: Vec<(String, GeneratorError)>,
}

/// Resource generator
///
/// Renders the artifacts of each [`ResourceDef`] with an injected template
/// renderer.
pub struct ResourceGenerator<R = TemplateSet> {
    renderer: R,
    config: GeneratorConfig,
}

impl ResourceGenerator<TemplateSet> {
    /// Generator using the embedded templates
    pub fn with_embedded_templates(config: GeneratorConfig) -> Result<Self> {
        Ok(Self::new(TemplateSet::embedded()?, config))
    }
}

impl<R: TemplateRenderer> ResourceGenerator<R> {
    pub fn new(renderer: R, config: GeneratorConfig) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render all four artifacts for one resource
    pub fn generate(&self, resource: &ResourceDef) -> Result<Vec<GeneratedFile>> {
        let context = self.create_context(resource);

        ArtifactKind::ALL
            .iter()
            .map(|kind| {
                let rendered = self
                    .renderer
                    .render(kind.template_name(), &context)
                    .map_err(|e| {
                        GeneratorError::template(
                            &resource.name,
                            format!(
                                "{} template: {}",
                                kind.template_name(),
                                templates::describe_error(&e)
                            ),
                        )
                    })?;
                debug!(resource = %resource.name, template = kind.template_name(), "rendered");

                Ok(GeneratedFile {
                    kind: *kind,
                    path: kind.relative_path(&resource.name),
                    contents: rendered.into_bytes(),
                })
            })
            .collect()
    }

    /// Render every resource, stopping at the first failure
    pub fn generate_all(&self, resources: &[ResourceDef]) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(resources.len() * ArtifactKind::ALL.len());
        for resource in resources {
            files.extend(self.generate(resource)?);
        }
        Ok(files)
    }

    /// Render every resource, skipping and reporting failures
    pub fn generate_all_lenient(&self, resources: &[ResourceDef]) -> GenerationReport {
        let mut report = GenerationReport::default();
        for resource in resources {
            match self.generate(resource) {
                Ok(files) => report.files.extend(files),
                Err(e) => {
                    warn!(resource = %resource.name, error = %e, "skipping resource");
                    report.failures.push((resource.name.clone(), e));
                }
            }
        }
        report
    }

    /// Create template context from a ResourceDef
    fn create_context(&self, resource: &ResourceDef) -> tera::Context {
        let fields = resource_fields(resource);
        let records = build_records(&fields);
        let title = to_pascal_case(&resource.name);
        let id_is_string = fields.iter().any(|f| {
            f.name == "id" && f.kind == FieldKind::Primitive(PrimitiveType::String)
        });

        let mut context = tera::Context::new();
        context.insert("provider_name", &self.config.provider_name);
        context.insert("package_name", &self.config.package_name);
        context.insert("resource_name", &resource.name);
        context.insert(
            "original_name",
            last_segment(&resource.collection_path).unwrap_or(resource.name.as_str()),
        );
        context.insert(
            "type_name",
            &format!("{}_{}", self.config.provider_name, resource.name),
        );
        context.insert("title", &title);
        context.insert("struct_name", &format!("{}Resource", title));
        context.insert("constructor", &format!("New{}Resource", title));
        context.insert("model_name", &format!("{}ResourceModel", title));
        context.insert("data_source_struct_name", &format!("{}DataSource", title));
        context.insert("data_source_constructor", &format!("New{}DataSource", title));
        context.insert("data_source_model_name", &format!("{}DataSourceModel", title));
        context.insert("collection_path", &resource.collection_path);
        context.insert("item_path", &resource.item_path);
        context.insert("has_item_path", &resource.has_item_path());
        context.insert("has_update", &resource.has_update());
        context.insert("has_delete", &resource.has_delete);
        context.insert("id_is_string", &id_is_string);
        context.insert("validator_imports", &fields::validator_imports(&fields));
        context.insert("nested_blocks", &fields::nested_blocks(&records));
        context.insert("fields", &records);
        context
    }
}

/// Generate artifacts for all resources with the embedded templates
/// (convenience function)
pub fn generate_resources(
    resources: &[ResourceDef],
    config: GeneratorConfig,
) -> Result<Vec<GeneratedFile>> {
    ResourceGenerator::with_embedded_templates(config)?.generate_all(resources)
}
