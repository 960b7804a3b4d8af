//! Per-field template records
//!
//! Turns IR fields into the values templates interpolate: Go identifiers,
//! model types, and fully formatted schema attribute declarations.

use provider_codegen_common::naming::to_pascal_case;
use provider_codegen_common::{FieldDef, FieldKind, PrimitiveType, ResourceDef, SchemaSpec, TypeMapping};
use serde::Serialize;
use std::collections::BTreeSet;

/// Indentation (in tabs) of top-level attribute entries in the templates
pub(crate) const ATTRIBUTE_INDENT: usize = 3;

/// Whose schema a declaration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Resource,
    DataSource,
}

/// Where an attribute sits in the schema tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scope {
    /// Entry of the top-level attribute map
    top_level: bool,
    /// Some ancestor is computed, so nothing below it is configurable
    computed: bool,
}

impl Scope {
    const TOP: Scope = Scope {
        top_level: true,
        computed: false,
    };

    fn child(parent_computed: bool) -> Scope {
        Scope {
            top_level: false,
            computed: parent_computed,
        }
    }
}

/// Template record for one attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRecord {
    pub name: String,
    pub source_name: String,
    /// Go struct field name
    pub identifier: String,
    pub model_type: String,
    /// Resource schema attribute expression
    pub declaration: String,
    /// Data source schema attribute expression
    pub data_source_declaration: String,
    pub kind: String,
    pub doc_type: String,
    /// `required`, `optional` or `read_only`
    pub section: String,
    pub required: bool,
    pub read_only: bool,
    pub description: Option<String>,
    pub enum_values: Vec<String>,
    pub nested: Vec<FieldRecord>,
}

/// Nested attribute listing for documentation pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedBlock {
    /// Dotted path from the top-level attribute, e.g. `rules.match`
    pub path: String,
    pub fields: Vec<FieldRecord>,
}

/// Collect the attributes of a resource
///
/// Fields come from the create schema. Properties only present in the read
/// schema follow as read-only attributes, and a computed `id` is added up
/// front when neither schema declares one.
pub fn resource_fields(resource: &ResourceDef) -> Vec<FieldDef> {
    let mut fields: Vec<FieldDef> = resource
        .create_schema
        .as_ref()
        .map(|schema| schema.fields.clone())
        .unwrap_or_default();

    if let Some(read) = &resource.read_schema {
        for field in read {
            if !fields.iter().any(|f| f.source_name == field.source_name) {
                fields.push(field.clone().with_read_only(true).with_required(false));
            }
        }
    }

    if !fields.iter().any(|f| f.name == "id") {
        let id = FieldDef::primitive("id", "id", PrimitiveType::String)
            .with_read_only(true)
            .with_description(format!("Identifier of the {}.", resource.name));
        fields.insert(0, id);
    }

    fields
}

/// Build template records for a list of fields
pub fn build_records(fields: &[FieldDef]) -> Vec<FieldRecord> {
    fields
        .iter()
        .map(|f| build_record(f, ATTRIBUTE_INDENT, false))
        .collect()
}

/// Children of a read-only attribute are documented as read-only too
fn build_record(field: &FieldDef, indent: usize, parent_read_only: bool) -> FieldRecord {
    let read_only = field.read_only || parent_read_only;
    let required = field.required && !read_only;
    let nested = field
        .kind
        .nested()
        .map(|schema| {
            schema
                .iter()
                .map(|f| build_record(f, indent + 2, read_only))
                .collect()
        })
        .unwrap_or_default();

    FieldRecord {
        name: field.name.clone(),
        source_name: field.source_name.clone(),
        identifier: go_identifier(&field.name),
        model_type: model_type(&field.kind).to_string(),
        declaration: declaration(field, Mode::Resource, indent),
        data_source_declaration: declaration(field, Mode::DataSource, indent),
        kind: field.kind.label(),
        doc_type: doc_type(&field.kind),
        section: section(required, read_only).to_string(),
        required,
        read_only,
        description: field.description.clone(),
        enum_values: field.enum_values.clone(),
        nested,
    }
}

/// Flatten nested records into documentation blocks, depth first
pub fn nested_blocks(records: &[FieldRecord]) -> Vec<NestedBlock> {
    let mut blocks = Vec::new();
    collect_blocks(records, "", &mut blocks);
    blocks
}

fn collect_blocks(records: &[FieldRecord], parent: &str, blocks: &mut Vec<NestedBlock>) {
    for record in records.iter().filter(|r| !r.nested.is_empty()) {
        let path = if parent.is_empty() {
            record.name.clone()
        } else {
            format!("{}.{}", parent, record.name)
        };
        blocks.push(NestedBlock {
            path: path.clone(),
            fields: record.nested.clone(),
        });
        collect_blocks(&record.nested, &path, blocks);
    }
}

/// Validator helper packages referenced by resource declarations
pub fn validator_imports(fields: &[FieldDef]) -> Vec<String> {
    let mut packages = BTreeSet::new();
    collect_validators(fields.iter(), &mut packages);

    let mut imports: Vec<String> = packages
        .into_iter()
        .map(|pkg| format!("github.com/hashicorp/terraform-plugin-framework-validators/{}", pkg))
        .collect();
    if !imports.is_empty() {
        imports.push("github.com/hashicorp/terraform-plugin-framework/schema/validator".to_string());
    }
    imports
}

/// Read-only attributes and everything below them carry no validators
fn collect_validators<'a>(fields: impl Iterator<Item = &'a FieldDef>, packages: &mut BTreeSet<&'static str>) {
    for field in fields.filter(|f| !f.read_only) {
        match &field.kind {
            FieldKind::Primitive(ty) if !field.enum_values.is_empty() => {
                if let Some((_, pkg)) = TypeMapping::of(*ty).validator {
                    packages.insert(pkg);
                }
            }
            FieldKind::Object { nested, .. } => collect_validators(nested.iter(), packages),
            _ => {}
        }
    }
}

/// Go model field type
pub fn model_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Primitive(ty) => TypeMapping::of(*ty).model_type,
        FieldKind::List(_) | FieldKind::Object { repeated: true, .. } => "types.List",
        FieldKind::Map(_) => "types.Map",
        FieldKind::Object { repeated: false, .. } => "types.Object",
    }
}

/// PascalCase Go identifier for a snake_case name
pub fn go_identifier(name: &str) -> String {
    let ident = to_pascal_case(name);
    match ident.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => ident,
        _ => format!("Field{}", ident),
    }
}

/// Quote a string as a Go interpreted string literal
pub fn go_string(s: &str) -> String {
    // JSON string escapes are a subset of Go's.
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}

fn section(required: bool, read_only: bool) -> &'static str {
    if read_only {
        "read_only"
    } else if required {
        "required"
    } else {
        "optional"
    }
}

fn doc_type(kind: &FieldKind) -> String {
    fn scalar(ty: PrimitiveType) -> &'static str {
        match ty {
            PrimitiveType::String => "String",
            PrimitiveType::Int => "Number",
            PrimitiveType::Float => "Number",
            PrimitiveType::Bool => "Boolean",
        }
    }

    match kind {
        FieldKind::Primitive(ty) => scalar(*ty).to_string(),
        FieldKind::List(ty) => format!("List of {}", scalar(*ty)),
        FieldKind::Map(ty) => format!("Map of {}", scalar(*ty)),
        FieldKind::Object { repeated: false, .. } => "Attributes".to_string(),
        FieldKind::Object { repeated: true, .. } => "Attributes List".to_string(),
    }
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

/// Format a schema attribute expression
///
/// The first line is unindented so it can follow `"name": ` in a template;
/// continuation lines are indented relative to `indent`.
pub(crate) fn declaration(field: &FieldDef, mode: Mode, indent: usize) -> String {
    declaration_in(field, mode, Scope::TOP, indent)
}

fn declaration_in(field: &FieldDef, mode: Mode, scope: Scope, indent: usize) -> String {
    let inner = tabs(indent + 1);
    let flag = presence(field, mode, scope);
    let computed = flag == Presence::Computed;
    let mut lines = Vec::new();

    let constructor = match &field.kind {
        FieldKind::Primitive(ty) => TypeMapping::of(*ty).attribute_type,
        FieldKind::List(_) => "schema.ListAttribute",
        FieldKind::Map(_) => "schema.MapAttribute",
        FieldKind::Object { repeated: false, .. } => "schema.SingleNestedAttribute",
        FieldKind::Object { repeated: true, .. } => "schema.ListNestedAttribute",
    };
    lines.push(format!("{}{{", constructor));
    lines.push(format!("{}{},", inner, flag.as_str()));

    if let Some(description) = &field.description {
        lines.push(format!("{}MarkdownDescription: {},", inner, go_string(description)));
    }

    match &field.kind {
        FieldKind::Primitive(ty) => {
            if let Some(validator) = enum_validator(field, *ty, mode, computed) {
                lines.push(format!("{}Validators: []{}{{", inner, validator.0));
                lines.push(format!("{}\t{},", inner, validator.1));
                lines.push(format!("{}}},", inner));
            }
        }
        FieldKind::List(ty) | FieldKind::Map(ty) => {
            lines.push(format!(
                "{}ElementType: {},",
                inner,
                TypeMapping::of(*ty).element_type
            ));
        }
        FieldKind::Object {
            nested,
            repeated: false,
        } => {
            lines.extend(attribute_map(nested, mode, Scope::child(computed), indent + 1));
        }
        FieldKind::Object {
            nested,
            repeated: true,
        } => {
            lines.push(format!("{}NestedObject: schema.NestedAttributeObject{{", inner));
            lines.extend(attribute_map(nested, mode, Scope::child(computed), indent + 2));
            lines.push(format!("{}}},", inner));
        }
    }

    lines.push(format!("{}}}", tabs(indent)));
    lines.join("\n")
}

/// `Attributes: map[string]schema.Attribute{...},` at `indent`
fn attribute_map(schema: &SchemaSpec, mode: Mode, scope: Scope, indent: usize) -> Vec<String> {
    let mut lines = vec![format!("{}Attributes: map[string]schema.Attribute{{", tabs(indent))];
    for field in schema {
        lines.push(format!(
            "{}{}: {},",
            tabs(indent + 1),
            go_string(&field.name),
            declaration_in(field, mode, scope, indent + 1)
        ));
    }
    lines.push(format!("{}}},", tabs(indent)));
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
    Computed,
}

impl Presence {
    fn as_str(self) -> &'static str {
        match self {
            Presence::Required => "Required: true",
            Presence::Optional => "Optional: true",
            Presence::Computed => "Computed: true",
        }
    }
}

/// Data sources look entries up by their top-level `id`
fn presence(field: &FieldDef, mode: Mode, scope: Scope) -> Presence {
    match mode {
        Mode::DataSource if scope.top_level && field.name == "id" => Presence::Required,
        Mode::DataSource => Presence::Computed,
        Mode::Resource if scope.computed || field.read_only => Presence::Computed,
        Mode::Resource if field.required => Presence::Required,
        Mode::Resource => Presence::Optional,
    }
}

/// `(interface, "pkg.OneOf(...)")` for an enum-constrained configurable field
fn enum_validator(
    field: &FieldDef,
    ty: PrimitiveType,
    mode: Mode,
    computed: bool,
) -> Option<(&'static str, String)> {
    if mode != Mode::Resource || computed || field.enum_values.is_empty() {
        return None;
    }
    let (interface, package) = TypeMapping::of(ty).validator?;
    let literals: Vec<String> = field
        .enum_values
        .iter()
        .map(|v| {
            if TypeMapping::quotes_literals(ty) {
                go_string(v)
            } else {
                v.clone()
            }
        })
        .collect();
    Some((interface, format!("{}.OneOf({})", package, literals.join(", "))))
}
