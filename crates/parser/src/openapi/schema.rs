//! Flattening of OpenAPI schemas into IR field lists

use super::types::{AdditionalProperties, OpenApiSpec, Schema};
use provider_codegen_common::naming::to_snake_case;
use provider_codegen_common::{
    FieldDef, FieldKind, GeneratorError, PrimitiveType, Result, SchemaSpec,
};

/// Hops allowed when following a chain of `$ref`s to a concrete schema
const MAX_REF_HOPS: usize = 32;

/// Flattens schemas of one document
///
/// Tracks the component schemas currently being flattened so that a
/// self-referencing component is reported instead of recursing forever.
pub(crate) struct Flattener<'a> {
    spec: &'a OpenApiSpec,
    active: Vec<&'a str>,
}

impl<'a> Flattener<'a> {
    pub(crate) fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            spec,
            active: Vec::new(),
        }
    }

    /// Flatten a request or response body
    ///
    /// A top-level array (a list response) is flattened through its items.
    pub(crate) fn flatten_body(&mut self, schema: &'a Schema) -> Result<SchemaSpec> {
        let resolved = self.resolve(schema)?;
        match (resolved.type_name(), resolved.items.as_deref()) {
            (Some("array"), Some(items)) => self.flatten(items),
            _ => self.flatten(schema),
        }
    }

    /// Flatten an object schema into one field per declared property
    pub(crate) fn flatten(&mut self, schema: &'a Schema) -> Result<SchemaSpec> {
        let (resolved, refs) = self.resolve_chain(schema)?;
        if let Some(name) = refs.iter().copied().find(|name| self.active.contains(name)) {
            return Err(GeneratorError::Input(format!(
                "Recursive schema reference: #/components/schemas/{}",
                name
            )));
        }

        let depth = self.active.len();
        self.active.extend(refs);
        let fields = resolved
            .properties
            .iter()
            .map(|(key, property)| {
                let required = resolved.required.iter().any(|r| r == key);
                self.field(key, property, required)
            })
            .collect::<Result<Vec<_>>>();
        self.active.truncate(depth);

        Ok(SchemaSpec::new(fields?))
    }

    fn field(&mut self, key: &str, property: &'a Schema, required: bool) -> Result<FieldDef> {
        let resolved = self.resolve(property)?;
        let kind = self.kind_of(property, resolved)?;

        Ok(FieldDef {
            name: to_snake_case(key),
            source_name: key.to_string(),
            kind,
            enum_values: resolved.enum_literals(),
            required,
            read_only: property.read_only || resolved.read_only,
            description: property
                .description
                .clone()
                .or_else(|| resolved.description.clone()),
        })
    }

    fn kind_of(&mut self, property: &'a Schema, resolved: &'a Schema) -> Result<FieldKind> {
        let kind = match resolved.type_name() {
            Some("array") => match resolved.items.as_deref() {
                None => FieldKind::List(PrimitiveType::String),
                Some(items) => match scalar_type(self.resolve(items)?) {
                    Some(ty) => FieldKind::List(ty),
                    None => FieldKind::Object {
                        nested: self.flatten(items)?,
                        repeated: true,
                    },
                },
            },
            Some("object") => {
                let map_value = match &resolved.additional_properties {
                    Some(AdditionalProperties::Schema(value)) => scalar_type(self.resolve(value)?),
                    _ => None,
                };
                match map_value {
                    Some(ty) => FieldKind::Map(ty),
                    None => FieldKind::Object {
                        nested: self.flatten(property)?,
                        repeated: false,
                    },
                }
            }
            Some(other) => FieldKind::Primitive(PrimitiveType::from_openapi(other).unwrap_or_default()),
            None if resolved.properties.is_empty() => FieldKind::Primitive(PrimitiveType::String),
            None => FieldKind::Object {
                nested: self.flatten(property)?,
                repeated: false,
            },
        };
        Ok(kind)
    }

    fn resolve(&self, schema: &'a Schema) -> Result<&'a Schema> {
        self.resolve_chain(schema).map(|(resolved, _)| resolved)
    }

    /// Follow `$ref`s to a concrete schema, returning the component names passed
    fn resolve_chain(&self, schema: &'a Schema) -> Result<(&'a Schema, Vec<&'a str>)> {
        let mut current = schema;
        let mut refs = Vec::new();

        while let Some(ref_path) = current.ref_path.as_deref() {
            if refs.len() >= MAX_REF_HOPS {
                return Err(GeneratorError::Input(format!(
                    "Reference chain too long at {}",
                    ref_path
                )));
            }
            let name = ref_path
                .strip_prefix("#/components/schemas/")
                .ok_or_else(|| {
                    GeneratorError::Input(format!("Unsupported schema reference: {}", ref_path))
                })?;
            current = self.spec.resolve_schema_ref(ref_path).ok_or_else(|| {
                GeneratorError::Input(format!("Unresolved schema reference: {}", ref_path))
            })?;
            refs.push(name);
        }

        Ok((current, refs))
    }
}

/// Primitive type of a scalar schema; untyped schemas without properties
/// count as strings
fn scalar_type(schema: &Schema) -> Option<PrimitiveType> {
    match schema.type_name() {
        Some(name) => PrimitiveType::from_openapi(name),
        None if schema.properties.is_empty() && schema.additional_properties.is_none() => {
            Some(PrimitiveType::String)
        }
        None => None,
    }
}
