//! Resource intermediate representation
//!
//! Plain data describing the resources inferred from an API description.
//! The parser builds these values and the generator reads them; neither
//! side mutates a resource once parsing has finished.

use serde::{Deserialize, Serialize};

/// One inferred resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Singular snake_case name derived from the collection path
    pub name: String,

    /// List/create endpoint, e.g. `/widgets`
    pub collection_path: String,

    /// Single-item endpoint, e.g. `/widgets/{id}`; empty when none was paired
    #[serde(default)]
    pub item_path: String,

    /// Creation payload
    #[serde(default)]
    pub create_schema: Option<SchemaSpec>,

    /// Retrieval response
    #[serde(default)]
    pub read_schema: Option<SchemaSpec>,

    /// Mutation payload sent to the item path
    #[serde(default)]
    pub update_schema: Option<SchemaSpec>,

    #[serde(default)]
    pub has_delete: bool,
}

impl ResourceDef {
    /// Creates a resource that only knows its collection endpoint.
    pub fn new(name: impl Into<String>, collection_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection_path: collection_path.into(),
            item_path: String::new(),
            create_schema: None,
            read_schema: None,
            update_schema: None,
            has_delete: false,
        }
    }

    /// Whether an item endpoint was paired with the collection.
    pub fn has_item_path(&self) -> bool {
        !self.item_path.is_empty()
    }

    /// Whether the item endpoint accepts a mutation payload.
    pub fn has_update(&self) -> bool {
        self.has_item_path() && self.update_schema.is_some()
    }
}

/// An ordered, flattened object shape
///
/// Field order is the property declaration order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaSpec {
    pub fields: Vec<FieldDef>,
}

impl SchemaSpec {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDef> {
        self.fields.iter()
    }

    /// Looks up a field by its original property key.
    pub fn field(&self, source_name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.source_name == source_name)
    }
}

impl<'a> IntoIterator for &'a SchemaSpec {
    type Item = &'a FieldDef;
    type IntoIter = std::slice::Iter<'a, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// One resource attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// snake_case identifier
    pub name: String,

    /// Original property key, used on the wire
    pub source_name: String,

    pub kind: FieldKind,

    /// Allowed literal values in document order; empty when unconstrained
    #[serde(default)]
    pub enum_values: Vec<String>,

    #[serde(default)]
    pub required: bool,

    /// Output-only property
    #[serde(default)]
    pub read_only: bool,

    #[serde(default)]
    pub description: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, source_name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            source_name: source_name.into(),
            kind,
            enum_values: Vec::new(),
            required: false,
            read_only: false,
            description: None,
        }
    }

    /// Shorthand for a primitive field
    pub fn primitive(name: impl Into<String>, source_name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self::new(name, source_name, FieldKind::Primitive(ty))
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Shape category of a field
///
/// A list of objects is folded into [`FieldKind::Object`] with
/// `repeated` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Primitive(PrimitiveType),
    List(PrimitiveType),
    Map(PrimitiveType),
    Object { nested: SchemaSpec, repeated: bool },
}

impl FieldKind {
    /// Element type for primitive, list and map kinds.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            FieldKind::Primitive(ty) | FieldKind::List(ty) | FieldKind::Map(ty) => Some(*ty),
            FieldKind::Object { .. } => None,
        }
    }

    /// Nested shape for object and list-of-object kinds.
    pub fn nested(&self) -> Option<&SchemaSpec> {
        match self {
            FieldKind::Object { nested, .. } => Some(nested),
            _ => None,
        }
    }

    pub fn is_list_of_object(&self) -> bool {
        matches!(self, FieldKind::Object { repeated: true, .. })
    }

    /// Short label used in docs and CLI listings
    pub fn label(&self) -> String {
        match self {
            FieldKind::Primitive(ty) => ty.as_str().to_string(),
            FieldKind::List(ty) => format!("list({})", ty.as_str()),
            FieldKind::Map(ty) => format!("map({})", ty.as_str()),
            FieldKind::Object { repeated: false, .. } => "object".to_string(),
            FieldKind::Object { repeated: true, .. } => "list(object)".to_string(),
        }
    }
}

/// Scalar type of a primitive, list or map field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    #[default]
    String,
    Int,
    Float,
    Bool,
}

impl PrimitiveType {
    /// Maps an OpenAPI `type` keyword; `None` for non-primitive or unknown types.
    pub fn from_openapi(schema_type: &str) -> Option<Self> {
        match schema_type {
            "string" => Some(Self::String),
            "integer" => Some(Self::Int),
            "number" => Some(Self::Float),
            "boolean" => Some(Self::Bool),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}
