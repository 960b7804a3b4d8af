//! OpenAPI 3.x type definitions
//!
//! Simplified representation focusing on resource extraction. Maps are
//! `IndexMap`s so paths and properties are visited in document order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Media type whose schemas are used for resource inference
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.3")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Path item (operations for a path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,
}

impl PathItem {
    /// Operations that can carry a request payload, in preference order
    pub fn mutating_operations(&self) -> impl Iterator<Item = &Operation> {
        [&self.post, &self.put, &self.patch]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// Whether any GET/POST/PUT/PATCH operation is tagged as a debug endpoint
    pub fn is_debug(&self) -> bool {
        [&self.get, &self.post, &self.put, &self.patch]
            .into_iter()
            .flatten()
            .any(Operation::is_debug)
    }

    /// First JSON request body among POST, PUT and PATCH
    pub fn request_schema(&self) -> Option<&Schema> {
        self.mutating_operations()
            .find_map(|op| op.request_body.as_ref()?.json_schema())
    }

    /// JSON schema of the GET "200" response
    pub fn response_schema(&self) -> Option<&Schema> {
        self.get.as_ref()?.responses.get("200")?.json_schema()
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Operation {
    pub fn is_debug(&self) -> bool {
        self.tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case("debug") || t.eq_ignore_ascii_case("debugging"))
    }
}

/// Request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content.get(JSON_MEDIA_TYPE)?.schema.as_ref()
    }
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content.get(JSON_MEDIA_TYPE)?.schema.as_ref()
    }
}

/// Media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// The `type` keyword: a single name, or a list in OpenAPI 3.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// The `additionalProperties` keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// Schema definition
///
/// A `$ref` schema carries only `ref_path`; resolve it against
/// [`OpenApiSpec::resolve_schema_ref`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    /// Enum values
    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "readOnly")]
    #[serde(default)]
    pub read_only: bool,

    /// Reference
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,
}

impl Schema {
    /// The declared type, skipping `"null"` in OpenAPI 3.1 type lists
    pub fn type_name(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(name) => Some(name.as_str()),
            SchemaType::Multiple(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }

    /// Enum literals rendered as strings; string values are not quoted
    pub fn enum_literals(&self) -> Vec<String> {
        self.enum_values
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

impl OpenApiSpec {
    /// Get a schema by reference path
    /// e.g., "#/components/schemas/Widget" -> returns Widget schema
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Schema> {
        let schema_name = ref_path.strip_prefix("#/components/schemas/")?;
        self.components
            .as_ref()
            .and_then(|c| c.schemas.get(schema_name))
    }
}
