//! OpenAPI 3.x specification parser
//!
//! Parses OpenAPI documents into resource definitions.
//!
//! ## Inference rules
//! - Paths without a `{` placeholder are collections and name a resource
//!   after their last segment (`/internalNetworks` -> `internal_network`).
//! - Parameterized paths are item paths; they are paired with the
//!   collection registered under their prefix (`/widgets/{id}` -> `/widgets`).
//! - Paths tagged `debug` or `debugging` are ignored.
//!
//! ## Usage
//! ```rust,ignore
//! use provider_codegen_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("openapi.json")?;
//! let resources = parser.parse()?;
//! ```

mod converter;
mod parser;
mod schema;
mod types;

pub use converter::convert_openapi_to_resources;
pub use parser::OpenApiParser;
pub use types::*;
