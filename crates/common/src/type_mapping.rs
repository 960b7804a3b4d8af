//! Mapping from IR primitive types to generated declarations
//!
//! Targets the Terraform plugin framework: every [`PrimitiveType`] has a
//! model type, a schema attribute type and an element type for collection
//! attributes.

use crate::ir::PrimitiveType;

/// Generated-code types for one primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Model struct field type, e.g. `types.Int64`
    pub model_type: &'static str,

    /// Schema attribute constructor, e.g. `schema.Int64Attribute`
    pub attribute_type: &'static str,

    /// Element type for list and map attributes, e.g. `types.Int64Type`
    pub element_type: &'static str,

    /// Validator interface and helper package, when one exists
    pub validator: Option<(&'static str, &'static str)>,
}

impl TypeMapping {
    /// Look up the mapping for a primitive type
    ///
    /// # Examples
    /// ```
    /// use provider_codegen_common::{PrimitiveType, TypeMapping};
    ///
    /// assert_eq!(TypeMapping::of(PrimitiveType::Int).model_type, "types.Int64");
    /// assert_eq!(TypeMapping::of(PrimitiveType::Bool).attribute_type, "schema.BoolAttribute");
    /// ```
    pub fn of(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::String => Self {
                model_type: "types.String",
                attribute_type: "schema.StringAttribute",
                element_type: "types.StringType",
                validator: Some(("validator.String", "stringvalidator")),
            },
            PrimitiveType::Int => Self {
                model_type: "types.Int64",
                attribute_type: "schema.Int64Attribute",
                element_type: "types.Int64Type",
                validator: Some(("validator.Int64", "int64validator")),
            },
            PrimitiveType::Float => Self {
                model_type: "types.Float64",
                attribute_type: "schema.Float64Attribute",
                element_type: "types.Float64Type",
                validator: Some(("validator.Float64", "float64validator")),
            },
            PrimitiveType::Bool => Self {
                model_type: "types.Bool",
                attribute_type: "schema.BoolAttribute",
                element_type: "types.BoolType",
                validator: None,
            },
        }
    }

    /// Whether enum literals of this type are quoted in generated code
    pub fn quotes_literals(ty: PrimitiveType) -> bool {
        ty == PrimitiveType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_total() {
        for ty in [
            PrimitiveType::String,
            PrimitiveType::Int,
            PrimitiveType::Float,
            PrimitiveType::Bool,
        ] {
            let mapping = TypeMapping::of(ty);
            assert!(mapping.model_type.starts_with("types."));
            assert!(mapping.attribute_type.starts_with("schema."));
            assert!(mapping.element_type.ends_with("Type"));
        }
    }

    #[test]
    fn test_default_is_string() {
        let mapping = TypeMapping::of(PrimitiveType::default());
        assert_eq!(mapping.attribute_type, "schema.StringAttribute");
        assert_eq!(mapping.validator, Some(("validator.String", "stringvalidator")));
    }

    #[test]
    fn test_bool_has_no_validator() {
        assert!(TypeMapping::of(PrimitiveType::Bool).validator.is_none());
        assert!(!TypeMapping::quotes_literals(PrimitiveType::Int));
        assert!(TypeMapping::quotes_literals(PrimitiveType::String));
    }
}
