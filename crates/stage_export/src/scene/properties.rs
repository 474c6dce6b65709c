//! Custom property values
//!
//! Hosts attach free-form key/value metadata to scene nodes. Values arrive
//! already classified into a tagged variant at the collaborator boundary;
//! the export core never performs runtime type probing.

/// Prefix marking a property as host-internal; such keys are never exported
pub const INTERNAL_PREFIX: char = '_';

/// Typed custom property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Floating-point value, emitted with type tag `Float`
    Float(f64),
    /// Integer value, emitted with type tag `Int`
    Int(i64),
    /// Text value, emitted with type tag `String`
    Text(String),
}

impl PropertyValue {
    /// The type tag emitted into the document
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Float(_) => "Float",
            Self::Int(_) => "Int",
            Self::Text(_) => "String",
        }
    }

    /// The value rendered as document text
    pub fn value_text(&self) -> String {
        match self {
            Self::Float(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

/// Check whether a property key is host-internal and must be skipped
pub fn is_internal(name: &str) -> bool {
    name.starts_with(INTERNAL_PREFIX)
}
