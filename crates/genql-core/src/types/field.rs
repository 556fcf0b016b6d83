use serde::{Deserialize, Serialize};

use super::attribute;
use super::field_name::FieldName;
use super::field_type::FieldType;

/// One named, typed field of a model.
///
/// Fields are assembled with the consuming `array` / `optional` /
/// `with_attribute` builders and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    name: FieldName,
    field_type: FieldType,
    #[serde(default)]
    is_array: bool,
    #[serde(default)]
    is_optional: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    attribute: String,
}

impl Field {
    /// Creates a required, scalar field with no attribute.
    pub fn new(name: FieldName, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            is_array: false,
            is_optional: false,
            attribute: String::new(),
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns true if the attribute carries the identifier marker.
    pub fn is_identifier(&self) -> bool {
        attribute::has_marker(&self.attribute, attribute::IDENTIFIER)
    }

    /// Returns true if the attribute carries the uniqueness marker.
    pub fn is_unique(&self) -> bool {
        attribute::has_marker(&self.attribute, attribute::UNIQUE)
    }

    pub fn has_default(&self) -> bool {
        attribute::has_default(&self.attribute)
    }

    /// The type as written in a document, including `[]` and `?` suffixes.
    pub fn type_expression(&self) -> String {
        let mut out = self.field_type.rendered_name().to_string();
        if self.is_array {
            out.push_str("[]");
        }
        if self.is_optional {
            out.push('?');
        }
        out
    }
}

/// Renders the document line for this field, without indentation.
impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.type_expression())?;
        if !self.attribute.is_empty() {
            write!(f, " {}", self.attribute)?;
        }
        Ok(())
    }
}
