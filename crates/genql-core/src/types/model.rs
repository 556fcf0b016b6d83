use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

use super::field::Field;
use super::model_name::ModelName;

/// A named, ordered collection of fields.
///
/// Field order is declaration order and becomes document line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    name: ModelName,
    fields: Vec<Field>,
}

impl Model {
    /// Creates a model with no fields.
    pub fn new(name: ModelName) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Creates a model from a field list, rejecting duplicate field names.
    pub fn with_fields(name: ModelName, fields: Vec<Field>) -> Result<Self, SchemaError> {
        let mut model = Self::new(name);
        for field in fields {
            model.push_field(field)?;
        }
        Ok(model)
    }

    /// Appends a field, keeping names unique within the model.
    pub fn push_field(&mut self, field: Field) -> Result<(), SchemaError> {
        if self.field(field.name().as_str()).is_some() {
            return Err(SchemaError::DuplicateFieldName(field.name().to_string()));
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn name(&self) -> &ModelName {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name().as_str() == name)
    }

    /// The first field carrying the identifier marker.
    pub fn identifier(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_identifier())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
