use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

use super::field_name::FieldName;
use super::model_name::ModelName;

/// Cardinality of a relation declaration between two models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToOne => write!(f, "one-to-one"),
            Self::OneToMany => write!(f, "one-to-many"),
            Self::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// A parsed `field:Partner` relation declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDecl {
    pub kind: RelationKind,
    pub field: FieldName,
    pub partner: ModelName,
}

impl RelationDecl {
    /// Parses `field:Partner`. Anything other than exactly two non-empty
    /// colon-separated parts is rejected.
    pub fn parse(kind: RelationKind, token: &str) -> Result<Self, SchemaError> {
        let parts: Vec<&str> = token.split(':').collect();
        let [field, partner] = parts.as_slice() else {
            return Err(SchemaError::InvalidRelationFormat(token.to_string()));
        };
        if field.is_empty() || partner.is_empty() {
            return Err(SchemaError::InvalidRelationFormat(token.to_string()));
        }
        Ok(Self {
            kind,
            field: FieldName::new(*field)?,
            partner: ModelName::new(*partner)?,
        })
    }
}
