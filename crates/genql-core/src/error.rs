use std::fmt;

/// Errors that occur when constructing or validating schema types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Model name is empty or contains non-identifier characters.
    InvalidModelName(String),
    /// Field name is empty or contains non-identifier characters.
    InvalidFieldName(String),
    /// Two fields of one model share a name.
    DuplicateFieldName(String),
    /// Relation declaration is not of the form `field:Model`.
    InvalidRelationFormat(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModelName(s) => {
                write!(
                    f,
                    "invalid model name '{s}': must match [A-Za-z][A-Za-z0-9_]*"
                )
            }
            Self::InvalidFieldName(s) => {
                write!(
                    f,
                    "invalid field name '{s}': must match [A-Za-z_][A-Za-z0-9_]*"
                )
            }
            Self::DuplicateFieldName(s) => write!(f, "duplicate field name '{s}'"),
            Self::InvalidRelationFormat(s) => {
                write!(
                    f,
                    "invalid relation '{s}': expected exactly two parts 'field:Model'"
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}
