use serde::{Deserialize, Serialize};

/// The closed set of field types a model field can carry.
///
/// `NonPrimitive` references another model by name; every other variant
/// is a document primitive with a fixed keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Int,
    DateTime,
    Boolean,
    Float,
    BigInt,
    Json,
    Bytes,
    NonPrimitive(String),
}

impl FieldType {
    /// All primitive variants, in declaration order.
    pub fn primitives() -> [FieldType; 8] {
        [
            Self::String,
            Self::Int,
            Self::DateTime,
            Self::Boolean,
            Self::Float,
            Self::BigInt,
            Self::Json,
            Self::Bytes,
        ]
    }

    /// The document keyword for a primitive type.
    ///
    /// Returns `None` for `NonPrimitive`; callers render the carried model
    /// name instead (see [`FieldType::rendered_name`]).
    pub fn document_name(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("String"),
            Self::Int => Some("Int"),
            Self::DateTime => Some("DateTime"),
            Self::Boolean => Some("Boolean"),
            Self::Float => Some("Float"),
            Self::BigInt => Some("BigInt"),
            Self::Json => Some("Json"),
            Self::Bytes => Some("Bytes"),
            Self::NonPrimitive(_) => None,
        }
    }

    /// The name written into a document: the keyword for primitives, the
    /// referenced model name otherwise.
    pub fn rendered_name(&self) -> &str {
        match self {
            Self::NonPrimitive(name) => name,
            other => other.document_name().unwrap_or_default(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::NonPrimitive(_))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered_name())
    }
}
