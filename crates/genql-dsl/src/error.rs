use std::fmt;

use genql_core::error::SchemaError;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shifts both ends right by `offset`.
    pub fn offset(&self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors raised while parsing spec tokens or reading and editing a
/// schema document.
///
/// Spec-token variants carry the whole token and a span into it so the
/// offending segment can be underlined.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DslError {
    /// The token is not of the form `name:type[:modifier]`.
    InvalidSpecToken {
        token: String,
        reason: String,
        span: Span,
    },

    /// The type is neither a registered keyword, a model reference nor `id`.
    InvalidType {
        token: String,
        type_name: String,
        span: Span,
    },

    /// An `id` field with a modifier other than `uuid` or `ai`.
    InvalidIdentifierModifier {
        token: String,
        modifier: Option<String>,
        span: Span,
    },

    /// A model with this name is already declared in the document.
    DuplicateModel { name: String },

    /// Two fields of the model being built share a name.
    DuplicateField { model: String, field: String },

    /// No `model <name>` block exists in the document.
    ModelNotFound { name: String },

    /// The block header was found but no closing brace follows it.
    UnterminatedBlock { name: String },

    /// The model block has no field carrying the identifier marker.
    IdentifierNotFound { model: String },

    /// The identifier field's declared type does not resolve.
    UnknownType { model: String, type_name: String },

    /// A line inside a block that is not `name type [attribute...]`.
    MalformedFieldLine { model: String, line: String },

    /// A relation declaration is not `field:Model`.
    InvalidRelationFormat { token: String },

    /// The document could not be read.
    DocumentUnreadable { path: String, reason: String },

    /// The document could not be written.
    DocumentUnwritable { path: String, reason: String },

    /// The document changed on disk after it was loaded.
    DocumentChanged { path: String },

    /// An error propagated from genql-core validation.
    CoreSchemaError { source: SchemaError },
}

impl DslError {
    /// The spec token and span for token-level errors.
    pub fn token_span(&self) -> Option<(&str, &Span)> {
        match self {
            Self::InvalidSpecToken { token, span, .. }
            | Self::InvalidType { token, span, .. }
            | Self::InvalidIdentifierModifier { token, span, .. } => Some((token, span)),
            _ => None,
        }
    }

    /// True for errors caused by the document rather than user input.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::DocumentUnreadable { .. }
                | Self::DocumentUnwritable { .. }
                | Self::DocumentChanged { .. }
        )
    }
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpecToken {
                token,
                reason,
                span,
            } => {
                write!(f, "invalid field spec '{token}' at {span}: {reason}")
            }
            Self::InvalidType {
                token,
                type_name,
                span,
            } => {
                write!(
                    f,
                    "invalid type '{type_name}' in '{token}' at {span}: not a known type, model reference or id"
                )
            }
            Self::InvalidIdentifierModifier {
                token,
                modifier,
                span,
            } => match modifier {
                Some(m) => write!(
                    f,
                    "invalid id modifier '{m}' in '{token}' at {span}: expected 'uuid' or 'ai'"
                ),
                None => write!(
                    f,
                    "missing id modifier in '{token}' at {span}: expected 'uuid' or 'ai'"
                ),
            },
            Self::DuplicateModel { name } => {
                write!(f, "model '{name}' already exists in the document")
            }
            Self::DuplicateField { model, field } => {
                write!(f, "field '{field}' is declared twice for model '{model}'")
            }
            Self::ModelNotFound { name } => {
                write!(f, "model '{name}' does not exist in the document; create it first")
            }
            Self::UnterminatedBlock { name } => {
                write!(f, "model '{name}' has no closing brace")
            }
            Self::IdentifierNotFound { model } => {
                write!(f, "model '{model}' has no @id field")
            }
            Self::UnknownType { model, type_name } => {
                write!(f, "unknown id type '{type_name}' in model '{model}'")
            }
            Self::MalformedFieldLine { model, line } => {
                write!(f, "cannot read field line '{line}' in model '{model}'")
            }
            Self::InvalidRelationFormat { token } => {
                write!(
                    f,
                    "invalid relation '{token}': expected exactly two parts 'field:Model'"
                )
            }
            Self::DocumentUnreadable { path, reason } => {
                write!(f, "cannot read schema document {path}: {reason}")
            }
            Self::DocumentUnwritable { path, reason } => {
                write!(f, "cannot write schema document {path}: {reason}")
            }
            Self::DocumentChanged { path } => {
                write!(f, "schema document {path} changed while it was being edited")
            }
            Self::CoreSchemaError { source } => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for DslError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CoreSchemaError { source } => Some(source),
            _ => None,
        }
    }
}

impl From<SchemaError> for DslError {
    fn from(source: SchemaError) -> Self {
        match source {
            SchemaError::InvalidRelationFormat(token) => Self::InvalidRelationFormat { token },
            other => Self::CoreSchemaError { source: other },
        }
    }
}
