use genql_core::types::{attribute, Field, FieldName, FieldType, Model, ModelName};
use genql_core::Registry;

use crate::error::{DslError, Span};
use crate::lexer::{self, SpannedToken};
use crate::reader;
use crate::token::Token;

/// Keyword that marks an identifier field (`id:id:uuid`).
const IDENTIFIER_KEYWORD: &str = "id";

/// The type segment of a spec token after lexing.
#[derive(Debug)]
struct TypeExpr {
    name: String,
    span: Span,
    is_array: bool,
    is_optional: bool,
}

/// Parser for colon-delimited field specs.
///
/// Grammar of one token:
///
/// ```text
/// token    = name ":" type [ ":" modifier ]
/// type     = IDENT [ "[]" ] [ "?" ]
/// modifier = "ai" | "uuid" | "true" | "false" | "unique" | <literal default>
/// ```
pub struct SpecParser<'r> {
    registry: &'r Registry,
}

impl<'r> SpecParser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Parses one `name:type[:modifier]` token into a `Field`.
    ///
    /// # Errors
    ///
    /// - `InvalidSpecToken` for a malformed token or type segment
    /// - `InvalidType` for a lowercase type that is neither registered nor `id`
    /// - `InvalidIdentifierModifier` for an `id` field without `uuid` / `ai`
    pub fn parse_field(&self, token: &str) -> Result<Field, DslError> {
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(invalid_token(
                token,
                "expected name:type[:modifier]",
                Span::new(0, token.len()),
            ));
        }

        let name_text = parts[0];
        let type_text = parts[1];
        let modifier = parts.get(2).copied();

        let name_span = Span::new(0, name_text.len());
        let type_span = Span::new(name_span.end + 1, name_span.end + 1 + type_text.len());
        let modifier_span = Span::new(type_span.end + 1, token.len());

        if name_text.is_empty() {
            return Err(invalid_token(token, "field name is empty", name_span));
        }
        let name = FieldName::new(name_text)
            .map_err(|e| invalid_token(token, &e.to_string(), name_span))?;

        if modifier == Some("") {
            return Err(invalid_token(token, "modifier is empty", modifier_span));
        }

        let expr = parse_type_expr(token, type_text, type_span.start)?;

        let mut attributes: Vec<String> = Vec::new();
        let field_type = if starts_uppercase(&expr.name) {
            FieldType::NonPrimitive(expr.name.clone())
        } else if let Some(primitive) = self.registry.type_for_token(&expr.name) {
            primitive
        } else if expr.name == IDENTIFIER_KEYWORD {
            if expr.is_array || expr.is_optional {
                return Err(invalid_token(
                    token,
                    "an id field cannot be an array or optional",
                    type_span,
                ));
            }
            attributes.push(attribute::IDENTIFIER.to_string());
            match modifier {
                Some("uuid") => FieldType::String,
                Some("ai") => FieldType::Int,
                other => {
                    return Err(DslError::InvalidIdentifierModifier {
                        token: token.to_string(),
                        modifier: other.map(str::to_string),
                        span: if other.is_some() {
                            modifier_span
                        } else {
                            expr.span
                        },
                    });
                }
            }
        } else {
            return Err(DslError::InvalidType {
                token: token.to_string(),
                type_name: expr.name,
                span: expr.span,
            });
        };

        if let Some(modifier) = modifier {
            let expanded = self
                .registry
                .modifier_attribute(modifier)
                .map(str::to_string)
                .unwrap_or_else(|| attribute::literal_default(modifier));
            attributes.push(expanded);
        }

        let mut field = Field::new(name, field_type).with_attribute(attribute::join(&attributes));
        if expr.is_array {
            field = field.array();
        }
        if expr.is_optional {
            field = field.optional();
        }
        Ok(field)
    }

    /// Parses a whole model from spec tokens.
    ///
    /// Construction is all-or-nothing: the first failing token aborts and
    /// no partial model is returned.
    ///
    /// # Errors
    ///
    /// - `DuplicateModel` if `document` already declares `name`
    /// - `DuplicateField` if two tokens name the same field
    /// - any error from [`SpecParser::parse_field`]
    pub fn parse_model<S: AsRef<str>>(
        &self,
        document: &str,
        name: &str,
        tokens: &[S],
    ) -> Result<Model, DslError> {
        let model_name = ModelName::new(name)?;
        if reader::model_exists(document, name) {
            return Err(DslError::DuplicateModel {
                name: name.to_string(),
            });
        }

        let mut model = Model::new(model_name);
        for token in tokens {
            let field = self.parse_field(token.as_ref())?;
            let field_name = field.name().to_string();
            model
                .push_field(field)
                .map_err(|_| DslError::DuplicateField {
                    model: name.to_string(),
                    field: field_name,
                })?;
        }

        tracing::debug!(model = name, fields = model.len(), "parsed model");
        Ok(model)
    }
}

/// type = IDENT [ "[]" ] [ "?" ]
fn parse_type_expr(token: &str, type_text: &str, offset: usize) -> Result<TypeExpr, DslError> {
    let whole = Span::new(offset, offset + type_text.len());
    if type_text.is_empty() {
        return Err(invalid_token(token, "type is empty", whole));
    }

    let tokens = lexer::tokenize(type_text).map_err(|span| {
        invalid_token(token, "unexpected character in type", span.offset(offset))
    })?;

    let mut iter = tokens.into_iter().peekable();
    let head = match iter.next() {
        Some(SpannedToken {
            token: Token::Ident,
            span,
            text,
        }) => (text, span.offset(offset)),
        Some(other) => {
            return Err(invalid_token(
                token,
                &format!("expected type name, found {}", other.token.description()),
                other.span.offset(offset),
            ));
        }
        None => return Err(invalid_token(token, "type is empty", whole)),
    };

    let is_array = iter
        .next_if(|st| st.token == Token::ArrayMarker)
        .is_some();
    let is_optional = iter
        .next_if(|st| st.token == Token::OptionalMarker)
        .is_some();

    if let Some(rest) = iter.next() {
        let reason = if rest.token == Token::ArrayMarker && is_optional {
            "array marker '[]' must come before optional marker '?'".to_string()
        } else {
            format!("unexpected {} after type", rest.token.description())
        };
        return Err(invalid_token(token, &reason, rest.span.offset(offset)));
    }

    Ok(TypeExpr {
        name: head.0,
        span: head.1,
        is_array,
        is_optional,
    })
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn invalid_token(token: &str, reason: &str, span: Span) -> DslError {
    DslError::InvalidSpecToken {
        token: token.to_string(),
        reason: reason.to_string(),
        span,
    }
}
