use genql_dsl::DslError;
use miette::{Diagnostic, NamedSource, SourceSpan};

/// A diagnostic for a rejected field spec token.
///
/// The token itself is the source text so the label lands under the
/// failing segment.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct SpecDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

/// Convert a token-level `DslError` into a `SpecDiagnostic`.
///
/// Returns `None` for errors that carry no token span.
pub fn spec_diagnostic(error: &DslError) -> Option<SpecDiagnostic> {
    let (token, span) = error.token_span()?;
    let src = NamedSource::new("field spec", token.to_string());
    let span: SourceSpan = (span.start, span.end.saturating_sub(span.start)).into();

    let (message, label, suggestion) = match error {
        DslError::InvalidSpecToken { reason, .. } => (
            format!("invalid field spec '{token}'"),
            reason.clone(),
            Some("Write fields as name:type[:modifier], e.g. email:string:unique.".to_string()),
        ),
        DslError::InvalidType { type_name, .. } => (
            format!("unknown type '{type_name}'"),
            "not a known type".to_string(),
            Some(
                "Use one of string, int, bigint, float, date, json, bytes, bool, id, \
                 or a capitalised model name."
                    .to_string(),
            ),
        ),
        DslError::InvalidIdentifierModifier { modifier, .. } => (
            match modifier {
                Some(m) => format!("invalid id modifier '{m}'"),
                None => "id field without a modifier".to_string(),
            },
            "expected uuid or ai".to_string(),
            Some("Declare identifiers as id:id:uuid or id:id:ai.".to_string()),
        ),
        _ => (error.to_string(), "here".to_string(), None),
    };

    Some(SpecDiagnostic {
        src,
        span,
        message,
        label,
        suggestion,
    })
}

/// A printable miette report for a token-level error.
pub fn spec_report(error: &DslError) -> Option<miette::Report> {
    spec_diagnostic(error).map(miette::Report::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genql_dsl::Span;

    #[test]
    fn invalid_type_diagnostic() {
        let err = DslError::InvalidType {
            token: "age:integer".into(),
            type_name: "integer".into(),
            span: Span::new(4, 11),
        };
        let diag = spec_diagnostic(&err).unwrap();
        assert!(diag.message.contains("integer"));
        assert_eq!(diag.span.offset(), 4);
        assert_eq!(diag.span.len(), 7);
        assert!(diag.suggestion.as_ref().unwrap().contains("bigint"));
    }

    #[test]
    fn missing_id_modifier_diagnostic() {
        let err = DslError::InvalidIdentifierModifier {
            token: "id:id".into(),
            modifier: None,
            span: Span::new(3, 5),
        };
        let diag = spec_diagnostic(&err).unwrap();
        assert!(diag.message.contains("without a modifier"));
        assert!(diag.suggestion.as_ref().unwrap().contains("id:id:uuid"));
    }

    #[test]
    fn malformed_token_uses_reason_as_label() {
        let err = DslError::InvalidSpecToken {
            token: "scores:float?[]".into(),
            reason: "array marker '[]' must come before optional marker '?'".into(),
            span: Span::new(13, 15),
        };
        let diag = spec_diagnostic(&err).unwrap();
        assert!(diag.label.contains("before optional"));
    }

    #[test]
    fn non_token_errors_have_no_diagnostic() {
        let err = DslError::ModelNotFound { name: "Book".into() };
        assert!(spec_diagnostic(&err).is_none());
        assert!(spec_report(&err).is_none());
    }
}
