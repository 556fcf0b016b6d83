use logos::Logos;

/// Tokens of the type segment of a spec token (`string[]?`, `Author`).
///
/// Whitespace is not skipped: a type segment never contains any.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `[]`, marks the field as an array.
    #[token("[]")]
    ArrayMarker,

    /// `?`, marks the field as optional.
    #[token("?")]
    OptionalMarker,

    /// A type keyword or model name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ArrayMarker => "array marker '[]'",
            Self::OptionalMarker => "optional marker '?'",
            Self::Ident => "type name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Result<Token, ()>> {
        Token::lexer(source).collect()
    }

    #[test]
    fn ident_then_markers() {
        assert_eq!(
            lex("string[]?"),
            vec![
                Ok(Token::Ident),
                Ok(Token::ArrayMarker),
                Ok(Token::OptionalMarker)
            ]
        );
    }

    #[test]
    fn lone_bracket_is_an_error() {
        assert!(lex("string[").iter().any(Result::is_err));
    }

    #[test]
    fn description() {
        assert_eq!(Token::Ident.description(), "type name");
    }
}
