use logos::Logos;

use crate::error::Span;
use crate::token::Token;

/// A token paired with its source span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// Tokenizes the type segment of a spec token.
///
/// # Errors
///
/// Returns the span of the first slice the lexer cannot match.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, Span> {
    let mut tokens = Vec::new();

    let lexer = Token::lexer(source);
    for (result, range) in lexer.spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => {
                tokens.push(SpannedToken {
                    token,
                    span,
                    text: source[range].to_string(),
                });
            }
            Err(()) => return Err(span),
        }
    }

    Ok(tokens)
}
