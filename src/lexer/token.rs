//! Token types produced by the scanner.

use std::fmt;

/// A token of source text.
///
/// `text` is an owned copy with no backing reference into the scanner's
/// read buffer, so a token outlives further scanning. For string kinds the
/// delimiters are stripped (and, for literal strings, escapes are
/// resolved); for every other kind `text` is the exact consumed source
/// substring.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// The classification of this token.
    pub kind: TokenKind,
    /// The token's text content.
    pub text: String,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

/// All token kinds the scanner produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer literal: `42`, `-1`. Text keeps the optional sign.
    Integer,
    /// Real literal: `3.14`, `1.2e-7`. Text keeps `.`, `e`/`E`, and signs.
    Real,
    /// Radix literal: `16#FFFE`. Text keeps the full `base#digits` form.
    Radix,
    /// Parenthesized string: `(abc)`. Text is the decoded content, escapes
    /// resolved and nested parens balanced.
    LiteralString,
    /// Hex string: `<736F>`. Text is the raw hex digits as scanned, padded
    /// to an even count; byte decoding is the consumer's job.
    HexString,
    /// Base85 string: `<~...~>`. Text is the raw body as scanned, validated
    /// for well-formedness only.
    Base85String,
    /// Anything else, including the fallback for malformed numerics.
    Name,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_new() {
        let token = Token::new(TokenKind::Integer, "42");
        assert_eq!(token.kind, TokenKind::Integer);
        assert_eq!(token.text, "42");
    }

    #[test]
    fn debug_format() {
        let token = Token::new(TokenKind::Name, "moveto");
        assert_eq!(format!("{token:?}"), "Name(\"moveto\")");
    }

    #[test]
    fn tokens_compare_by_kind_and_text() {
        assert_eq!(
            Token::new(TokenKind::Real, "1.5"),
            Token::new(TokenKind::Real, "1.5")
        );
        assert_ne!(
            Token::new(TokenKind::Real, "1.5"),
            Token::new(TokenKind::Name, "1.5")
        );
    }
}
