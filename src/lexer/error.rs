//! Error types for the lexical layer.
//!
//! Every failure the scanner can produce is a [`ScanError`]. Display
//! messages are prefixed with the language's standard error names
//! (`syntaxerror`, `ioerror`) so a driver can surface them verbatim.

use thiserror::Error;

/// An error encountered while scanning.
///
/// All variants are terminal for the current `next_token` call; the scanner
/// performs no retry, recovery, or partial-token salvage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A real's exponent marker was the last character before a delimiter
    /// or end-of-input.
    #[error("syntaxerror: truncated real `{0}`")]
    TruncatedReal(String),

    /// A radix number's `#` was the last character before a delimiter or
    /// end-of-input.
    #[error("syntaxerror: truncated radix number `{0}`")]
    TruncatedRadix(String),

    /// A `#` was encountered while the accumulated numeric text carried a
    /// leading `-`.
    #[error("syntaxerror: negative radix base `{0}`")]
    NegativeRadixBase(String),

    /// End-of-input before a literal string's matching close paren.
    #[error("syntaxerror: unexpected end of file in string literal")]
    UnterminatedString,

    /// End-of-input before a hex string's closing `>`.
    #[error("syntaxerror: unexpected end of file in hex string")]
    UnterminatedHexString,

    /// End-of-input before a base85 string's closing `~>`.
    #[error("syntaxerror: unexpected end of file in base85 string")]
    UnterminatedBase85String,

    /// A hex string body contained a character that is neither a hex digit
    /// nor the terminator.
    #[error("syntaxerror: invalid hex digit {0:?}")]
    InvalidHexDigit(char),

    /// A base85 string body failed ASCII85 validation at the terminator.
    #[error("syntaxerror: invalid base85: {0}")]
    InvalidBase85(String),

    /// The source produced bytes that are not valid UTF-8.
    #[error("ioerror: malformed utf-8 sequence")]
    MalformedEncoding,

    /// The underlying source failed to read.
    #[error("ioerror: {0}")]
    Io(String),
}

// Captured as the display string so the enum stays `Clone + PartialEq`.
impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io(err.to_string())
    }
}
