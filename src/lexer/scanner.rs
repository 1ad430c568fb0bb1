//! Main scanner implementation.
//!
//! [`Scanner::next_token`] reads one codepoint to decide the token class,
//! then a specialized sub-scanner owns the rest of the token's characters.
//! The numeric family shares a single growable text buffer and a state tag,
//! so a scan that turns out not to be a number is relabeled as a name
//! without re-reading the source.

use std::io::Read;

use super::cursor::Cursor;
use super::error::ScanError;
use super::token::{Token, TokenKind};
use crate::encoding;

/// The seven characters that end an unquoted token.
///
/// Every sub-scanner consults this same set; comments and string bodies are
/// the only contexts in which these characters are ordinary input.
pub const DELIMITERS: [char; 7] = ['\0', ' ', '\t', '\r', '\n', '\x08', '\x0C'];

/// True for characters in [`DELIMITERS`].
#[inline]
fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Sub-states of the numeric scan.
///
/// The scan starts in `Integer` (or `Real` when seeded with `.`) and only
/// ever moves forward: Integer → Real → Radix never revisit each other, and
/// `Name` is terminal.
#[derive(Clone, Copy, PartialEq)]
enum NumericState {
    Integer,
    /// `exponent` records whether an `e`/`E` marker has been accepted.
    Real { exponent: bool },
    Radix,
    Name,
}

/// Scanner for PostScript-like source text.
///
/// Pulls codepoints from a [`Cursor`] over any [`Read`] source and produces
/// one [`Token`] per [`next_token`](Self::next_token) call. The `Iterator`
/// impl is the convenience sequence view: it stops cleanly at end-of-input
/// and fuses after yielding an error.
pub struct Scanner<R> {
    cursor: Cursor<R>,
    /// Set once the iterator surface has yielded an error.
    failed: bool,
}

impl<R: Read> Scanner<R> {
    /// Create a scanner over any byte source of UTF-8 text.
    ///
    /// In-memory sources work through their slice form, e.g.
    /// `Scanner::new(source.as_bytes())`.
    pub fn new(source: R) -> Self {
        Self {
            cursor: Cursor::new(source),
            failed: false,
        }
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` at end-of-input; the signal is distinct from
    /// every error in the [`ScanError`] taxonomy. An error is terminal for
    /// the current token; nothing already consumed is salvaged.
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        loop {
            let Some(ch) = self.cursor.next()? else {
                return Ok(None);
            };

            match ch {
                ch if is_delimiter(ch) => continue,
                // Comments never produce a token; the outer loop retries
                // the dispatch, so comment count never deepens the stack.
                '%' => self.skip_comment()?,
                '.' => {
                    return self
                        .scan_numeric(ch, NumericState::Real { exponent: false })
                        .map(Some);
                }
                '-' | '0'..='9' => return self.scan_numeric(ch, NumericState::Integer).map(Some),
                '(' => return self.scan_literal_string().map(Some),
                '<' => {
                    if matches!(self.cursor.peek(1)?.as_deref(), Some(['~'])) {
                        self.cursor.consume(1)?;
                        return self.scan_base85_string().map(Some);
                    }
                    return self.scan_hex_string().map(Some);
                }
                _ => return self.scan_name(String::from(ch)).map(Some),
            }
        }
    }

    /// Discard through end of line (LF or FF) or end-of-input.
    fn skip_comment(&mut self) -> Result<(), ScanError> {
        while let Some(ch) = self.cursor.next()? {
            if ch == '\n' || ch == '\x0C' {
                break;
            }
        }
        Ok(())
    }

    /// Scan the numeric family as one tagged-state loop over a shared text
    /// buffer. Switching states relabels the accumulated text; previously
    /// consumed characters are never re-read from the cursor.
    fn scan_numeric(&mut self, seed: char, mut state: NumericState) -> Result<Token, ScanError> {
        let mut text = String::from(seed);

        loop {
            let Some(ch) = self.cursor.next()? else {
                break;
            };
            if is_delimiter(ch) {
                break;
            }

            state = match state {
                NumericState::Integer => match ch {
                    '0'..='9' => {
                        text.push(ch);
                        NumericState::Integer
                    }
                    '.' => {
                        text.push(ch);
                        NumericState::Real { exponent: false }
                    }
                    '#' => {
                        if text.starts_with('-') {
                            return Err(ScanError::NegativeRadixBase(text));
                        }
                        text.push(ch);
                        NumericState::Radix
                    }
                    _ => {
                        text.push(ch);
                        NumericState::Name
                    }
                },
                NumericState::Real { exponent } => match ch {
                    '0'..='9' => {
                        text.push(ch);
                        state
                    }
                    'e' | 'E' if !exponent => {
                        text.push(ch);
                        NumericState::Real { exponent: true }
                    }
                    // The sign is only valid directly after the marker.
                    '-' if text.ends_with(['e', 'E']) => {
                        text.push(ch);
                        state
                    }
                    _ => {
                        text.push(ch);
                        NumericState::Name
                    }
                },
                NumericState::Radix => match ch {
                    // Digits up to base 36; whether they fit the stated
                    // base is the numeric evaluator's question.
                    '0'..='9' | 'a'..='z' | 'A'..='Z' => {
                        text.push(ch);
                        NumericState::Radix
                    }
                    _ => {
                        text.push(ch);
                        NumericState::Name
                    }
                },
                NumericState::Name => {
                    text.push(ch);
                    NumericState::Name
                }
            };
        }

        match state {
            NumericState::Integer => Ok(Token::new(TokenKind::Integer, text)),
            NumericState::Real { .. } => {
                if text.ends_with(['e', 'E']) {
                    Err(ScanError::TruncatedReal(text))
                } else {
                    Ok(Token::new(TokenKind::Real, text))
                }
            }
            NumericState::Radix => {
                if text.ends_with('#') {
                    Err(ScanError::TruncatedRadix(text))
                } else {
                    Ok(Token::new(TokenKind::Radix, text))
                }
            }
            NumericState::Name => Ok(Token::new(TokenKind::Name, text)),
        }
    }

    /// Scan a `(`-delimited literal string. Escapes are resolved here, so
    /// the token text is the decoded content.
    fn scan_literal_string(&mut self) -> Result<Token, ScanError> {
        let mut text = String::new();
        let mut open_parens = 0u32;

        loop {
            let Some(ch) = self.cursor.next()? else {
                return Err(ScanError::UnterminatedString);
            };

            match ch {
                '(' => {
                    open_parens += 1;
                    text.push(ch);
                }
                ')' => {
                    if open_parens == 0 {
                        break;
                    }
                    open_parens -= 1;
                    text.push(ch);
                }
                '\\' => self.scan_escape(&mut text)?,
                _ => text.push(ch),
            }
        }

        Ok(Token::new(TokenKind::LiteralString, text))
    }

    /// Resolve one backslash escape.
    ///
    /// The selector is read positionally as a byte: escape bodies in this
    /// language are ASCII. A multi-byte character after the backslash is
    /// completed and appended verbatim.
    fn scan_escape(&mut self, text: &mut String) -> Result<(), ScanError> {
        let Some(selector) = self.cursor.next_byte()? else {
            return Err(ScanError::UnterminatedString);
        };

        match selector {
            b'n' => text.push('\n'),
            b'r' => text.push('\r'),
            b't' => text.push('\t'),
            b'b' => text.push('\x08'),
            b'f' => text.push('\x0C'),
            b'\\' => text.push('\\'),
            b'(' => text.push('('),
            b')' => text.push(')'),
            // Line continuation: the escaped newline vanishes.
            b'\n' => {}
            // Likewise for CR, additionally swallowing one LF.
            b'\r' => {
                if matches!(self.cursor.peek(1)?.as_deref(), Some(['\n'])) {
                    self.cursor.consume(1)?;
                }
            }
            b'0'..=b'7' => {
                // Up to two more octal digits; peek, then commit only the
                // valid prefix.
                let ahead = match self.cursor.peek(2)? {
                    Some(chars) => chars,
                    None => self.cursor.peek(1)?.unwrap_or_default(),
                };
                let mut value = u32::from(selector - b'0');
                let mut extra = 0;
                for ch in ahead {
                    match ch.to_digit(8) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            extra += 1;
                        }
                        None => break,
                    }
                }
                self.cursor.consume(extra)?;
                // Three octal digits fit in 9 bits, always a valid scalar.
                // No masking to a byte: `\777` appends U+01FF.
                text.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            _ => {
                // Anything else is kept verbatim; the backslash is dropped.
                text.push(self.cursor.finish_codepoint(selector)?);
            }
        }

        Ok(())
    }

    /// Scan a hex string body; the leading `<` is already consumed and is
    /// not part of the text.
    fn scan_hex_string(&mut self) -> Result<Token, ScanError> {
        let mut text = String::new();

        loop {
            let Some(ch) = self.cursor.next()? else {
                return Err(ScanError::UnterminatedHexString);
            };

            match ch {
                '>' => break,
                '0'..='9' | 'a'..='f' | 'A'..='F' => text.push(ch),
                _ => return Err(ScanError::InvalidHexDigit(ch)),
            }
        }

        // Pad an odd digit count so the eventual byte-decode sees whole
        // bytes.
        if text.len() % 2 == 1 {
            text.push('0');
        }

        Ok(Token::new(TokenKind::HexString, text))
    }

    /// Scan a base85 string body; the `<~` lead is already consumed. The
    /// body is validated as ASCII85 and kept as scanned.
    fn scan_base85_string(&mut self) -> Result<Token, ScanError> {
        let mut text = String::new();

        loop {
            let Some(ch) = self.cursor.next()? else {
                return Err(ScanError::UnterminatedBase85String);
            };

            if ch == '~' {
                match self.cursor.peek(1)?.as_deref() {
                    Some(['>']) => {
                        self.cursor.consume(1)?;
                        break;
                    }
                    // A stray `~` is dropped.
                    Some(_) => continue,
                    None => return Err(ScanError::UnterminatedBase85String),
                }
            }

            text.push(ch);
        }

        // Validation only; the decoded bytes are discarded.
        encoding::decode_ascii85(&text)?;

        Ok(Token::new(TokenKind::Base85String, text))
    }

    /// Scan a name: everything through the next delimiter, verbatim.
    fn scan_name(&mut self, mut text: String) -> Result<Token, ScanError> {
        loop {
            match self.cursor.next()? {
                None => break,
                Some(ch) if is_delimiter(ch) => break,
                Some(ch) => text.push(ch),
            }
        }

        Ok(Token::new(TokenKind::Name, text))
    }
}

/// The sequence view: yields tokens until end-of-input, surfacing the first
/// error and then fusing.
impl<R: Read> Iterator for Scanner<R> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
