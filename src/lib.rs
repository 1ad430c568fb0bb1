//! Lexical scanner for a PostScript-like language.
//!
//! This crate is the foundation layer of an interpreter: it turns a stream
//! of Unicode source text into typed tokens — numbers, radix numbers,
//! strings, names — treating comments and whitespace as separators. No
//! parsing, object construction, or operator execution happens here.
//!
//! The scanner works over any [`std::io::Read`] source and pulls one token
//! at a time; hex and base85 string bodies are validated but kept as text,
//! with byte decoding left to the [`encoding`] module's callers.
//!
//! # Example
//!
//! ```
//! use pslex::{Scanner, TokenKind};
//!
//! let source = "/size 16#FFFE def (hello) show % set up the page";
//! let tokens: Vec<_> = Scanner::new(source.as_bytes())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(tokens[0].kind, TokenKind::Name);
//! assert_eq!(tokens[1].kind, TokenKind::Radix);
//! assert_eq!(tokens[1].text, "16#FFFE");
//! assert_eq!(tokens[3].kind, TokenKind::LiteralString);
//! assert_eq!(tokens[3].text, "hello");
//! ```

pub mod encoding;
pub mod lexer;

pub use lexer::{ScanError, Scanner, Token, TokenKind};
