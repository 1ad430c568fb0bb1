//! Integration tests driving the public API over complete programs.

use std::io::{self, Read};

use pslex::{ScanError, Scanner, Token, TokenKind, encoding};

/// A source that yields one byte per `read` call, simulating a slow stream.
struct OneByteAtATime<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> OneByteAtATime<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Read for OneByteAtATime<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

const PAGE_PROGRAM: &str = "
% draw a labelled box
/boxwidth 16#100 def
/boxheight 72 def
/label (finished \\(at last\\)) def
/scale 1.5 def
/tiny 1.2e-7 def
0 0 moveto
<48656C6C6F> show
<~FD,B0+DGm>F)Po,+EV1>F8~> show
";

fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source.as_bytes())
        .collect::<Result<_, _>>()
        .expect("program should scan cleanly")
}

#[test]
fn full_program_token_stream() {
    let tokens = scan(PAGE_PROGRAM);

    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Name, "/boxwidth"),
            Token::new(TokenKind::Radix, "16#100"),
            Token::new(TokenKind::Name, "def"),
            Token::new(TokenKind::Name, "/boxheight"),
            Token::new(TokenKind::Integer, "72"),
            Token::new(TokenKind::Name, "def"),
            Token::new(TokenKind::Name, "/label"),
            Token::new(TokenKind::LiteralString, "finished (at last)"),
            Token::new(TokenKind::Name, "def"),
            Token::new(TokenKind::Name, "/scale"),
            Token::new(TokenKind::Real, "1.5"),
            Token::new(TokenKind::Name, "def"),
            Token::new(TokenKind::Name, "/tiny"),
            Token::new(TokenKind::Real, "1.2e-7"),
            Token::new(TokenKind::Name, "def"),
            Token::new(TokenKind::Integer, "0"),
            Token::new(TokenKind::Integer, "0"),
            Token::new(TokenKind::Name, "moveto"),
            Token::new(TokenKind::HexString, "48656C6C6F"),
            Token::new(TokenKind::Name, "show"),
            Token::new(TokenKind::Base85String, "FD,B0+DGm>F)Po,+EV1>F8"),
            Token::new(TokenKind::Name, "show"),
        ]
    );
}

#[test]
fn chunked_source_produces_identical_tokens() {
    let whole = scan(PAGE_PROGRAM);
    let chunked: Vec<Token> = Scanner::new(OneByteAtATime::new(PAGE_PROGRAM.as_bytes()))
        .collect::<Result<_, _>>()
        .expect("chunked program should scan cleanly");

    assert_eq!(whole, chunked);
}

#[test]
fn tokens_outlive_the_scanner() {
    let tokens = {
        let source = String::from("(scoped) 42");
        scan(&source)
    };

    assert_eq!(tokens[0], Token::new(TokenKind::LiteralString, "scoped"));
    assert_eq!(tokens[1], Token::new(TokenKind::Integer, "42"));
}

#[test]
fn error_surfaces_once_then_sequence_stops() {
    let mut scanner = Scanner::new("ok (unterminated".as_bytes());

    assert_eq!(
        scanner.next(),
        Some(Ok(Token::new(TokenKind::Name, "ok")))
    );
    assert_eq!(scanner.next(), Some(Err(ScanError::UnterminatedString)));
    assert_eq!(scanner.next(), None);
}

#[test]
fn scan_errors_render_the_standard_error_names() {
    let err = Scanner::new("(oops".as_bytes())
        .next()
        .expect("one result")
        .expect_err("should fail");
    assert!(err.to_string().starts_with("syntaxerror:"));
}

#[test]
fn scanned_string_bodies_decode_to_bytes() {
    let tokens = scan("<48656C6C6F> <~FD,B0+DGm>F)Po,+EV1>F8~>");

    assert_eq!(
        encoding::decode_hex(&tokens[0].text).unwrap(),
        b"Hello"
    );
    assert_eq!(
        encoding::decode_ascii85(&tokens[1].text).unwrap(),
        b"this is some text"
    );
}

#[test]
fn odd_hex_body_decodes_to_whole_bytes() {
    let tokens = scan("<70756D7>");
    assert_eq!(tokens[0].text, "70756D70");
    assert_eq!(encoding::decode_hex(&tokens[0].text).unwrap(), b"pump");
}
