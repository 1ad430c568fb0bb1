//! Buffered codepoint cursor over a byte source.
//!
//! The cursor is forward-only: [`peek`](Cursor::peek) decodes ahead inside
//! the internal buffer without advancing, and [`consume`](Cursor::consume)
//! commits codepoints previously returned by a peek. A single byte buffer,
//! refilled in chunks, backs all reads, so neither peeking nor decoding
//! makes a system call per codepoint.

use std::io::{ErrorKind, Read};

use super::error::ScanError;

/// Bytes requested from the source per refill.
const READ_CHUNK: usize = 4 * 1024;

/// A forward-only, buffered reader yielding Unicode codepoints.
///
/// Single owner, single-threaded; the position advances monotonically and
/// is never rewound.
pub struct Cursor<R> {
    source: R,
    /// Buffered bytes; `pos..` is unconsumed.
    buf: Vec<u8>,
    /// Read position within `buf`.
    pos: usize,
    /// Set once the source reports end-of-input.
    eof: bool,
}

impl<R: Read> Cursor<R> {
    /// Create a cursor over any byte source of UTF-8 text.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: Vec::with_capacity(READ_CHUNK),
            pos: 0,
            eof: false,
        }
    }

    /// Consume and return the next codepoint, or `None` at end-of-input.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<char>, ScanError> {
        match self.decode_at(0)? {
            Some((ch, width)) => {
                self.pos += width;
                Ok(Some(ch))
            }
            None => Ok(None),
        }
    }

    /// Peek the next `n` codepoints without advancing the position.
    ///
    /// Returns `None` if fewer than `n` codepoints remain before
    /// end-of-input; errors only on I/O failure or malformed encoding.
    pub fn peek(&mut self, n: usize) -> Result<Option<Vec<char>>, ScanError> {
        let mut chars = Vec::with_capacity(n);
        let mut offset = 0;
        for _ in 0..n {
            match self.decode_at(offset)? {
                Some((ch, width)) => {
                    chars.push(ch);
                    offset += width;
                }
                None => return Ok(None),
            }
        }
        Ok(Some(chars))
    }

    /// Advance past `n` codepoints previously obtained via
    /// [`peek`](Self::peek), returning them.
    pub fn consume(&mut self, n: usize) -> Result<Vec<char>, ScanError> {
        let mut chars = Vec::with_capacity(n);
        for _ in 0..n {
            match self.next()? {
                Some(ch) => chars.push(ch),
                None => break,
            }
        }
        Ok(chars)
    }

    /// Consume and return the next raw byte, or `None` at end-of-input.
    ///
    /// Used only where an escape's second character must be read
    /// positionally, without multi-byte decoding. Taking the lead byte of a
    /// multi-byte sequence leaves the remainder for
    /// [`finish_codepoint`](Self::finish_codepoint).
    pub fn next_byte(&mut self) -> Result<Option<u8>, ScanError> {
        self.fill(1)?;
        if self.available() == 0 {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Complete a codepoint whose lead byte was already taken with
    /// [`next_byte`](Self::next_byte).
    pub(crate) fn finish_codepoint(&mut self, lead: u8) -> Result<char, ScanError> {
        let width = utf8_width(lead).ok_or(ScanError::MalformedEncoding)?;
        if width == 1 {
            return Ok(char::from(lead));
        }
        self.fill(width - 1)?;
        if self.available() < width - 1 {
            return Err(ScanError::MalformedEncoding);
        }
        let mut bytes = [0u8; 4];
        bytes[0] = lead;
        bytes[1..width].copy_from_slice(&self.buf[self.pos..self.pos + width - 1]);
        self.pos += width - 1;
        let decoded = std::str::from_utf8(&bytes[..width]).map_err(|_| ScanError::MalformedEncoding)?;
        decoded.chars().next().ok_or(ScanError::MalformedEncoding)
    }

    /// Unconsumed bytes currently buffered.
    fn available(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Ensure at least `n` unconsumed bytes are buffered, or fewer only if
    /// the source ends first.
    fn fill(&mut self, n: usize) -> Result<(), ScanError> {
        while self.available() < n && !self.eof {
            // Drop the consumed prefix before growing the buffer.
            if self.pos > 0 {
                self.buf.drain(..self.pos);
                self.pos = 0;
            }
            let mut chunk = [0u8; READ_CHUNK];
            let read = match self.source.read(&mut chunk) {
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if read == 0 {
                self.eof = true;
            } else {
                self.buf.extend_from_slice(&chunk[..read]);
            }
        }
        Ok(())
    }

    /// Decode the codepoint starting `at` bytes past the read position,
    /// without advancing. Returns the character and its encoded width, or
    /// `None` at end-of-input.
    fn decode_at(&mut self, at: usize) -> Result<Option<(char, usize)>, ScanError> {
        self.fill(at + 1)?;
        if self.available() <= at {
            return Ok(None);
        }
        let lead = self.buf[self.pos + at];
        let width = utf8_width(lead).ok_or(ScanError::MalformedEncoding)?;
        self.fill(at + width)?;
        if self.available() < at + width {
            // The source ended inside a multi-byte sequence.
            return Err(ScanError::MalformedEncoding);
        }
        let bytes = &self.buf[self.pos + at..self.pos + at + width];
        let decoded = std::str::from_utf8(bytes).map_err(|_| ScanError::MalformedEncoding)?;
        match decoded.chars().next() {
            Some(ch) => Ok(Some((ch, width))),
            None => Err(ScanError::MalformedEncoding),
        }
    }
}

/// Number of bytes in the UTF-8 sequence introduced by `lead`, or `None`
/// for a byte that cannot begin a sequence.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}
