//! Byte codecs for the string literal encodings.
//!
//! The scanner stores hex and base85 string bodies as raw text and defers
//! byte decoding to its consumer; these are that consumer's codecs.
//! [`decode_ascii85`] doubles as the scanner's well-formedness check for
//! base85 bodies.

use crate::lexer::{DELIMITERS, ScanError};

/// Decode a standard ASCII85 body into bytes.
///
/// Characters `!`..=`u` carry the values 0–84; five of them encode one
/// 32-bit group, big-endian. `z` abbreviates an all-zero group and may not
/// appear inside a group. Whitespace is skipped. A final partial group of
/// `k` characters (2–4) yields `k - 1` bytes.
pub fn decode_ascii85(encoded: &str) -> Result<Vec<u8>, ScanError> {
    let mut decoded = Vec::with_capacity(encoded.len() / 5 * 4 + 4);
    let mut group = [0u8; 5];
    let mut len = 0;

    for ch in encoded.chars() {
        match ch {
            ch if DELIMITERS.contains(&ch) => continue,
            'z' if len == 0 => decoded.extend_from_slice(&[0, 0, 0, 0]),
            'z' => return Err(invalid("'z' inside a group")),
            '!'..='u' => {
                group[len] = ch as u8 - b'!';
                len += 1;
                if len == 5 {
                    decoded.extend_from_slice(&decode_group(&group)?);
                    len = 0;
                }
            }
            _ => return Err(ScanError::InvalidBase85(format!("unexpected character {ch:?}"))),
        }
    }

    // Final partial group: pad with `u` and keep one byte fewer than the
    // character count.
    match len {
        0 => {}
        1 => return Err(invalid("truncated final group")),
        _ => {
            for slot in group.iter_mut().skip(len) {
                *slot = 84;
            }
            let bytes = decode_group(&group)?;
            decoded.extend_from_slice(&bytes[..len - 1]);
        }
    }

    Ok(decoded)
}

/// Encode bytes as standard ASCII85.
///
/// Full 4-byte groups emit five characters; a final partial group of `k`
/// bytes emits `k + 1`. The `z` shorthand is never emitted, so the output
/// round-trips through [`decode_ascii85`] byte-for-byte.
pub fn encode_ascii85(raw: &[u8]) -> String {
    let mut encoded = String::with_capacity(raw.len() / 4 * 5 + 5);

    for chunk in raw.chunks(4) {
        let mut group = [0u8; 4];
        group[..chunk.len()].copy_from_slice(chunk);

        let mut value = u32::from_be_bytes(group);
        let mut chars = ['!'; 5];
        for slot in chars.iter_mut().rev() {
            *slot = char::from((value % 85) as u8 + b'!');
            value /= 85;
        }

        encoded.extend(chars[..chunk.len() + 1].iter());
    }

    encoded
}

/// Decode hex digit pairs into bytes.
///
/// An odd-length input is padded with a trailing `0`, matching the
/// scanner's padding of odd hex string bodies.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, ScanError> {
    let digits = text
        .chars()
        .map(|ch| ch.to_digit(16).ok_or(ScanError::InvalidHexDigit(ch)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut bytes = Vec::with_capacity(digits.len().div_ceil(2));
    for pair in digits.chunks(2) {
        let high = pair[0];
        let low = pair.get(1).copied().unwrap_or(0);
        bytes.push((high * 16 + low) as u8);
    }

    Ok(bytes)
}

/// Decode the five base-85 digits of one group into four bytes.
fn decode_group(group: &[u8; 5]) -> Result<[u8; 4], ScanError> {
    let mut value: u32 = 0;
    for &digit in group {
        value = value
            .checked_mul(85)
            .and_then(|v| v.checked_add(u32::from(digit)))
            .ok_or_else(|| invalid("group value exceeds 32 bits"))?;
    }
    Ok(value.to_be_bytes())
}

fn invalid(reason: &str) -> ScanError {
    ScanError::InvalidBase85(reason.to_string())
}
