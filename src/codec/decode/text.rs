//! Character and string decoding.
//!
//! Invalid byte sequences are always reported as `InvalidEncoding`; nothing is
//! replaced with U+FFFD.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::codec::cursor::ensure;
use crate::codec::decode::{or_default, varlen::decode_bytes_at};
use crate::codec::types::{Count, TextEncoding};
use crate::internal::error::{Error, Result};

/// Width of the UTF-8 sequence introduced by `lead`, or `None` for bytes that
/// cannot start a sequence.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Reads one character at `pos`, returning it with its encoded width.
fn decode_char_at(buf: &[u8], pos: usize, encoding: TextEncoding) -> Result<(char, usize)> {
    match encoding {
        TextEncoding::Ascii => {
            ensure(buf, pos, 1)?;
            let byte = buf[pos];
            if !byte.is_ascii() {
                return Err(Error::invalid_encoding(
                    buf,
                    pos,
                    format!("byte 0x{:02x} is not ASCII", byte),
                ));
            }
            Ok((byte as char, 1))
        }
        TextEncoding::Utf8 => {
            ensure(buf, pos, 1)?;
            let width = utf8_width(buf[pos]).ok_or_else(|| {
                Error::invalid_encoding(buf, pos, format!("invalid UTF-8 lead byte 0x{:02x}", buf[pos]))
            })?;
            ensure(buf, pos, width)?;
            let s = std::str::from_utf8(&buf[pos..pos + width])
                .map_err(|e| Error::invalid_encoding(buf, pos, format!("invalid UTF-8: {}", e)))?;
            // from_utf8 succeeded on a single sequence, so exactly one char is present
            match s.chars().next() {
                Some(c) => Ok((c, width)),
                None => Err(Error::invalid_encoding(buf, pos, "empty UTF-8 sequence")),
            }
        }
        TextEncoding::Utf16Le => decode_utf16_char::<LittleEndian>(buf, pos),
        TextEncoding::Utf16Be => decode_utf16_char::<BigEndian>(buf, pos),
    }
}

fn decode_utf16_char<E: ByteOrder>(buf: &[u8], pos: usize) -> Result<(char, usize)> {
    ensure(buf, pos, 2)?;
    let first = E::read_u16(&buf[pos..pos + 2]);
    let mut units = vec![first];
    if (0xD800..=0xDBFF).contains(&first) {
        // High surrogate: the low half must follow
        ensure(buf, pos, 4)?;
        units.push(E::read_u16(&buf[pos + 2..pos + 4]));
    }
    let width = units.len() * 2;
    match char::decode_utf16(units.iter().copied()).next() {
        Some(Ok(c)) => Ok((c, width)),
        _ => Err(Error::invalid_encoding(
            buf,
            pos,
            format!("unpaired UTF-16 surrogate 0x{:04x}", first),
        )),
    }
}

/// Decodes one character and advances `pos` by its encoded width.
///
/// ASCII is one byte, UTF-16 is one code unit or a surrogate pair, UTF-8 is the
/// width announced by the lead byte.
pub fn decode_char(buf: &[u8], pos: &mut usize, encoding: TextEncoding) -> Result<char> {
    let (c, width) = decode_char_at(buf, *pos, encoding)?;
    *pos += width;
    Ok(c)
}

pub fn decode_char_or(buf: &[u8], pos: &mut usize, encoding: TextEncoding, default: char) -> char {
    let start = *pos;
    or_default(decode_char(buf, pos, encoding), start, default)
}

/// Decodes an entire byte slice as text. `base` is the slice's offset in `buf`,
/// used for error positions.
pub(crate) fn decode_text(
    buf: &[u8],
    base: usize,
    bytes: &[u8],
    encoding: TextEncoding,
) -> Result<String> {
    match encoding {
        TextEncoding::Ascii => {
            if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
                return Err(Error::invalid_encoding(
                    buf,
                    base + offset,
                    format!("byte 0x{:02x} is not ASCII", bytes[offset]),
                ));
            }
            // ASCII is a subset of UTF-8
            Ok(bytes.iter().map(|&b| b as char).collect())
        }
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| {
                Error::invalid_encoding(buf, base + e.valid_up_to(), format!("invalid UTF-8: {}", e))
            }),
        TextEncoding::Utf16Le => decode_utf16_text::<LittleEndian>(buf, base, bytes),
        TextEncoding::Utf16Be => decode_utf16_text::<BigEndian>(buf, base, bytes),
    }
}

fn decode_utf16_text<E: ByteOrder>(buf: &[u8], base: usize, bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::invalid_encoding(
            buf,
            base,
            format!("UTF-16 text has odd length {}", bytes.len()),
        ));
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(E::read_u16).collect();
    String::from_utf16(&units)
        .map_err(|e| Error::invalid_encoding(buf, base, format!("invalid UTF-16: {}", e)))
}

/// Decodes `count` bytes as text and advances `pos` past them.
pub fn decode_string(
    buf: &[u8],
    pos: &mut usize,
    count: Count,
    encoding: TextEncoding,
) -> Result<String> {
    let bytes = decode_bytes_at(buf, *pos, count)?;
    let text = decode_text(buf, *pos, bytes, encoding)?;
    *pos += bytes.len();
    Ok(text)
}

pub fn decode_string_or(
    buf: &[u8],
    pos: &mut usize,
    count: Count,
    encoding: TextEncoding,
    default: &str,
) -> String {
    let start = *pos;
    or_default(decode_string(buf, pos, count, encoding), start, default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::error::ErrorKind;

    #[test]
    fn test_decode_char_ascii() {
        let mut pos = 0;
        assert_eq!(decode_char(b"Az", &mut pos, TextEncoding::Ascii).unwrap(), 'A');
        assert_eq!(pos, 1);

        let mut pos = 0;
        let err = decode_char(&[0xC3], &mut pos, TextEncoding::Ascii).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_decode_char_utf8_widths() {
        let data = "aé€😀".as_bytes();
        let mut pos = 0;
        assert_eq!(decode_char(data, &mut pos, TextEncoding::Utf8).unwrap(), 'a');
        assert_eq!(pos, 1);
        assert_eq!(decode_char(data, &mut pos, TextEncoding::Utf8).unwrap(), 'é');
        assert_eq!(pos, 3);
        assert_eq!(decode_char(data, &mut pos, TextEncoding::Utf8).unwrap(), '€');
        assert_eq!(pos, 6);
        assert_eq!(decode_char(data, &mut pos, TextEncoding::Utf8).unwrap(), '😀');
        assert_eq!(pos, 10);
    }

    #[test]
    fn test_decode_char_utf8_errors() {
        // Continuation byte cannot lead
        let mut pos = 0;
        let err = decode_char(&[0x80], &mut pos, TextEncoding::Utf8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);

        // Truncated three-byte sequence
        let err = decode_char(&[0xE2, 0x82], &mut pos, TextEncoding::Utf8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        // Lead byte fine, continuation byte bad
        let err = decode_char(&[0xC3, 0x41], &mut pos, TextEncoding::Utf8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_decode_char_utf16() {
        let mut pos = 0;
        assert_eq!(decode_char(&[0x41, 0x00], &mut pos, TextEncoding::Utf16Le).unwrap(), 'A');
        assert_eq!(pos, 2);

        let mut pos = 0;
        assert_eq!(decode_char(&[0x00, 0x41], &mut pos, TextEncoding::Utf16Be).unwrap(), 'A');

        // U+1F600 as a surrogate pair
        let mut pos = 0;
        let pair = [0x3D, 0xD8, 0x00, 0xDE];
        assert_eq!(decode_char(&pair, &mut pos, TextEncoding::Utf16Le).unwrap(), '😀');
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_decode_char_utf16_unpaired_surrogate() {
        let mut pos = 0;
        let err = decode_char(&[0x00, 0xDC], &mut pos, TextEncoding::Utf16Le).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);

        let err = decode_char(&[0x3D, 0xD8, 0x41, 0x00], &mut pos, TextEncoding::Utf16Le).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);

        let err = decode_char(&[0x3D, 0xD8], &mut pos, TextEncoding::Utf16Le).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_decode_char_or() {
        let mut pos = 0;
        assert_eq!(decode_char_or(&[0xFF], &mut pos, TextEncoding::Utf8, '?'), '?');
        assert_eq!(pos, 0);
        assert_eq!(decode_char_or(b"x", &mut pos, TextEncoding::Utf8, '?'), 'x');
        assert_eq!(pos, 1);
    }

    #[test]
    fn test_decode_string() {
        let data = b"Hello, world";
        let mut pos = 0;
        let s = decode_string(data, &mut pos, Count::Exact(5), TextEncoding::Ascii).unwrap();
        assert_eq!(s, "Hello");
        assert_eq!(pos, 5);

        let rest = decode_string(data, &mut pos, Count::ToEnd, TextEncoding::Utf8).unwrap();
        assert_eq!(rest, ", world");
        assert_eq!(pos, data.len());
    }

    #[test]
    fn test_decode_string_utf16() {
        let data = [0x48, 0x00, 0x69, 0x00];
        let mut pos = 0;
        assert_eq!(
            decode_string(&data, &mut pos, Count::ToEnd, TextEncoding::Utf16Le).unwrap(),
            "Hi"
        );

        let mut pos = 0;
        let err = decode_string(&data[..3], &mut pos, Count::ToEnd, TextEncoding::Utf16Le).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_decode_string_invalid_utf8_position() {
        let data = [b'o', b'k', 0xFF, b'!'];
        let mut pos = 0;
        let err = decode_string(&data, &mut pos, Count::ToEnd, TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding { position: 2, .. }));
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_decode_string_or() {
        let data = [0xFF, 0xFE];
        let mut pos = 0;
        let s = decode_string_or(&data, &mut pos, Count::Exact(2), TextEncoding::Utf8, "fallback");
        assert_eq!(s, "fallback");
        assert_eq!(pos, 0);

        let s = decode_string_or(&data, &mut pos, Count::Exact(3), TextEncoding::Utf8, "short");
        assert_eq!(s, "short");
        assert_eq!(pos, 0);
    }
}
