//! Variable-length byte ranges and strings.
//!
//! The length is either supplied by the caller as a [`Count`] or read from a
//! preceding length field described by a [`LengthPrefix`].

use crate::codec::cursor::{ensure, remaining};
use crate::codec::decode::{decode, or_default, text::decode_text};
use crate::codec::types::{Count, LengthPrefix, TextEncoding};
use crate::codec::varint::decode_varint;
use crate::internal::error::{Error, Result};

/// Borrows the bytes selected by `count` at `pos` without advancing anything.
pub(crate) fn decode_bytes_at(buf: &[u8], pos: usize, count: Count) -> Result<&[u8]> {
    let len = match count {
        Count::Exact(n) => n,
        // Still validates the position itself
        Count::ToEnd => remaining(buf, pos),
    };
    ensure(buf, pos, len)?;
    Ok(&buf[pos..pos + len])
}

/// Borrows `count` bytes at `pos` and advances past them.
///
/// `Count::ToEnd` takes everything left, which may be nothing.
pub fn decode_bytes<'a>(buf: &'a [u8], pos: &mut usize, count: Count) -> Result<&'a [u8]> {
    let bytes = decode_bytes_at(buf, *pos, count)?;
    *pos += bytes.len();
    Ok(bytes)
}

pub fn decode_bytes_or<'a>(
    buf: &'a [u8],
    pos: &mut usize,
    count: Count,
    default: &'a [u8],
) -> &'a [u8] {
    let start = *pos;
    or_default(decode_bytes(buf, pos, count), start, default)
}

/// Reads a length field and advances `pos` past it.
pub fn decode_length(buf: &[u8], pos: &mut usize, prefix: LengthPrefix) -> Result<usize> {
    let start = *pos;
    let mut cursor = *pos;
    let len = match prefix {
        LengthPrefix::U8 => decode::<u8>(buf, &mut cursor)? as usize,
        LengthPrefix::U16 => decode::<u16>(buf, &mut cursor)? as usize,
        LengthPrefix::U32 => decode::<u32>(buf, &mut cursor)? as usize,
        LengthPrefix::Varint => {
            let value = decode_varint(buf, &mut cursor)?;
            usize::try_from(value).map_err(|_| {
                Error::invalid_encoding(buf, start, format!("length {} does not fit usize", value))
            })?
        }
    };
    *pos = cursor;
    Ok(len)
}

/// Reads a length field followed by that many bytes.
///
/// Both parts are consumed together or not at all.
pub fn decode_prefixed_bytes<'a>(
    buf: &'a [u8],
    pos: &mut usize,
    prefix: LengthPrefix,
) -> Result<&'a [u8]> {
    let mut cursor = *pos;
    let len = decode_length(buf, &mut cursor, prefix)?;
    let bytes = decode_bytes(buf, &mut cursor, Count::Exact(len))?;
    *pos = cursor;
    Ok(bytes)
}

pub fn decode_prefixed_bytes_or<'a>(
    buf: &'a [u8],
    pos: &mut usize,
    prefix: LengthPrefix,
    default: &'a [u8],
) -> &'a [u8] {
    let start = *pos;
    or_default(decode_prefixed_bytes(buf, pos, prefix), start, default)
}

/// Reads a length field followed by that many bytes of text.
pub fn decode_prefixed_string(
    buf: &[u8],
    pos: &mut usize,
    prefix: LengthPrefix,
    encoding: TextEncoding,
) -> Result<String> {
    let mut cursor = *pos;
    let len = decode_length(buf, &mut cursor, prefix)?;
    let body_start = cursor;
    let bytes = decode_bytes(buf, &mut cursor, Count::Exact(len))?;
    let text = decode_text(buf, body_start, bytes, encoding)?;
    *pos = cursor;
    Ok(text)
}

pub fn decode_prefixed_string_or(
    buf: &[u8],
    pos: &mut usize,
    prefix: LengthPrefix,
    encoding: TextEncoding,
    default: &str,
) -> String {
    let start = *pos;
    or_default(
        decode_prefixed_string(buf, pos, prefix, encoding),
        start,
        default.to_owned(),
    )
}
