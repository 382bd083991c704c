use bytes::{BufMut, BytesMut};

use crate::codec::encode::put;
use crate::codec::types::{LengthPrefix, TextEncoding};
use crate::codec::varint::put_varint;
use crate::internal::error::{Error, Result};

/// Encodes text under `encoding`. ASCII rejects any non-ASCII character.
pub fn encode_string(s: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        TextEncoding::Ascii => {
            if let Some(offset) = s.bytes().position(|b| !b.is_ascii()) {
                return Err(Error::invalid_encoding(
                    s.as_bytes(),
                    offset,
                    "text is not ASCII",
                ));
            }
            Ok(s.as_bytes().to_vec())
        }
        TextEncoding::Utf8 => Ok(s.as_bytes().to_vec()),
        TextEncoding::Utf16Le => Ok(s.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        TextEncoding::Utf16Be => Ok(s.encode_utf16().flat_map(u16::to_be_bytes).collect()),
    }
}

/// Encodes a single character under `encoding`.
pub fn encode_char(c: char, encoding: TextEncoding) -> Result<Vec<u8>> {
    let mut utf8 = [0u8; 4];
    encode_string(c.encode_utf8(&mut utf8), encoding)
}

/// Appends a length field to `buf`.
pub fn put_length(len: usize, prefix: LengthPrefix, buf: &mut BytesMut) -> Result<()> {
    if len > prefix.max() {
        return Err(Error::LengthOverflow {
            length: len,
            max: prefix.max(),
        });
    }
    match prefix {
        LengthPrefix::U8 => put(len as u8, buf),
        LengthPrefix::U16 => put(len as u16, buf),
        LengthPrefix::U32 => put(len as u32, buf),
        LengthPrefix::Varint => put_varint(len as u64, buf),
    }
    Ok(())
}

/// Encodes `data` preceded by its length.
pub fn encode_prefixed_bytes(data: &[u8], prefix: LengthPrefix) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(data.len() + 4);
    put_length(data.len(), prefix, &mut buf)?;
    buf.put_slice(data);
    Ok(buf.to_vec())
}

/// Encodes text preceded by its encoded byte length.
pub fn encode_prefixed_string(
    s: &str,
    prefix: LengthPrefix,
    encoding: TextEncoding,
) -> Result<Vec<u8>> {
    let body = encode_string(s, encoding)?;
    encode_prefixed_bytes(&body, prefix)
}
