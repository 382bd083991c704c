use bytes::{BufMut, BytesMut};

use crate::codec::decode::or_default;
use crate::internal::error::{Error, Result};

/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes an unsigned 64-bit integer using a variable-length scheme (LEB128).
/// Returns the encoded bytes.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(varint_len(value));
    put_varint(value, &mut buf);
    buf.to_vec()
}

/// Appends the LEB128 encoding of `value` to `buf`.
pub fn put_varint(value: u64, buf: &mut BytesMut) {
    let mut value = value;

    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.put_u8(byte);
        if value == 0 {
            break;
        }
    }
}

/// Number of bytes `encode_varint(value)` produces.
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Decodes a LEB128 integer at `pos` and advances past it.
///
/// A buffer that ends mid-value is `OutOfRange`; a value wider than 64 bits is
/// `InvalidEncoding`.
pub fn decode_varint(buf: &[u8], pos: &mut usize) -> Result<u64> {
    let start = *pos;
    let mut value = 0u64;
    let mut shift = 0;
    let mut offset = start;

    loop {
        let byte = match buf.get(offset) {
            Some(byte) => *byte,
            None => return Err(Error::out_of_range(buf, start, offset - start + 1)),
        };
        let low_seven_bits = (byte & 0x7F) as u64;
        if shift == 63 && low_seven_bits > 1 {
            return Err(Error::invalid_encoding(buf, start, "varint value too large"));
        }
        value |= low_seven_bits << shift;
        offset += 1;
        if (byte & 0x80) == 0 {
            *pos = offset;
            return Ok(value);
        }
        shift += 7;
        if shift > 63 {
            return Err(Error::invalid_encoding(buf, start, "varint value too large"));
        }
    }
}

pub fn decode_varint_or(buf: &[u8], pos: &mut usize, default: u64) -> u64 {
    let start = *pos;
    or_default(decode_varint(buf, pos), start, default)
}
