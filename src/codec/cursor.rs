//! Read position over a caller-owned buffer.
//!
//! The position itself is a plain `usize`. [`remaining`] and [`ensure`] are the
//! bounds check every decode goes through; advancing is left to the decoder so a
//! failed read never moves the position.
//!
//! [`Cursor`] bundles a buffer with its position for callers that prefer a
//! method-style reader over threading `&mut usize` through free functions.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::codec::decode::{self, enums::FieldEnum, text, varlen};
use crate::codec::field::Field;
use crate::codec::types::{Count, LengthPrefix, TextEncoding};
use crate::codec::varint;
use crate::internal::error::{Error, Result};
use crate::protocol::tlv::{self, TlvRecord};

/// Bytes left in `buf` from `position`. Zero when `position` is past the end.
#[inline]
pub fn remaining(buf: &[u8], position: usize) -> usize {
    buf.len().saturating_sub(position)
}

/// Fails with `OutOfRange` unless `width` bytes are available at `position`.
#[inline]
pub fn ensure(buf: &[u8], position: usize, width: usize) -> Result<()> {
    if position > buf.len() || width > buf.len() - position {
        return Err(Error::out_of_range(buf, position, width));
    }
    Ok(())
}

/// A buffer paired with a read position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Creates a cursor at `position`. Reads fail if it lies past the end.
    pub fn with_position(buf: &'a [u8], position: usize) -> Self {
        Cursor { buf, pos: position }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn remaining(&self) -> usize {
        remaining(self.buf, self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        if self.pos >= self.buf.len() {
            &[]
        } else {
            &self.buf[self.pos..]
        }
    }

    /// Advances by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        ensure(self.buf, self.pos, n)?;
        self.pos += n;
        Ok(())
    }

    /// Reads a little-endian field.
    pub fn read<T: Field>(&mut self) -> Result<T> {
        decode::decode(self.buf, &mut self.pos)
    }

    /// Reads a big-endian field.
    pub fn read_be<T: Field>(&mut self) -> Result<T> {
        decode::decode_be(self.buf, &mut self.pos)
    }

    pub fn read_with<E: ByteOrder, T: Field>(&mut self) -> Result<T> {
        decode::decode_with::<E, T>(self.buf, &mut self.pos)
    }

    /// Reads a little-endian field, or returns `default` without moving.
    pub fn read_or<T: Field>(&mut self, default: T) -> T {
        decode::decode_or(self.buf, &mut self.pos, default)
    }

    pub fn read_be_or<T: Field>(&mut self, default: T) -> T {
        decode::decode_be_or(self.buf, &mut self.pos, default)
    }

    /// Reads a little-endian field without advancing.
    pub fn peek<T: Field>(&self) -> Result<T> {
        decode::decode_with_at::<LittleEndian, T>(self.buf, self.pos)
    }

    pub fn peek_be<T: Field>(&self) -> Result<T> {
        decode::decode_with_at::<BigEndian, T>(self.buf, self.pos)
    }

    pub fn read_bytes(&mut self, count: Count) -> Result<&'a [u8]> {
        varlen::decode_bytes(self.buf, &mut self.pos, count)
    }

    pub fn read_prefixed_bytes(&mut self, prefix: LengthPrefix) -> Result<&'a [u8]> {
        varlen::decode_prefixed_bytes(self.buf, &mut self.pos, prefix)
    }

    pub fn read_char(&mut self, encoding: TextEncoding) -> Result<char> {
        text::decode_char(self.buf, &mut self.pos, encoding)
    }

    pub fn read_string(&mut self, count: Count, encoding: TextEncoding) -> Result<String> {
        text::decode_string(self.buf, &mut self.pos, count, encoding)
    }

    pub fn read_prefixed_string(
        &mut self,
        prefix: LengthPrefix,
        encoding: TextEncoding,
    ) -> Result<String> {
        varlen::decode_prefixed_string(self.buf, &mut self.pos, prefix, encoding)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        varint::decode_varint(self.buf, &mut self.pos)
    }

    pub fn read_enum<T: FieldEnum>(&mut self) -> Result<T> {
        decode::enums::decode_enum(self.buf, &mut self.pos)
    }

    /// Reads one TLV record.
    pub fn read_tlv(&mut self) -> Result<TlvRecord> {
        tlv::parse_tlv(self.buf, &mut self.pos)
    }
}
