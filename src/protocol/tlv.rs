//! Type-Length-Value records.
//!
//! Wire layout: Tag (u8), Length (u16, little-endian), Value (Length bytes).

use std::iter::FusedIterator;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::codec::decode::{decode, varlen::decode_bytes};
use crate::codec::types::Count;
use crate::internal::error::{Error, Result};

/// Size of the tag and length fields.
pub const TLV_HEADER_LEN: usize = 3;

/// Largest value a record can carry.
pub const MAX_TLV_VALUE_LEN: usize = u16::MAX as usize;

/// A single TLV record. The length is always the value's length.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TlvRecord {
    tag: u8,
    value: Bytes,
}

impl TlvRecord {
    /// Creates a record, rejecting values longer than `MAX_TLV_VALUE_LEN`.
    pub fn new(tag: u8, value: impl Into<Bytes>) -> Result<Self> {
        let value = value.into();
        if value.len() > MAX_TLV_VALUE_LEN {
            return Err(Error::LengthOverflow {
                length: value.len(),
                max: MAX_TLV_VALUE_LEN,
            });
        }
        Ok(TlvRecord { tag, value })
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn length(&self) -> u16 {
        // Bounded by the constructors
        self.value.len() as u16
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn into_value(self) -> Bytes {
        self.value
    }

    /// Number of bytes `encode` produces.
    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_LEN + self.value.len()
    }

    /// Appends the encoded record to `buf`.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u8(self.tag);
        buf.put_u16_le(self.length());
        buf.put_slice(&self.value);
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.to_vec()
    }
}

/// Encodes a record from a tag and value; the length is computed.
pub fn create_tlv(tag: u8, value: &[u8]) -> Result<Vec<u8>> {
    Ok(TlvRecord::new(tag, Bytes::copy_from_slice(value))?.encode())
}

/// Parses one record at `pos` and advances past it.
///
/// Fails with `OutOfRange` when the header is truncated or when the declared
/// length runs past the end of `buf`; `pos` is unchanged on failure.
pub fn parse_tlv(buf: &[u8], pos: &mut usize) -> Result<TlvRecord> {
    let start = *pos;
    let mut cursor = start;
    let tag: u8 = decode(buf, &mut cursor)?;
    let length: u16 = decode(buf, &mut cursor)?;
    let value = decode_bytes(buf, &mut cursor, Count::Exact(length as usize))?;
    trace!(position = start, tag, length, "parsed tlv record");
    *pos = cursor;
    Ok(TlvRecord {
        tag,
        value: Bytes::copy_from_slice(value),
    })
}

/// Traversal state of a [`TlvIter`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ScanState {
    /// More bytes remain to be parsed.
    Scanning,
    /// The buffer ended exactly on a record boundary.
    Done,
    /// A record was truncated; the error has been yielded.
    Failed,
}

/// Lazy, forward-only iterator over the records of a buffer.
///
/// Yields `Ok` records until the buffer is exhausted. A trailing partial record
/// yields one `Err`, after which the iterator is finished.
#[derive(Debug, Clone)]
pub struct TlvIter<'a> {
    buf: &'a [u8],
    pos: usize,
    state: ScanState,
}

impl<'a> TlvIter<'a> {
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Offset of the next record.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for TlvIter<'_> {
    type Item = Result<TlvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != ScanState::Scanning {
            return None;
        }
        match parse_tlv(self.buf, &mut self.pos) {
            Ok(record) => {
                if self.pos == self.buf.len() {
                    self.state = ScanState::Done;
                }
                Some(Ok(record))
            }
            Err(e) => {
                debug!(position = self.pos, error = %e, "tlv scan failed");
                self.state = ScanState::Failed;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for TlvIter<'_> {}

/// Iterates over every record in `buf` starting at offset 0.
pub fn parse_all_tlv(buf: &[u8]) -> TlvIter<'_> {
    let state = if buf.is_empty() {
        ScanState::Done
    } else {
        ScanState::Scanning
    };
    TlvIter { buf, pos: 0, state }
}

/// Parses every record in `buf`; any trailing partial record fails the call.
pub fn collect_tlv(buf: &[u8]) -> Result<Vec<TlvRecord>> {
    parse_all_tlv(buf).collect()
}

/// Returns the first record carrying `tag`.
///
/// Records after the match are not examined.
pub fn find_tlv(buf: &[u8], tag: u8) -> Result<Option<TlvRecord>> {
    for record in parse_all_tlv(buf) {
        let record = record?;
        if record.tag() == tag {
            return Ok(Some(record));
        }
    }
    Ok(None)
}
