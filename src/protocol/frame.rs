//! Message framing.
//!
//! Two shapes are supported:
//! - simple: `[start] ++ payload ++ [end]`
//! - length-prefixed: `u16_le(payload.len()) ++ payload`
//!
//! Simple framing does not escape markers inside the payload; it only round
//! trips payloads that do not rely on the markers for boundaries.

use bytes::{BufMut, BytesMut};
use tracing::debug;

use crate::codec::decode::{decode, decode_at, varlen::decode_bytes};
use crate::codec::types::Count;
use crate::internal::error::{Error, Result};

/// HDLC-style flag byte used as the default marker.
pub const DEFAULT_MARKER: u8 = 0x7E;

/// Size of the length prefix.
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Largest payload a length-prefixed frame can carry.
pub const MAX_FRAME_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Start and end markers for simple framing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FrameMarkers {
    pub start: u8,
    pub end: u8,
}

impl Default for FrameMarkers {
    fn default() -> Self {
        FrameMarkers {
            start: DEFAULT_MARKER,
            end: DEFAULT_MARKER,
        }
    }
}

impl FrameMarkers {
    pub fn new(start: u8, end: u8) -> Self {
        FrameMarkers { start, end }
    }

    pub fn add(&self, data: &[u8]) -> Vec<u8> {
        add_simple_frame(data, self.start, self.end)
    }

    pub fn remove<'a>(&self, framed: &'a [u8]) -> Result<&'a [u8]> {
        remove_simple_frame(framed, self.start, self.end)
    }
}

/// Wraps `data` between `start_marker` and `end_marker`.
pub fn add_simple_frame(data: &[u8], start_marker: u8, end_marker: u8) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(data.len() + 2);
    buf.put_u8(start_marker);
    buf.put_slice(data);
    buf.put_u8(end_marker);
    buf.to_vec()
}

/// Returns the payload between the markers.
///
/// Fails with `OutOfRange` if `framed` is shorter than two bytes and with
/// `InvalidEncoding` if either marker does not match.
pub fn remove_simple_frame(framed: &[u8], start_marker: u8, end_marker: u8) -> Result<&[u8]> {
    if framed.len() < 2 {
        debug!(len = framed.len(), "frame too short for markers");
        return Err(Error::out_of_range(framed, 0, 2));
    }
    let last = framed.len() - 1;
    if framed[0] != start_marker {
        debug!(found = framed[0], expected = start_marker, "start marker mismatch");
        return Err(Error::invalid_encoding(
            framed,
            0,
            format!("expected start marker 0x{:02x}, found 0x{:02x}", start_marker, framed[0]),
        ));
    }
    if framed[last] != end_marker {
        debug!(found = framed[last], expected = end_marker, "end marker mismatch");
        return Err(Error::invalid_encoding(
            framed,
            last,
            format!("expected end marker 0x{:02x}, found 0x{:02x}", end_marker, framed[last]),
        ));
    }
    Ok(&framed[1..last])
}

/// Prefixes `data` with its length as a little-endian `u16`.
pub fn add_length_prefixed_frame(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_FRAME_PAYLOAD_LEN {
        return Err(Error::LengthOverflow {
            length: data.len(),
            max: MAX_FRAME_PAYLOAD_LEN,
        });
    }
    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_LEN + data.len());
    buf.put_u16_le(data.len() as u16);
    buf.put_slice(data);
    Ok(buf.to_vec())
}

/// Returns the payload of a single length-prefixed frame.
///
/// The declared length must equal the number of bytes after the prefix exactly;
/// both truncated and over-long frames fail with `InvalidEncoding`.
pub fn remove_length_prefixed_frame(framed: &[u8]) -> Result<&[u8]> {
    let declared = decode_at::<u16>(framed, 0)? as usize;
    let actual = framed.len() - LENGTH_PREFIX_LEN;
    if declared != actual {
        debug!(declared, actual, "length prefix mismatch");
        return Err(Error::invalid_encoding(
            framed,
            0,
            format!("declared length {} but frame carries {} bytes", declared, actual),
        ));
    }
    Ok(&framed[LENGTH_PREFIX_LEN..])
}

/// Reads one length-prefixed frame from a stream of concatenated frames and
/// advances `pos` past it.
///
/// Unlike [`remove_length_prefixed_frame`], bytes may follow the frame.
pub fn read_length_prefixed_frame<'a>(buf: &'a [u8], pos: &mut usize) -> Result<&'a [u8]> {
    let mut cursor = *pos;
    let declared: u16 = decode(buf, &mut cursor)?;
    let payload = decode_bytes(buf, &mut cursor, Count::Exact(declared as usize))?;
    *pos = cursor;
    Ok(payload)
}
