//! Bounds-checked binary field codec.
//!
//! Decodes fixed-width scalars, variable-length fields, TLV records and framed
//! messages out of caller-owned byte buffers. Every decode either returns a
//! value and advances the position by exactly the bytes consumed, or fails
//! without moving it.
//!
//! ```
//! use bytefield::{create_tlv, decode, parse_tlv};
//!
//! let record = create_tlv(0x01, b"Hello").unwrap();
//! let mut pos = 0;
//! let parsed = parse_tlv(&record, &mut pos).unwrap();
//! assert_eq!(parsed.value().as_ref(), b"Hello");
//! assert_eq!(pos, 8);
//!
//! let mut pos = 0;
//! let value: u32 = decode(&[1, 2, 3, 4], &mut pos).unwrap();
//! assert_eq!(value, 0x04030201);
//! ```

pub mod codec;
pub mod internal;
pub mod protocol;

pub use codec::cursor::Cursor;
pub use codec::decode::enums::{decode_enum, decode_enum_or, decode_flags, decode_flags_or, FieldEnum};
pub use codec::decode::text::{decode_char, decode_char_or, decode_string, decode_string_or};
pub use codec::decode::varlen::{
    decode_bytes, decode_bytes_or, decode_length, decode_prefixed_bytes, decode_prefixed_bytes_or,
    decode_prefixed_string, decode_prefixed_string_or,
};
pub use codec::decode::{
    decode, decode_at, decode_be, decode_be_at, decode_be_or, decode_or, decode_with, decode_with_at,
    decode_with_or,
};
pub use codec::encode::text::{encode_char, encode_prefixed_bytes, encode_prefixed_string, encode_string};
pub use codec::encode::{encode, encode_be, encode_enum, encode_flags, encode_with};
pub use codec::field::{Field, F16};
pub use codec::types::{Count, LengthPrefix, TextEncoding};
pub use codec::varint::{decode_varint, decode_varint_or, encode_varint};
pub use internal::error::{Error, ErrorKind, Result};
pub use protocol::checksum::{append_checksum, sum_mod_256, validate_checksum, xor};
pub use protocol::digest::{append_digest, validate_digest, Digest};
pub use protocol::frame::{
    add_length_prefixed_frame, add_simple_frame, read_length_prefixed_frame, remove_length_prefixed_frame,
    remove_simple_frame, FrameMarkers,
};
pub use protocol::tlv::{collect_tlv, create_tlv, find_tlv, parse_all_tlv, parse_tlv, ScanState, TlvIter, TlvRecord};

// Downstream `Field` impls name the same `ByteOrder` trait
#[doc(hidden)]
pub use byteorder;
