// Encode module: fixed-width fields into owned or growable buffers

pub mod text;

use bitflags::Flags;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use bytes::BytesMut;

use crate::codec::decode::enums::FieldEnum;
use crate::codec::field::Field;

/// Encodes a field in byte order `E`.
pub fn encode_with<E: ByteOrder, T: Field>(value: T) -> Vec<u8> {
    let mut out = vec![0u8; T::WIDTH];
    value.write_to::<E>(&mut out);
    out
}

/// Encodes a field little-endian.
pub fn encode<T: Field>(value: T) -> Vec<u8> {
    encode_with::<LittleEndian, T>(value)
}

/// Encodes a field big-endian.
pub fn encode_be<T: Field>(value: T) -> Vec<u8> {
    encode_with::<BigEndian, T>(value)
}

/// Appends a field in byte order `E` to `buf`.
pub fn put_with<E: ByteOrder, T: Field>(value: T, buf: &mut BytesMut) {
    let start = buf.len();
    buf.resize(start + T::WIDTH, 0);
    value.write_to::<E>(&mut buf[start..]);
}

pub fn put<T: Field>(value: T, buf: &mut BytesMut) {
    put_with::<LittleEndian, T>(value, buf)
}

pub fn put_be<T: Field>(value: T, buf: &mut BytesMut) {
    put_with::<BigEndian, T>(value, buf)
}

/// Encodes an enumeration as its little-endian representation.
pub fn encode_enum<T: FieldEnum>(value: &T) -> Vec<u8> {
    encode(value.to_repr())
}

/// Encodes a flag set as its little-endian bits.
pub fn encode_flags<F>(flags: &F) -> Vec<u8>
where
    F: Flags,
    F::Bits: Field,
{
    encode(flags.bits())
}
