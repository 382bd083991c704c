//! Decoding of fixed-width fields from a byte buffer.
//!
//! Every operation comes in three shapes:
//! - `decode*(buf, &mut pos)` reads at `pos` and advances it by the field width.
//!   On failure the error is returned and `pos` is left untouched.
//! - `decode*_at(buf, pos)` reads at a position passed by value.
//! - `decode*_or(buf, &mut pos, default)` never fails: on `OutOfRange` or
//!   `InvalidEncoding` it returns `default` and leaves `pos` untouched.
//!
//! Unsuffixed names are little-endian, `_be` names are big-endian, and
//! `_with` names take any [`ByteOrder`].

pub mod enums;
pub mod text;
pub mod varlen;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::trace;

use crate::codec::cursor::ensure;
use crate::codec::field::Field;
use crate::internal::error::Result;

/// Reads a field at `pos` in byte order `E` without touching any caller state.
#[inline]
pub fn decode_with_at<E: ByteOrder, T: Field>(buf: &[u8], pos: usize) -> Result<T> {
    ensure(buf, pos, T::WIDTH)?;
    Ok(T::read_from::<E>(&buf[pos..pos + T::WIDTH]))
}

/// Reads a field in byte order `E` and advances `pos` by its width.
#[inline]
pub fn decode_with<E: ByteOrder, T: Field>(buf: &[u8], pos: &mut usize) -> Result<T> {
    let value = decode_with_at::<E, T>(buf, *pos)?;
    *pos += T::WIDTH;
    Ok(value)
}

/// Reads a little-endian field and advances `pos`.
///
/// ```
/// use bytefield::codec::decode::decode;
///
/// let mut pos = 0;
/// let value: i32 = decode(&[0x01, 0x02, 0x03, 0x04], &mut pos).unwrap();
/// assert_eq!(value, 0x04030201);
/// assert_eq!(pos, 4);
/// ```
#[inline]
pub fn decode<T: Field>(buf: &[u8], pos: &mut usize) -> Result<T> {
    decode_with::<LittleEndian, T>(buf, pos)
}

/// Reads a big-endian field and advances `pos`.
#[inline]
pub fn decode_be<T: Field>(buf: &[u8], pos: &mut usize) -> Result<T> {
    decode_with::<BigEndian, T>(buf, pos)
}

#[inline]
pub fn decode_at<T: Field>(buf: &[u8], pos: usize) -> Result<T> {
    decode_with_at::<LittleEndian, T>(buf, pos)
}

#[inline]
pub fn decode_be_at<T: Field>(buf: &[u8], pos: usize) -> Result<T> {
    decode_with_at::<BigEndian, T>(buf, pos)
}

pub fn decode_with_or<E: ByteOrder, T: Field>(buf: &[u8], pos: &mut usize, default: T) -> T {
    let start = *pos;
    or_default(decode_with::<E, T>(buf, pos), start, default)
}

/// Reads a little-endian field, falling back to `default` without moving `pos`.
pub fn decode_or<T: Field>(buf: &[u8], pos: &mut usize, default: T) -> T {
    decode_with_or::<LittleEndian, T>(buf, pos, default)
}

pub fn decode_be_or<T: Field>(buf: &[u8], pos: &mut usize, default: T) -> T {
    decode_with_or::<BigEndian, T>(buf, pos, default)
}

/// Unwraps a fallible decode, substituting `default` on error.
///
/// The fallible decoders only commit their position on success, so nothing
/// needs rolling back here.
pub(crate) fn or_default<T>(result: Result<T>, position: usize, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            trace!(position, kind = ?e.kind(), "decode failed, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode::{encode, encode_be};
    use crate::codec::field::F16;
    use crate::internal::error::{Error, ErrorKind};
    use paste::paste;

    // Round trip through both byte orders, checking the cursor advances by the width
    macro_rules! impl_roundtrip_test {
        ($type:ty, $values:expr) => {
            paste! {
                #[test]
                fn [<test_roundtrip_ $type:lower>]() {
                    let values: Vec<$type> = $values;
                    for value in values {
                        let le = encode(value);
                        let mut pos = 0;
                        let decoded: $type = decode(&le, &mut pos).unwrap();
                        assert_eq!(decoded, value);
                        assert_eq!(pos, <$type as Field>::WIDTH);

                        let be = encode_be(value);
                        let mut pos = 0;
                        let decoded: $type = decode_be(&be, &mut pos).unwrap();
                        assert_eq!(decoded, value);
                        assert_eq!(pos, <$type as Field>::WIDTH);
                    }
                }
            }
        };
    }

    impl_roundtrip_test!(u8, vec![0, 1, 0x7F, u8::MAX]);
    impl_roundtrip_test!(i8, vec![0, 1, -1, i8::MIN, i8::MAX]);
    impl_roundtrip_test!(u16, vec![0, 1, 0x1234, u16::MAX]);
    impl_roundtrip_test!(i16, vec![0, -1, i16::MIN, i16::MAX]);
    impl_roundtrip_test!(u32, vec![0, 1, 0xDEADBEEF, u32::MAX]);
    impl_roundtrip_test!(i32, vec![0, -1, i32::MIN, i32::MAX]);
    impl_roundtrip_test!(u64, vec![0, 1, 0x0123456789ABCDEF, u64::MAX]);
    impl_roundtrip_test!(i64, vec![0, -1, i64::MIN, i64::MAX]);
    impl_roundtrip_test!(u128, vec![0, u128::MAX]);
    impl_roundtrip_test!(i128, vec![0, -1, i128::MIN, i128::MAX]);
    impl_roundtrip_test!(bool, vec![true, false]);
    impl_roundtrip_test!(F16, vec![F16(0), F16::MAX, F16::MIN, F16::INFINITY, F16(0x0001)]);
    impl_roundtrip_test!(
        f32,
        vec![0.0, -0.0, 1.5, f32::MIN, f32::MAX, f32::INFINITY, f32::NEG_INFINITY, f32::MIN_POSITIVE]
    );
    impl_roundtrip_test!(
        f64,
        vec![0.0, -1.25, f64::MIN, f64::MAX, f64::INFINITY, f64::NEG_INFINITY, f64::EPSILON]
    );

    #[test]
    fn test_nan_roundtrip() {
        let mut pos = 0;
        let decoded: f32 = decode(&encode(f32::NAN), &mut pos).unwrap();
        assert!(decoded.is_nan());

        let mut pos = 0;
        let decoded: f64 = decode_be(&encode_be(f64::NAN), &mut pos).unwrap();
        assert!(decoded.is_nan());
    }

    #[test]
    fn test_bounds_exactness() {
        let mut pos = 0;
        let result = decode::<i32>(&[0x01, 0x02, 0x03], &mut pos);
        assert!(matches!(
            result,
            Err(Error::OutOfRange { position: 0, width: 4, available: 3, .. })
        ));
        assert_eq!(pos, 0);

        let mut pos = 0;
        assert_eq!(decode::<i32>(&[0x01, 0x02, 0x03, 0x04], &mut pos).unwrap(), 0x04030201);
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_failed_decode_keeps_position() {
        let buf = [0xAA, 0xBB, 0xCC];
        let mut pos = 2;
        assert_eq!(decode::<u16>(&buf, &mut pos).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(pos, 2);
        assert_eq!(decode::<u8>(&buf, &mut pos).unwrap(), 0xCC);
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_decode_at_leaves_caller_position() {
        let buf = [0x00, 0x01, 0x02];
        let pos = 1;
        assert_eq!(decode_at::<u16>(&buf, pos).unwrap(), 0x0201);
        assert_eq!(decode_be_at::<u16>(&buf, pos).unwrap(), 0x0102);
        assert_eq!(pos, 1);
        assert!(decode_at::<u16>(&buf, 2).is_err());
    }

    #[test]
    fn test_decode_or() {
        let buf = [0x10, 0x20, 0x30];
        let mut pos = 0;
        assert_eq!(decode_or::<u16>(&buf, &mut pos, 0), 0x2010);
        assert_eq!(pos, 2);
        // Only one byte left: default, position unchanged
        assert_eq!(decode_or::<u16>(&buf, &mut pos, 0xBEEF), 0xBEEF);
        assert_eq!(pos, 2);
        assert_eq!(decode_be_or::<u32>(&buf, &mut pos, 7), 7);
        assert_eq!(pos, 2);
        // Position past the end is a failure, not a panic
        let mut pos = 10;
        assert_eq!(decode_or::<u8>(&buf, &mut pos, 1), 1);
        assert_eq!(pos, 10);
    }

    #[test]
    fn test_endianness_conformity() {
        assert_eq!(encode(0x01020304u32), vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(encode_be(0x01020304u32), vec![0x01, 0x02, 0x03, 0x04]);
        assert_eq!(encode_be(1.0f32), vec![0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(encode(1.0f32), vec![0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(encode(-1i16), vec![0xFF, 0xFF]);
        assert_eq!(encode(true), vec![0x01]);
    }
}
