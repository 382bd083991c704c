//! Fixed-width scalar fields.
//!
//! A [`Field`] knows its encoded width and how to convert between exactly that
//! many bytes and a value, in whichever byte order the caller selects through
//! [`byteorder::ByteOrder`]. Signed integers are two's complement and floats are
//! IEEE-754. Bounds checking is not done here; callers hand in a slice of exactly
//! [`Field::WIDTH`] bytes (see [`crate::codec::decode`]).

use byteorder::ByteOrder;
use std::fmt::Debug;

/// A scalar with a constant encoded width.
pub trait Field: Sized + Copy + Debug {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Converts `bytes` (exactly `WIDTH` long) into a value.
    fn read_from<E: ByteOrder>(bytes: &[u8]) -> Self;

    /// Writes the value into `out` (exactly `WIDTH` long).
    fn write_to<E: ByteOrder>(self, out: &mut [u8]);
}

macro_rules! impl_field {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Field for $type {
            const WIDTH: usize = std::mem::size_of::<$type>();

            #[inline]
            fn read_from<E: ByteOrder>(bytes: &[u8]) -> Self {
                E::$read_method(bytes)
            }

            #[inline]
            fn write_to<E: ByteOrder>(self, out: &mut [u8]) {
                E::$write_method(out, self)
            }
        }
    };
}

impl_field!(u16, read_u16, write_u16);
impl_field!(u32, read_u32, write_u32);
impl_field!(u64, read_u64, write_u64);
impl_field!(u128, read_u128, write_u128);
impl_field!(i16, read_i16, write_i16);
impl_field!(i32, read_i32, write_i32);
impl_field!(i64, read_i64, write_i64);
impl_field!(i128, read_i128, write_i128);
impl_field!(f32, read_f32, write_f32);
impl_field!(f64, read_f64, write_f64);

// Single-byte fields have no byte order.
impl Field for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn read_from<E: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn write_to<E: ByteOrder>(self, out: &mut [u8]) {
        out[0] = self;
    }
}

impl Field for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn read_from<E: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }

    #[inline]
    fn write_to<E: ByteOrder>(self, out: &mut [u8]) {
        out[0] = self as u8;
    }
}

/// Any non-zero byte decodes as `true`; encoding writes `1` or `0`.
impl Field for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn read_from<E: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn write_to<E: ByteOrder>(self, out: &mut [u8]) {
        out[0] = self as u8;
    }
}

/// IEEE-754 binary16 value, carried as its raw bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct F16(pub u16);

impl F16 {
    pub const INFINITY: F16 = F16(0x7C00);
    pub const NEG_INFINITY: F16 = F16(0xFC00);
    pub const MAX: F16 = F16(0x7BFF);
    pub const MIN: F16 = F16(0xFBFF);

    /// Returns the raw bit pattern.
    pub fn to_bits(self) -> u16 {
        self.0
    }

    pub fn from_bits(bits: u16) -> Self {
        F16(bits)
    }

    pub fn is_nan(self) -> bool {
        (self.0 & 0x7C00) == 0x7C00 && (self.0 & 0x03FF) != 0
    }

    /// Widens to `f32`. Exact for every binary16 value.
    pub fn to_f32(self) -> f32 {
        let bits = self.0 as u32;
        let sign = (bits & 0x8000) << 16;
        let exp = (bits >> 10) & 0x1F;
        let man = bits & 0x03FF;

        let out = match exp {
            0 if man == 0 => sign,
            0 => {
                // Subnormal: shift the mantissa up until the implicit bit appears
                let mut e: u32 = 127 - 15 + 1;
                let mut m = man;
                while m & 0x0400 == 0 {
                    m <<= 1;
                    e -= 1;
                }
                sign | (e << 23) | ((m & 0x03FF) << 13)
            }
            0x1F => sign | 0x7F80_0000 | (man << 13),
            _ => sign | ((exp + 127 - 15) << 23) | (man << 13),
        };
        f32::from_bits(out)
    }

    /// Narrows an `f32`, rounding to nearest with ties to even.
    pub fn from_f32(value: f32) -> Self {
        let x = value.to_bits();
        let sign = ((x >> 16) & 0x8000) as u16;
        let exp = ((x >> 23) & 0xFF) as i32;
        let man = x & 0x007F_FFFF;

        if exp == 0xFF {
            // NaN keeps a quiet bit so it never collapses into infinity
            let payload = if man != 0 { 0x0200 | (man >> 13) as u16 } else { 0 };
            return F16(sign | 0x7C00 | payload);
        }

        let e = exp - 127 + 15;
        if e >= 0x1F {
            return F16(sign | 0x7C00);
        }

        if e <= 0 {
            if e < -10 {
                return F16(sign);
            }
            let m = man | 0x0080_0000;
            let shift = (14 - e) as u32;
            let mut half = m >> shift;
            let rem = m & ((1 << shift) - 1);
            let halfway = 1 << (shift - 1);
            if rem > halfway || (rem == halfway && half & 1 == 1) {
                half += 1;
            }
            return F16(sign | half as u16);
        }

        let mut half = ((e as u32) << 10) | (man >> 13);
        let rem = man & 0x1FFF;
        if rem > 0x1000 || (rem == 0x1000 && half & 1 == 1) {
            // A carry out of the mantissa correctly bumps the exponent
            half += 1;
        }
        F16(sign | half as u16)
    }
}

impl From<F16> for f32 {
    fn from(value: F16) -> Self {
        value.to_f32()
    }
}

impl From<f32> for F16 {
    fn from(value: f32) -> Self {
        F16::from_f32(value)
    }
}

impl Field for F16 {
    const WIDTH: usize = 2;

    #[inline]
    fn read_from<E: ByteOrder>(bytes: &[u8]) -> Self {
        F16(E::read_u16(bytes))
    }

    #[inline]
    fn write_to<E: ByteOrder>(self, out: &mut [u8]) {
        E::write_u16(out, self.0)
    }
}
