//! Validated enumeration decoding.
//!
//! An enumeration is carried as its underlying integer. Decoding checks that the
//! integer names a declared variant (or, for flag sets, only declared bits), so
//! an out-of-domain value is an `InvalidEncoding` and never a stray bit pattern.

use bitflags::Flags;
use byteorder::LittleEndian;

use crate::codec::decode::{decode_with_at, or_default};
use crate::codec::field::Field;
use crate::internal::error::{Error, Result};

/// A fieldless enumeration with an integer representation.
///
/// Usually implemented through [`field_enum!`](crate::field_enum).
pub trait FieldEnum: Sized {
    type Repr: Field + PartialEq;

    /// Returns the variant for `repr`, or `None` if it is not declared.
    fn from_repr(repr: Self::Repr) -> Option<Self>;

    fn to_repr(&self) -> Self::Repr;
}

/// Declares a fieldless enum and implements [`FieldEnum`] for it.
///
/// ```
/// use bytefield::field_enum;
/// use bytefield::codec::decode::enums::decode_enum;
///
/// field_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Opcode: u8 {
///         Ping = 1,
///         Pong = 2,
///     }
/// }
///
/// let mut pos = 0;
/// assert_eq!(decode_enum::<Opcode>(&[2], &mut pos).unwrap(), Opcode::Pong);
/// assert!(decode_enum::<Opcode>(&[3], &mut pos).is_err());
/// ```
#[macro_export]
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::codec::decode::enums::FieldEnum for $name {
            type Repr = $repr;

            fn from_repr(repr: $repr) -> ::core::option::Option<Self> {
                $(
                    if repr == $value {
                        return ::core::option::Option::Some($name::$variant);
                    }
                )+
                ::core::option::Option::None
            }

            fn to_repr(&self) -> $repr {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }
    };
}

/// Decodes a little-endian enumeration value at `pos` and advances past it.
pub fn decode_enum<T: FieldEnum>(buf: &[u8], pos: &mut usize) -> Result<T> {
    let repr = decode_with_at::<LittleEndian, T::Repr>(buf, *pos)?;
    let value = T::from_repr(repr).ok_or_else(|| {
        Error::invalid_encoding(buf, *pos, format!("undeclared enum value {:?}", repr))
    })?;
    *pos += T::Repr::WIDTH;
    Ok(value)
}

/// Decodes an enumeration value, falling back to `default` on a short buffer or
/// an undeclared value.
pub fn decode_enum_or<T: FieldEnum>(buf: &[u8], pos: &mut usize, default: T) -> T {
    let start = *pos;
    or_default(decode_enum(buf, pos), start, default)
}

/// Decodes a little-endian flag set, rejecting bits no flag declares.
pub fn decode_flags<F>(buf: &[u8], pos: &mut usize) -> Result<F>
where
    F: Flags,
    F::Bits: Field,
{
    let bits = decode_with_at::<LittleEndian, F::Bits>(buf, *pos)?;
    let flags = F::from_bits(bits).ok_or_else(|| {
        Error::invalid_encoding(buf, *pos, format!("undeclared flag bits in {:?}", bits))
    })?;
    *pos += F::Bits::WIDTH;
    Ok(flags)
}

pub fn decode_flags_or<F>(buf: &[u8], pos: &mut usize, default: F) -> F
where
    F: Flags,
    F::Bits: Field,
{
    let start = *pos;
    or_default(decode_flags(buf, pos), start, default)
}
