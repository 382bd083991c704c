/// Number of bytes a variable-length read consumes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Count {
    /// Exactly this many bytes.
    Exact(usize),
    /// Every byte from the current position to the end of the buffer.
    ToEnd,
}

impl From<usize> for Count {
    fn from(n: usize) -> Self {
        Count::Exact(n)
    }
}

/// Text encodings understood by the character and string codecs.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextEncoding {
    /// 7-bit ASCII, one byte per character.
    Ascii,
    /// UTF-8, one to four bytes per character.
    Utf8,
    /// UTF-16 code units in little-endian order.
    Utf16Le,
    /// UTF-16 code units in big-endian order.
    Utf16Be,
}

/// Encoding of the length field that precedes a length-prefixed value.
///
/// Fixed-width prefixes are little-endian.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LengthPrefix {
    U8,
    U16,
    U32,
    /// LEB128 variable-length integer.
    Varint,
}

impl LengthPrefix {
    /// Largest length this prefix can carry.
    pub fn max(&self) -> usize {
        match self {
            LengthPrefix::U8 => u8::MAX as usize,
            LengthPrefix::U16 => u16::MAX as usize,
            LengthPrefix::U32 => u32::MAX as usize,
            LengthPrefix::Varint => usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_from_usize() {
        assert_eq!(Count::from(4), Count::Exact(4));
    }

    #[test]
    fn test_length_prefix_max() {
        assert_eq!(LengthPrefix::U8.max(), 255);
        assert_eq!(LengthPrefix::U16.max(), 65535);
        assert_eq!(LengthPrefix::U32.max(), u32::MAX as usize);
        assert_eq!(LengthPrefix::Varint.max(), usize::MAX);
    }
}
