use thiserror::Error;

/// Maximum number of buffer bytes rendered into an error message.
pub const MAX_DUMP_BYTES: usize = 32;

/// Unified error type for the bytefield library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not enough bytes remain for the requested width.
    #[error("Out of range: need {width} bytes at position {position}, {available} available [{dump}]")]
    OutOfRange {
        position: usize,
        width: usize,
        available: usize,
        dump: String,
    },

    /// A length does not fit the field that has to carry it.
    #[error("Out of range: length {length} exceeds maximum {max}")]
    LengthOverflow { length: usize, max: usize },

    /// The bytes do not form a valid value of the target type.
    #[error("Invalid encoding at position {position}: {reason} [{dump}]")]
    InvalidEncoding {
        position: usize,
        reason: String,
        dump: String,
    },
}

/// The two failure kinds every decode operation can report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    OutOfRange,
    InvalidEncoding,
}

/// A specialized `Result` type for bytefield operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds an `OutOfRange` error for a read of `width` bytes at `position`.
    pub fn out_of_range(buf: &[u8], position: usize, width: usize) -> Self {
        Error::OutOfRange {
            position,
            width,
            available: buf.len().saturating_sub(position),
            dump: dump(buf),
        }
    }

    /// Builds an `InvalidEncoding` error for the value starting at `position`.
    pub fn invalid_encoding(buf: &[u8], position: usize, reason: impl Into<String>) -> Self {
        Error::InvalidEncoding {
            position,
            reason: reason.into(),
            dump: dump(buf),
        }
    }

    /// Returns the failure kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRange { .. } | Error::LengthOverflow { .. } => ErrorKind::OutOfRange,
            Error::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
        }
    }
}

/// Renders at most `MAX_DUMP_BYTES` of `buf` as hex, followed by the total length.
pub fn dump(buf: &[u8]) -> String {
    if buf.len() > MAX_DUMP_BYTES {
        format!("{}.. ({} bytes)", hex::encode(&buf[..MAX_DUMP_BYTES]), buf.len())
    } else {
        format!("{} ({} bytes)", hex::encode(buf), buf.len())
    }
}
