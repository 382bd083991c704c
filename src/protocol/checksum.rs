//! Single-byte checksum trailers.

use tracing::debug;

/// Sum of all bytes modulo 256.
pub fn sum_mod_256(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Exclusive-or of all bytes.
pub fn xor(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc ^ b)
}

/// Returns `data` followed by `checksum(data)`.
pub fn append_checksum<F>(data: &[u8], checksum: F) -> Vec<u8>
where
    F: Fn(&[u8]) -> u8,
{
    let mut out = Vec::with_capacity(data.len() + 1);
    out.extend_from_slice(data);
    out.push(checksum(data));
    out
}

/// Checks that the last byte of `data` is the checksum of everything before it.
///
/// An empty input has no trailer and is never valid.
pub fn validate_checksum<F>(data: &[u8], checksum: F) -> bool
where
    F: Fn(&[u8]) -> u8,
{
    let Some((&stored, body)) = data.split_last() else {
        return false;
    };
    let computed = checksum(body);
    if computed != stored {
        debug!(stored, computed, len = body.len(), "checksum mismatch");
        return false;
    }
    true
}
