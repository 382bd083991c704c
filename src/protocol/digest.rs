//! Fixed-width digest trailers.
//!
//! Generalizes the single-byte checksums to any digest with a fixed output
//! width, so a frame can carry a BLAKE3 or SHA-256 trailer instead.

use sha2::Digest as _;
use tracing::debug;

use crate::protocol::checksum::{sum_mod_256, xor};

/// A digest with a fixed output width.
pub trait Digest {
    /// Output width in bytes.
    const LEN: usize;

    fn digest(data: &[u8]) -> Vec<u8>;
}

/// [`sum_mod_256`] as a one-byte digest.
#[derive(Debug, Clone, Copy)]
pub struct Sum8;

impl Digest for Sum8 {
    const LEN: usize = 1;

    fn digest(data: &[u8]) -> Vec<u8> {
        vec![sum_mod_256(data)]
    }
}

/// [`xor`] as a one-byte digest.
#[derive(Debug, Clone, Copy)]
pub struct Xor8;

impl Digest for Xor8 {
    const LEN: usize = 1;

    fn digest(data: &[u8]) -> Vec<u8> {
        vec![xor(data)]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Blake3Digest;

impl Digest for Blake3Digest {
    const LEN: usize = blake3::OUT_LEN;

    fn digest(data: &[u8]) -> Vec<u8> {
        blake3::hash(data).as_bytes().to_vec()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sha256Digest;

impl Digest for Sha256Digest {
    const LEN: usize = 32;

    fn digest(data: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(data).to_vec()
    }
}

/// Returns `data` followed by its digest.
pub fn append_digest<D: Digest>(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + D::LEN);
    out.extend_from_slice(data);
    out.extend_from_slice(&D::digest(data));
    out
}

/// Splits off and verifies the trailing digest, returning the body.
///
/// Returns `None` if `data` is too short to carry a digest or the digest
/// does not match.
pub fn split_digest<D: Digest>(data: &[u8]) -> Option<&[u8]> {
    if data.len() < D::LEN {
        return None;
    }
    let (body, stored) = data.split_at(data.len() - D::LEN);
    if D::digest(body) != stored {
        debug!(len = body.len(), width = D::LEN, "digest mismatch");
        return None;
    }
    Some(body)
}

/// Checks the trailing digest of `data`. Inputs shorter than the digest are
/// never valid.
pub fn validate_digest<D: Digest>(data: &[u8]) -> bool {
    split_digest::<D>(data).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::checksum::{append_checksum, validate_checksum};

    #[test]
    fn test_one_byte_digests_match_checksums() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(append_digest::<Sum8>(&data), append_checksum(&data, sum_mod_256));
        assert_eq!(append_digest::<Xor8>(&data), append_checksum(&data, xor));
        assert_eq!(
            validate_digest::<Sum8>(&[1, 2, 3, 4, 10]),
            validate_checksum(&[1, 2, 3, 4, 10], sum_mod_256)
        );
    }

    #[test]
    fn test_digest_widths() {
        assert_eq!(Blake3Digest::digest(b"abc").len(), Blake3Digest::LEN);
        assert_eq!(Sha256Digest::digest(b"abc").len(), Sha256Digest::LEN);
    }

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            hex::encode(Sha256Digest::digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_blake3_roundtrip() {
        let framed = append_digest::<Blake3Digest>(b"payload");
        assert_eq!(framed.len(), 7 + 32);
        assert_eq!(split_digest::<Blake3Digest>(&framed), Some(&b"payload"[..]));
        assert!(validate_digest::<Blake3Digest>(&framed));

        let mut corrupted = framed.clone();
        corrupted[0] ^= 0x01;
        assert!(!validate_digest::<Blake3Digest>(&corrupted));
        assert!(split_digest::<Blake3Digest>(&corrupted).is_none());
    }

    #[test]
    fn test_short_input() {
        assert!(split_digest::<Sha256Digest>(&[0u8; 31]).is_none());
        assert!(!validate_digest::<Sum8>(&[]));
        // Trailer only, no body
        let trailer = Sha256Digest::digest(&[]);
        assert_eq!(split_digest::<Sha256Digest>(&trailer), Some(&[][..]));
        assert_eq!(validate_digest::<Sum8>(&[0]), validate_checksum(&[0], sum_mod_256));
    }
}
