//! EMSA-PKCS1-v1_5 encoding (RFC 8017 §9.2) for raw-RSA hardware signing.
//!
//! PIV tokens expose the bare RSA private-key operation, so the host must
//! hand over a fully padded block: `00 01 FF..FF 00 || DigestInfo`.

use crate::domain::constants::{PKCS1_MIN_PADDING, SHA256_DIGEST_INFO_PREFIX};
use crate::infra::error::{SignerError, SignerResult};

use super::{DigestBytes, HashAlgorithm};

/// DER `DigestInfo` for a digest.
#[must_use]
pub fn digest_info(digest: &DigestBytes) -> Vec<u8> {
    let prefix = match digest.algorithm() {
        HashAlgorithm::Sha256 => SHA256_DIGEST_INFO_PREFIX,
    };
    let mut out = Vec::with_capacity(prefix.len() + digest.as_slice().len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(digest.as_slice());
    out
}

/// Encode `digest` into a block of exactly `em_len` bytes (the modulus size).
pub fn encode_pkcs1_v15(digest: &DigestBytes, em_len: usize) -> SignerResult<Vec<u8>> {
    let t = digest_info(digest);
    if em_len < t.len() + PKCS1_MIN_PADDING + 3 {
        return Err(SignerError::SigningFailure(format!(
            "RSA modulus of {em_len} bytes is too short for a {} DigestInfo",
            digest.algorithm().as_str()
        )));
    }

    let mut em = Vec::with_capacity(em_len);
    em.push(0x00);
    em.push(0x01);
    em.resize(em_len - t.len() - 1, 0xff);
    em.push(0x00);
    em.extend_from_slice(&t);
    debug_assert_eq!(em.len(), em_len);
    Ok(em)
}
