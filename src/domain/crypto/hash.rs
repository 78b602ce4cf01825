//! Hash algorithm and digest types.
//!
//! JWT signing here is RS256 only, so SHA-256 is the single supported digest.

use std::fmt;

use sha2::{Digest, Sha256};

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
}

impl HashAlgorithm {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    #[must_use]
    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Hash `data` with this algorithm.
    #[must_use]
    pub fn digest(&self, data: &[u8]) -> DigestBytes {
        match self {
            HashAlgorithm::Sha256 => DigestBytes {
                algo: *self,
                bytes: Sha256::digest(data).to_vec().into_boxed_slice(),
            },
        }
    }
}

/// Digest produced by [`HashAlgorithm::digest`], tagged with its algorithm.
#[derive(Clone, Eq, PartialEq)]
pub struct DigestBytes {
    algo: HashAlgorithm,
    bytes: Box<[u8]>,
}

impl DigestBytes {
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algo
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for DigestBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigestBytes({}:{})", self.algo.as_str(), self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_properties() {
        assert_eq!(HashAlgorithm::Sha256.as_str(), "sha256");
        assert_eq!(HashAlgorithm::Sha256.digest_size(), 32);
    }

    #[test]
    fn test_sha256_known_vector() {
        let digest = HashAlgorithm::Sha256.digest(b"abc");
        assert_eq!(digest.algorithm(), HashAlgorithm::Sha256);
        assert_eq!(digest.as_slice().len(), HashAlgorithm::Sha256.digest_size());
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
