//! Foundational cryptographic domain types.
//!
//! - SHA-256 digests tagged with their algorithm
//! - RSA public keys parsed from slot certificates
//! - PKCS#1 v1.5 signature block encoding for raw-RSA devices

mod hash;
mod pkcs1;
mod public_key;

pub use hash::{DigestBytes, HashAlgorithm};
pub use pkcs1::{digest_info, encode_pkcs1_v15};
pub use public_key::RsaPublicKey;
