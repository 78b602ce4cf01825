//! Compact JWS tokens with pluggable signing methods.
//!
//! Signing methods are looked up by their `alg` name in an explicit
//! [`SigningMethodRegistry`] handed to the [`Parser`]; there is no
//! process-wide registration. Keys are passed as `&dyn Any` so every method
//! decides which key types it accepts.

mod claims;
mod parser;
mod registry;
mod rs256;
mod token;

use std::any::Any;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::domain::crypto::HashAlgorithm;
use crate::infra::error::{SignerError, SignerResult};

pub use claims::{Claims, StandardClaims};
pub use parser::Parser;
pub use registry::SigningMethodRegistry;
pub use rs256::Rs256;
pub use token::{Header, Token};

/// A JWS signing algorithm.
pub trait SigningMethod: Send + Sync {
    /// Algorithm name written to the `alg` header.
    fn alg(&self) -> &str;

    /// Digest applied to the signing input.
    fn hash(&self) -> HashAlgorithm;

    /// Sign `signing_input`, returning the base64url (unpadded) signature.
    ///
    /// # Errors
    ///
    /// `InvalidKeyType` when `key` is not a type this method accepts.
    fn sign(&self, signing_input: &str, key: &dyn Any) -> SignerResult<String>;

    /// Check a base64url `signature` over `signing_input`.
    ///
    /// # Errors
    ///
    /// `VerificationFailure` when the signature does not validate.
    fn verify(&self, signing_input: &str, signature: &str, key: &dyn Any) -> SignerResult<()>;
}

pub(crate) fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub(crate) fn decode_segment(segment: &str, what: &str) -> SignerResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| SignerError::MalformedToken(format!("{what} is not base64url: {e}")))
}

pub(crate) fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
