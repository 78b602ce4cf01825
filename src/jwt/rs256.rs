use std::any::Any;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use super::SigningMethod;
use crate::domain::constants::ALG_RS256;
use crate::domain::crypto::{HashAlgorithm, RsaPublicKey};
use crate::infra::error::{SignerError, SignerResult};

/// Software RSASSA-PKCS1-v1_5 SHA-256.
///
/// Signs with a `jsonwebtoken::EncodingKey`; verifies with either an
/// [`RsaPublicKey`] or a `jsonwebtoken::DecodingKey`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rs256;

impl Rs256 {
    /// Verify against a ready decoding key.
    pub fn verify_with(
        &self,
        signing_input: &str,
        signature: &str,
        key: &DecodingKey,
    ) -> SignerResult<()> {
        let ok = jsonwebtoken::crypto::verify(
            signature,
            signing_input.as_bytes(),
            key,
            Algorithm::RS256,
        )
        .map_err(|e| SignerError::VerificationFailure(e.to_string()))?;

        if ok {
            Ok(())
        } else {
            Err(SignerError::VerificationFailure(
                "crypto/rsa: verification error".to_string(),
            ))
        }
    }
}

impl SigningMethod for Rs256 {
    fn alg(&self) -> &str {
        ALG_RS256
    }

    fn hash(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn sign(&self, signing_input: &str, key: &dyn Any) -> SignerResult<String> {
        let key = key.downcast_ref::<EncodingKey>().ok_or_else(|| {
            SignerError::InvalidKeyType("RS256 signs with a jsonwebtoken::EncodingKey".into())
        })?;
        jsonwebtoken::crypto::sign(signing_input.as_bytes(), key, Algorithm::RS256)
            .map_err(|e| SignerError::SigningFailure(e.to_string()))
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &dyn Any) -> SignerResult<()> {
        if let Some(public_key) = key.downcast_ref::<RsaPublicKey>() {
            return self.verify_with(signing_input, signature, &public_key.decoding_key());
        }
        if let Some(decoding_key) = key.downcast_ref::<DecodingKey>() {
            return self.verify_with(signing_input, signature, decoding_key);
        }
        Err(SignerError::InvalidKeyType(
            "RS256 verifies with an RsaPublicKey or jsonwebtoken::DecodingKey".into(),
        ))
    }
}
