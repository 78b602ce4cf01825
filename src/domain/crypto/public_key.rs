//! RSA public key extracted from a slot certificate.

use std::fmt;

use der::asn1::UintRef;
use der::pem::LineEnding;
use der::{Decode, EncodePem, Sequence};
use x509_cert::Certificate;

use crate::domain::constants::RSA_ENCRYPTION_OID;
use crate::infra::error::{SignerError, SignerResult};

/// PKCS#1 `RSAPublicKey` as carried in the SPKI bit string.
#[derive(Sequence)]
struct Pkcs1PublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// RSA public key material: SPKI DER plus the raw big-endian components.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pem: String,
    modulus: Box<[u8]>,
    exponent: Box<[u8]>,
}

impl RsaPublicKey {
    /// Parse the subject public key of a DER certificate.
    ///
    /// Fails with `CertificateError` for malformed certificates and for keys
    /// that are not `rsaEncryption`.
    pub fn from_certificate_der(cert_der: &[u8]) -> SignerResult<Self> {
        let cert = Certificate::from_der(cert_der).map_err(|e| {
            SignerError::CertificateError(format!("Failed to parse certificate: {e}"))
        })?;
        let spki = &cert.tbs_certificate.subject_public_key_info;

        if spki.algorithm.oid.to_string() != RSA_ENCRYPTION_OID {
            return Err(SignerError::CertificateError(format!(
                "Certificate key algorithm {} is not RSA",
                spki.algorithm.oid
            )));
        }

        let key_bits = spki.subject_public_key.as_bytes().ok_or_else(|| {
            SignerError::CertificateError("Public key bit string is not octet aligned".into())
        })?;
        let pkcs1 = Pkcs1PublicKey::from_der(key_bits)?;

        let pem = spki
            .to_pem(LineEnding::LF)
            .map_err(|e| SignerError::CertificateError(format!("PEM encoding failed: {e}")))?;

        Ok(Self {
            pem,
            modulus: pkcs1.modulus.as_bytes().into(),
            exponent: pkcs1.public_exponent.as_bytes().into(),
        })
    }

    /// `-----BEGIN PUBLIC KEY-----` PEM of the SPKI
    #[must_use]
    pub fn to_pem(&self) -> &str {
        &self.pem
    }

    /// Big-endian modulus without leading zero bytes
    #[must_use]
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Big-endian public exponent
    #[must_use]
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// Modulus length in bytes; RSA signatures have exactly this length.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.modulus.len()
    }

    #[must_use]
    pub fn size_bits(&self) -> usize {
        self.modulus.len() * 8
    }

    /// Verifier key for the `jsonwebtoken` primitives
    #[must_use]
    pub fn decoding_key(&self) -> jsonwebtoken::DecodingKey {
        jsonwebtoken::DecodingKey::from_rsa_raw_components(&self.modulus, &self.exponent)
    }
}

impl fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaPublicKey(bits={})", self.size_bits())
    }
}
