//! Public-key export as PEM and JSON Web Key.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::adapters::backend::PivConnector;
use crate::domain::crypto::RsaPublicKey;
use crate::domain::types::PivSlot;
use crate::infra::error::{SignerError, SignerResult};
use crate::services::session::{key_id_for_certificate, DeviceSession};

/// RSA JSON Web Key (RFC 7517 / RFC 7518 §6.3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    pub n: String,
    pub e: String,
}

impl Jwk {
    #[must_use]
    pub fn from_public_key(public_key: &RsaPublicKey, kid: Option<String>) -> Self {
        Self {
            kty: "RSA".to_string(),
            kid,
            n: URL_SAFE_NO_PAD.encode(public_key.modulus()),
            e: URL_SAFE_NO_PAD.encode(public_key.exponent()),
        }
    }

    /// Verifier key built from `n` and `e`.
    pub fn decoding_key(&self) -> SignerResult<jsonwebtoken::DecodingKey> {
        if self.kty != "RSA" {
            return Err(SignerError::InvalidKeyType(format!(
                "JWK key type {} is not RSA",
                self.kty
            )));
        }
        jsonwebtoken::DecodingKey::from_rsa_components(&self.n, &self.e)
            .map_err(|e| SignerError::InvalidKeyType(format!("invalid RSA JWK: {e}")))
    }

    /// Indented JSON
    pub fn to_pretty_json(&self) -> SignerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SignerError::ValidationError(format!("failed to marshal key into JSON: {e}"))
        })
    }
}

/// Exportable forms of a slot's public key.
#[derive(Debug, Clone)]
pub struct PublicKeyExport {
    pub key_id: String,
    pub public_key: RsaPublicKey,
    pub jwk: Jwk,
}

impl PublicKeyExport {
    /// Build from a DER certificate; the key id is its hex SHA-256.
    pub fn from_certificate(certificate_der: &[u8]) -> SignerResult<Self> {
        let public_key = RsaPublicKey::from_certificate_der(certificate_der)?;
        let key_id = key_id_for_certificate(certificate_der);
        let jwk = Jwk::from_public_key(&public_key, Some(key_id.clone()));
        Ok(Self {
            key_id,
            public_key,
            jwk,
        })
    }

    /// Read the certificate in `slot` and build the export. No PIN needed.
    pub fn from_device(connector: &dyn PivConnector, slot: PivSlot) -> SignerResult<Self> {
        let session = DeviceSession::open(connector, slot)?;
        log::info!("Exporting public key of slot {slot} from '{}'", session.reader_name());
        Self::from_certificate(session.certificate_der())
    }

    #[must_use]
    pub fn pem(&self) -> &str {
        self.public_key.to_pem()
    }
}
