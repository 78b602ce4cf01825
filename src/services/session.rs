//! Device session: one open PIV token plus the certificate of one slot.
//!
//! The handle is acquired in [`DeviceSession::open`] and released when the
//! session is dropped, on success and failure alike. A [`SlotSigner`]
//! borrows the session mutably, so signing cannot outlive the handle.

use crate::adapters::backend::{PivConnector, PivDevice};
use crate::domain::crypto::{DigestBytes, HashAlgorithm, RsaPublicKey};
use crate::domain::types::{PivPin, PivSlot};
use crate::infra::error::{SignerError, SignerResult};

/// An open token and the parsed certificate of `slot`.
pub struct DeviceSession {
    device: Box<dyn PivDevice>,
    slot: PivSlot,
    certificate_der: Vec<u8>,
    public_key: RsaPublicKey,
}

impl DeviceSession {
    /// Open the token and read the certificate occupying `slot`.
    ///
    /// # Errors
    ///
    /// `DeviceNotFound` when no matching token is attached, `SlotReadError`
    /// when the slot holds no readable certificate, `CertificateError` when
    /// the certificate does not carry an RSA key.
    pub fn open(connector: &dyn PivConnector, slot: PivSlot) -> SignerResult<Self> {
        let mut device = connector.open()?;
        log::debug!(
            "Reading certificate from slot {slot} on '{}'",
            device.reader_name()
        );

        let certificate_der = device.certificate_der(slot)?;
        let public_key = RsaPublicKey::from_certificate_der(&certificate_der)?;

        Ok(Self {
            device,
            slot,
            certificate_der,
            public_key,
        })
    }

    #[must_use]
    pub fn reader_name(&self) -> &str {
        self.device.reader_name()
    }

    /// Raw DER bytes of the slot certificate
    #[must_use]
    pub fn certificate_der(&self) -> &[u8] {
        &self.certificate_der
    }

    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Key identifier: hex SHA-256 of the raw certificate.
    #[must_use]
    pub fn key_id(&self) -> String {
        key_id_for_certificate(&self.certificate_der)
    }

    /// Authenticate with `pin` and return the signer for this slot.
    ///
    /// # Errors
    ///
    /// `AuthenticationError` on a wrong or blocked PIN.
    pub fn private_key(&mut self, pin: &PivPin) -> SignerResult<SlotSigner<'_>> {
        self.device.verify_pin(pin)?;
        log::debug!("PIN accepted for slot {}", self.slot);
        Ok(SlotSigner { session: self })
    }
}

/// Hex SHA-256 digest of a DER certificate.
#[must_use]
pub fn key_id_for_certificate(certificate_der: &[u8]) -> String {
    HashAlgorithm::Sha256.digest(certificate_der).to_hex()
}

/// Private-key handle for an authenticated slot.
pub struct SlotSigner<'s> {
    session: &'s mut DeviceSession,
}

impl SlotSigner<'_> {
    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.session.public_key
    }

    /// RSASSA-PKCS1-v1_5 signature over a precomputed digest.
    ///
    /// # Errors
    ///
    /// `SigningFailure` when the token rejects the operation or returns a
    /// signature of the wrong length.
    pub fn sign_digest(&mut self, digest: &DigestBytes) -> SignerResult<Vec<u8>> {
        let modulus_len = self.session.public_key.size_bytes();
        let slot = self.session.slot;
        let signature = self
            .session
            .device
            .sign_digest(slot, digest, modulus_len)?;

        if signature.len() != modulus_len {
            return Err(SignerError::SigningFailure(format!(
                "device returned {} signature bytes, expected {modulus_len}",
                signature.len()
            )));
        }
        Ok(signature)
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        log::debug!("Releasing device session on '{}'", self.device.reader_name());
    }
}
