//! `YubiKey` hardware PIV operations adapter.
//!
//! Finds the token through PC/SC reader enumeration and implements the
//! backend traits on top of the `yubikey` crate.

use der::Encode;
use yubikey::piv::{AlgorithmId, SlotId};
use yubikey::YubiKey;

use crate::adapters::backend::{PivConnector, PivDevice};
use crate::domain::constants;
use crate::domain::crypto::{encode_pkcs1_v15, DigestBytes};
use crate::domain::types::{PivPin, PivSlot};
use crate::infra::error::{SignerError, SignerResult};

/// Convert a validated slot to the `yubikey` crate's `SlotId`
#[must_use]
pub fn slot_id(slot: PivSlot) -> SlotId {
    match slot.as_u8() {
        constants::PIV_SLOT_AUTHENTICATION => SlotId::Authentication,
        constants::PIV_SLOT_KEY_MANAGEMENT => SlotId::KeyManagement,
        constants::PIV_SLOT_CARD_AUTHENTICATION => SlotId::CardAuthentication,
        _ => SlotId::Signature,
    }
}

/// Raw-RSA algorithm matching a modulus length in bytes
fn rsa_algorithm(modulus_len: usize) -> SignerResult<AlgorithmId> {
    match modulus_len {
        128 => Ok(AlgorithmId::Rsa1024),
        256 => Ok(AlgorithmId::Rsa2048),
        other => Err(SignerError::SigningFailure(format!(
            "Unsupported RSA key size: {} bits",
            other * 8
        ))),
    }
}

/// Opens the first PC/SC reader whose name contains a filter string.
#[derive(Debug, Clone)]
pub struct PcscConnector {
    reader_filter: String,
}

impl PcscConnector {
    /// Connector matching `filter` case-insensitively against reader names
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            reader_filter: filter.into().to_lowercase(),
        }
    }

    #[must_use]
    pub fn reader_filter(&self) -> &str {
        &self.reader_filter
    }
}

impl Default for PcscConnector {
    fn default() -> Self {
        Self::new(constants::DEFAULT_READER_FILTER)
    }
}

impl PivConnector for PcscConnector {
    fn open(&self) -> SignerResult<Box<dyn PivDevice>> {
        let mut context = yubikey::reader::Context::open().map_err(|e| {
            SignerError::DeviceNotFound(format!("unable to open PC/SC context: {e}"))
        })?;
        let readers = context.iter().map_err(|e| {
            SignerError::DeviceNotFound(format!("unable to enumerate readers: {e}"))
        })?;

        for reader in readers {
            let name = reader.name().to_string();
            if !name.to_lowercase().contains(&self.reader_filter) {
                log::debug!("Skipping reader '{name}'");
                continue;
            }

            let yubikey = reader.open().map_err(|e| {
                SignerError::DeviceNotFound(format!("could not open reader '{name}': {e}"))
            })?;
            log::debug!("Opened YubiKey on reader '{name}'");
            return Ok(Box::new(YubiKeyDevice { yubikey, name }));
        }

        Err(SignerError::DeviceNotFound(format!(
            "no reader name contains '{}'",
            self.reader_filter
        )))
    }
}

/// An open `YubiKey`; the PC/SC card handle is released on drop.
pub struct YubiKeyDevice {
    yubikey: YubiKey,
    name: String,
}

impl PivDevice for YubiKeyDevice {
    fn reader_name(&self) -> &str {
        &self.name
    }

    fn certificate_der(&mut self, slot: PivSlot) -> SignerResult<Vec<u8>> {
        let cert = yubikey::Certificate::read(&mut self.yubikey, slot_id(slot)).map_err(|e| {
            SignerError::SlotReadError(format!("slot {slot}: {e}"))
        })?;
        cert.cert.to_der().map_err(|e| {
            SignerError::SlotReadError(format!("slot {slot}: failed to encode certificate: {e}"))
        })
    }

    fn verify_pin(&mut self, pin: &PivPin) -> SignerResult<()> {
        self.yubikey
            .verify_pin(pin.as_bytes())
            .map_err(|e| match e {
                yubikey::Error::WrongPin { tries } => SignerError::AuthenticationError(format!(
                    "wrong PIN, {tries} attempt(s) remaining"
                )),
                yubikey::Error::PinLocked => {
                    SignerError::AuthenticationError("PIN is blocked".to_string())
                }
                other => SignerError::AuthenticationError(format!("PIN verification failed: {other}")),
            })
    }

    fn sign_digest(
        &mut self,
        slot: PivSlot,
        digest: &DigestBytes,
        modulus_len: usize,
    ) -> SignerResult<Vec<u8>> {
        let algorithm = rsa_algorithm(modulus_len)?;
        let block = encode_pkcs1_v15(digest, modulus_len)?;

        let signature = yubikey::piv::sign_data(&mut self.yubikey, &block, algorithm, slot_id(slot))
            .map_err(|e| SignerError::SigningFailure(format!("error from YubiKey: {e}")))?;
        Ok(signature.to_vec())
    }
}

impl Drop for YubiKeyDevice {
    fn drop(&mut self) {
        log::debug!("Closing YubiKey on reader '{}'", self.name);
    }
}
