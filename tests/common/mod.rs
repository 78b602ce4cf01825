//! In-memory PIV token for integration tests.
//!
//! The mock holds a real RSA key from `tests/fixtures` and, like a PIV token,
//! applies the bare RSA private-key operation to the block the library
//! encodes. Signatures therefore verify only if that encoding is correct.
//! Every open and release is counted so tests can check that no handle leaks.

#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};
use yubikey_jwt::domain::crypto::encode_pkcs1_v15;
use yubikey_jwt::{
    DigestBytes, PivConnector, PivDevice, PivPin, PivSlot, SignerError, SignerResult,
};

pub const SIGNING_KEY_ID: &str =
    "d7c18565f7d3e77a54dd4f47d9dc6420e1ea4817c85a3874decf99bc5e8db0b3";
pub const TEST_PIN: &str = "123456";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> Vec<u8> {
    fs::read(fixture_path(name)).expect("fixture should exist")
}

pub fn fixture_string(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

/// How the mock token misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    Normal,
    /// No token attached.
    Absent,
    /// The slot holds no certificate.
    EmptySlot,
    /// PIN accepted but the signing operation fails.
    SignFails,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
    pub pin_checks: AtomicUsize,
    pub signatures: AtomicUsize,
}

impl Counters {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn pin_checks(&self) -> usize {
        self.pin_checks.load(Ordering::SeqCst)
    }

    pub fn signatures(&self) -> usize {
        self.signatures.load(Ordering::SeqCst)
    }
}

pub struct MockConnector {
    mode: MockMode,
    pin: String,
    slot: PivSlot,
    certificate_der: Vec<u8>,
    key: Arc<RsaPrivateKey>,
    pub counters: Arc<Counters>,
}

impl MockConnector {
    /// Token with the fixture signing key in slot 9c and PIN 123456.
    pub fn new() -> Self {
        let key = RsaPrivateKey::from_pkcs8_pem(&fixture_string("signing_key.pem"))
            .expect("fixture key should parse");
        Self {
            mode: MockMode::Normal,
            pin: TEST_PIN.to_string(),
            slot: PivSlot::SIGNATURE,
            certificate_der: fixture("signing_cert.der"),
            key: Arc::new(key),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn with_mode(mut self, mode: MockMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_certificate(mut self, certificate_der: Vec<u8>) -> Self {
        self.certificate_der = certificate_der;
        self
    }

    pub fn with_slot(mut self, slot: PivSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl PivConnector for MockConnector {
    fn open(&self) -> SignerResult<Box<dyn PivDevice>> {
        if self.mode == MockMode::Absent {
            return Err(SignerError::DeviceNotFound(
                "no reader matching 'yubikey'".into(),
            ));
        }
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockDevice {
            mode: self.mode,
            pin: self.pin.clone(),
            slot: self.slot,
            certificate_der: self.certificate_der.clone(),
            key: Arc::clone(&self.key),
            counters: Arc::clone(&self.counters),
            authenticated: false,
        }))
    }
}

pub struct MockDevice {
    mode: MockMode,
    pin: String,
    slot: PivSlot,
    certificate_der: Vec<u8>,
    key: Arc<RsaPrivateKey>,
    counters: Arc<Counters>,
    authenticated: bool,
}

impl PivDevice for MockDevice {
    fn reader_name(&self) -> &str {
        "Mock Yubico YubiKey OTP+FIDO+CCID"
    }

    fn certificate_der(&mut self, slot: PivSlot) -> SignerResult<Vec<u8>> {
        if self.mode == MockMode::EmptySlot || slot != self.slot {
            return Err(SignerError::SlotReadError(format!(
                "no certificate in slot {slot}"
            )));
        }
        Ok(self.certificate_der.clone())
    }

    fn verify_pin(&mut self, pin: &PivPin) -> SignerResult<()> {
        self.counters.pin_checks.fetch_add(1, Ordering::SeqCst);
        if pin.as_str() != self.pin {
            return Err(SignerError::AuthenticationError(
                "wrong PIN (2 tries remaining)".into(),
            ));
        }
        self.authenticated = true;
        Ok(())
    }

    fn sign_digest(
        &mut self,
        slot: PivSlot,
        digest: &DigestBytes,
        modulus_len: usize,
    ) -> SignerResult<Vec<u8>> {
        if !self.authenticated {
            return Err(SignerError::SigningFailure("security status not satisfied".into()));
        }
        if self.mode == MockMode::SignFails || slot != self.slot {
            return Err(SignerError::SigningFailure(format!("sign failed in slot {slot}")));
        }
        if modulus_len != self.key.size() {
            return Err(SignerError::SigningFailure(format!(
                "wrong length for {}-bit key: {modulus_len}",
                self.key.size() * 8
            )));
        }
        let signature = raw_rsa_sign(&self.key, &encode_pkcs1_v15(digest, modulus_len)?);
        self.counters.signatures.fetch_add(1, Ordering::SeqCst);
        Ok(signature)
    }
}

/// `block^d mod n`, left-padded to the modulus length.
pub fn raw_rsa_sign(key: &RsaPrivateKey, block: &[u8]) -> Vec<u8> {
    let m = BigUint::from_bytes_be(block);
    let s = m.modpow(key.d(), key.n()).to_bytes_be();
    let mut signature = vec![0u8; key.size() - s.len()];
    signature.extend_from_slice(&s);
    signature
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// PIN for hardware tests, from the environment or the factory default.
pub fn hardware_pin() -> String {
    env::var("YUBICO_PIN").unwrap_or_else(|_| TEST_PIN.to_string())
}
