//! Hardware-backed RS256 signing method.
//!
//! Signing reopens the token on every call: open, read certificate, verify
//! PIN, sign, release. Verification never touches hardware; it is the
//! standard RS256 check against whatever public key the caller supplies.

use std::any::Any;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::adapters::backend::PivConnector;
use crate::domain::constants::ALG_YKRS256;
use crate::domain::crypto::HashAlgorithm;
use crate::infra::error::{SignerError, SignerResult};
use crate::jwt::{Rs256, SigningMethod, SigningMethodRegistry};
use crate::services::context::SigningContext;
use crate::services::session::DeviceSession;

/// RS256 with the private key held in a PIV slot.
///
/// Signs with a [`SigningContext`] as the key and registers as `YKRS256`
/// until [`override_standard`](Self::override_standard) renames it to `RS256`.
pub struct YubiKeySigningMethod {
    alg: String,
    wrapped: Rs256,
    hasher: HashAlgorithm,
    connector: Arc<dyn PivConnector>,
}

impl YubiKeySigningMethod {
    /// Method opening tokens through `connector`
    pub fn new(connector: Arc<dyn PivConnector>) -> Self {
        Self {
            alg: ALG_YKRS256.to_string(),
            wrapped: Rs256,
            hasher: HashAlgorithm::Sha256,
            connector,
        }
    }

    /// Method using the default PC/SC connector (first reader containing
    /// "yubikey")
    #[cfg(feature = "pcsc-backend")]
    #[must_use]
    pub fn pcsc() -> Self {
        Self::new(Arc::new(crate::adapters::yubikey::PcscConnector::default()))
    }

    /// Take over the wrapped algorithm's name so tokens declare `RS256`.
    pub fn override_standard(&mut self) {
        self.alg = self.wrapped.alg().to_string();
    }

    /// Override and register in `registry`, replacing its `RS256` handler.
    pub fn override_in(mut self, registry: &mut SigningMethodRegistry) -> Arc<Self> {
        self.override_standard();
        let method = Arc::new(self);
        if registry.register(method.clone()).is_some() {
            log::info!("Hardware signing now handles {}", method.alg);
        }
        method
    }

    /// Register under the current name without overriding.
    pub fn register_in(self, registry: &mut SigningMethodRegistry) -> Arc<Self> {
        let method = Arc::new(self);
        registry.register(method.clone());
        method
    }

    #[must_use]
    pub fn connector(&self) -> &Arc<dyn PivConnector> {
        &self.connector
    }
}

impl SigningMethod for YubiKeySigningMethod {
    fn alg(&self) -> &str {
        &self.alg
    }

    fn hash(&self) -> HashAlgorithm {
        self.hasher
    }

    fn sign(&self, signing_input: &str, key: &dyn Any) -> SignerResult<String> {
        let config = SigningContext::lookup(key).ok_or_else(|| {
            SignerError::InvalidKeyType(format!(
                "{} signs with a SigningContext",
                self.alg
            ))
        })?;

        let mut session = DeviceSession::open(self.connector.as_ref(), config.slot)?;
        let mut signer = session.private_key(&config.pin)?;

        let digest = self.hasher.digest(signing_input.as_bytes());
        let signature = signer.sign_digest(&digest)?;
        log::debug!(
            "Signed {} byte input with slot {}",
            signing_input.len(),
            config.slot
        );

        Ok(URL_SAFE_NO_PAD.encode(signature))
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &dyn Any) -> SignerResult<()> {
        self.wrapped.verify(signing_input, signature, key)
    }
}

impl std::fmt::Debug for YubiKeySigningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YubiKeySigningMethod")
            .field("alg", &self.alg)
            .field("hash", &self.hasher)
            .finish_non_exhaustive()
    }
}
