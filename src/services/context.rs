//! Signing context: configuration carried into the signing method.
//!
//! [`SigningContext::initialize`] contacts the token once to cache the slot
//! public key and derive the key id, so later signing calls only need to
//! authenticate and sign.

use std::any::Any;

use crate::adapters::backend::PivConnector;
use crate::domain::crypto::RsaPublicKey;
use crate::domain::types::{PivPin, PivSlot};
use crate::infra::error::{SignerError, SignerResult};
use crate::jwt::{Header, Token};
use crate::services::session::DeviceSession;

/// Signer configuration
#[derive(Debug, Clone, Default)]
pub struct YubiKeyConfig {
    /// Key id placed in the `kid` header; empty means omitted.
    pub key_id: String,
    pub pin: PivPin,
    pub slot: PivSlot,
    public_key: Option<RsaPublicKey>,
}

impl YubiKeyConfig {
    /// Configuration for the signature slot with an empty key id
    #[must_use]
    pub fn new(pin: PivPin) -> Self {
        Self {
            pin,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_slot(mut self, slot: PivSlot) -> Self {
        self.slot = slot;
        self
    }

    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = key_id.into();
        self
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Public key cached by [`SigningContext::initialize`]
    #[must_use]
    pub fn public_key(&self) -> Option<&RsaPublicKey> {
        self.public_key.as_ref()
    }
}

/// Keyfunc returning the public key cached in `config`, whatever the token.
pub fn verify_keyfunc<'a, C: 'a>(
    config: &'a YubiKeyConfig,
) -> impl Fn(&Token<C>) -> SignerResult<RsaPublicKey> + 'a {
    move |_token: &Token<C>| {
        config.public_key().cloned().ok_or_else(|| {
            SignerError::MissingConfiguration(
                "no public key cached; initialize the signing context first".into(),
            )
        })
    }
}

/// Configuration handed to [`Token::signed_string`] as the signing key.
#[derive(Debug, Clone)]
pub struct SigningContext {
    config: YubiKeyConfig,
}

impl SigningContext {
    /// Read the slot certificate, cache its public key and set
    /// `key_id = hex(sha256(certificate DER))`.
    ///
    /// # Errors
    ///
    /// `DeviceNotFound` or `SlotReadError` from the device session.
    pub fn initialize(
        mut config: YubiKeyConfig,
        connector: &dyn PivConnector,
    ) -> SignerResult<Self> {
        let session = DeviceSession::open(connector, config.slot)?;

        config.public_key = Some(session.public_key().clone());
        config.key_id = session.key_id();
        log::info!(
            "Initialized signing context for slot {} (kid {})",
            config.slot,
            config.key_id
        );

        Ok(Self { config })
    }

    /// Wrap a configuration without touching the token.
    #[must_use]
    pub fn from_config(config: YubiKeyConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &YubiKeyConfig {
        &self.config
    }

    /// Configuration carried by `key`, if `key` is a signing context.
    #[must_use]
    pub fn lookup(key: &dyn Any) -> Option<&YubiKeyConfig> {
        key.downcast_ref::<SigningContext>().map(SigningContext::config)
    }

    /// Copy the configured key id into `header`; an empty id is left out.
    pub fn apply_key_id(&self, header: &mut Header) {
        if !self.config.key_id.is_empty() {
            header.kid = Some(self.config.key_id.clone());
        }
    }

    /// Keyfunc backed by the cached device public key.
    pub fn keyfunc<'a, C: 'a>(
        &'a self,
    ) -> impl Fn(&Token<C>) -> SignerResult<RsaPublicKey> + 'a {
        verify_keyfunc(&self.config)
    }
}
