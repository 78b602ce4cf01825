//! YubiKey JWT Signer Library
//!
//! Signs JSON Web Tokens with RS256 using the private key held in a YubiKey
//! PIV slot, and verifies them with the slot's public key, with or without
//! the device attached.
//!
//! ```no_run
//! use yubikey_jwt::{
//!     Parser, PivPin, SigningContext, SigningMethodRegistry, StandardClaims, Token,
//!     YubiKeyConfig, YubiKeySigningMethod,
//! };
//!
//! # fn main() -> yubikey_jwt::SignerResult<()> {
//! let mut registry = SigningMethodRegistry::with_standard();
//! let method = YubiKeySigningMethod::pcsc().override_in(&mut registry);
//!
//! let config = YubiKeyConfig::new(PivPin::new("123456")?);
//! let context = SigningContext::initialize(config, method.connector().as_ref())?;
//!
//! let mut token = Token::new_with_claims(method, StandardClaims::issued_by("test", 60));
//! context.apply_key_id(&mut token.header);
//! let signed = token.signed_string(&context)?;
//!
//! let parsed = Parser::new(&registry).parse::<StandardClaims, _, _>(&signed, context.keyfunc())?;
//! assert!(parsed.valid);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod jwt;
pub mod services;

pub use adapters::backend::{PivConnector, PivDevice};
#[cfg(feature = "pcsc-backend")]
pub use adapters::yubikey::PcscConnector;
pub use domain::crypto::{DigestBytes, HashAlgorithm, RsaPublicKey};
pub use domain::types::{PivPin, PivSlot};
pub use infra::config::{ConfigManager, SignerSettings};
pub use infra::error::{SignerError, SignerResult};
pub use jwt::{
    Claims, Header, Parser, Rs256, SigningMethod, SigningMethodRegistry, StandardClaims, Token,
};
pub use services::{
    key_id_for_certificate, verify_keyfunc, DeviceSession, Jwk, PublicKeyExport,
    SigningContext, SlotSigner, YubiKeyConfig, YubiKeySigningMethod,
};
