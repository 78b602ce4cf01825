//! Adapter layer modules for external system integration.
//!
//! Provides:
//! - The hardware backend traits the signer is written against
//! - `YubiKey` PIV access over PC/SC

pub mod backend;
pub mod yubikey;
