//! `YubiKey` hardware adapter modules.
//!
//! PC/SC reader discovery, PIN verification, certificate retrieval and
//! raw-RSA signing on top of the `yubikey` crate.
//!
//! This module requires the `pcsc-backend` feature (enabled by default).

#[cfg(feature = "pcsc-backend")]
pub mod ops;

#[cfg(feature = "pcsc-backend")]
pub use ops::{PcscConnector, YubiKeyDevice};
