//! Hardware backend traits for PIV token access.
//!
//! The signer depends on exactly this surface: locate and open a token,
//! read a slot certificate, verify a PIN and sign a digest. The PC/SC
//! implementation lives in [`crate::adapters::yubikey`]; tests provide
//! in-memory implementations.

use crate::domain::crypto::DigestBytes;
use crate::domain::types::{PivPin, PivSlot};
use crate::infra::error::SignerResult;

/// Locates and opens a PIV token.
pub trait PivConnector: Send + Sync {
    /// Open the first attached token this connector accepts.
    ///
    /// # Errors
    ///
    /// Returns `DeviceNotFound` when no matching token is attached.
    fn open(&self) -> SignerResult<Box<dyn PivDevice>>;
}

/// An open, exclusively held PIV token.
///
/// Dropping the value releases the handle.
pub trait PivDevice {
    /// Name of the reader the token was opened through.
    fn reader_name(&self) -> &str;

    /// Get the raw DER-encoded certificate from a slot.
    ///
    /// # Errors
    ///
    /// Returns `SlotReadError` if the slot is empty or unreadable.
    fn certificate_der(&mut self, slot: PivSlot) -> SignerResult<Vec<u8>>;

    /// Verify the PIV PIN, unlocking private-key operations.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` on a wrong PIN or a blocked PIN.
    fn verify_pin(&mut self, pin: &PivPin) -> SignerResult<()>;

    /// Produce an RSASSA-PKCS1-v1_5 signature over `digest` with the key in
    /// `slot`. `modulus_len` is the key size in bytes.
    ///
    /// # Errors
    ///
    /// Returns `SigningFailure` if the device rejects the operation.
    fn sign_digest(
        &mut self,
        slot: PivSlot,
        digest: &DigestBytes,
        modulus_len: usize,
    ) -> SignerResult<Vec<u8>>;
}
