//! Type-safe wrappers using new-type pattern
//!
//! PIN and slot values are validated once at the edge so the hardware layer
//! never sees malformed input.

use crate::domain::constants;
use crate::infra::error::{SignerError, SignerResult};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for PIV PINs
#[derive(Clone, PartialEq, Eq)]
pub struct PivPin(String);

impl PivPin {
    /// Create a new `PivPin` after validation
    pub fn new(pin: impl AsRef<str>) -> SignerResult<Self> {
        let pin = pin.as_ref();
        Self::validate_pin(pin)?;
        Ok(PivPin(pin.to_string()))
    }

    /// Get the PIN as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the PIN as bytes for the `YubiKey` API
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn validate_pin(pin: &str) -> SignerResult<()> {
        if pin.len() < 6 {
            return Err(SignerError::ValidationError(format!(
                "PIV PIN too short: {} characters (minimum 6)",
                pin.len()
            )));
        }

        if pin.len() > 8 {
            return Err(SignerError::ValidationError(format!(
                "PIV PIN too long: {} characters (maximum 8)",
                pin.len()
            )));
        }

        if !pin.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SignerError::ValidationError(
                "PIV PIN must contain only alphanumeric characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PivPin {
    fn default() -> Self {
        PivPin(constants::DEFAULT_PIN.to_string())
    }
}

impl FromStr for PivPin {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// Never print the PIN, not even in debug output.
impl fmt::Display for PivPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[PIN REDACTED]")
    }
}

impl fmt::Debug for PivPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PivPin([REDACTED])")
    }
}

/// Type-safe wrapper for PIV slot IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PivSlot(u8);

impl PivSlot {
    /// Digital Signature slot (9C)
    pub const SIGNATURE: PivSlot = PivSlot(constants::PIV_SLOT_SIGNATURE);

    /// Create a new `PivSlot` after validation
    pub fn new(slot: u8) -> SignerResult<Self> {
        if constants::VALID_PIV_SLOTS.contains(&slot) {
            Ok(PivSlot(slot))
        } else {
            Err(SignerError::ValidationError(format!(
                "Invalid PIV slot 0x{slot:02x}. Valid slots: 9a (Auth), 9c (Sign), 9d (KeyMgmt), 9e (CardAuth)"
            )))
        }
    }

    /// Get the slot ID as u8
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl Default for PivSlot {
    fn default() -> Self {
        Self::SIGNATURE
    }
}

impl FromStr for PivSlot {
    type Err = SignerError;

    /// Accepts `9c`, `0x9c` and decimal `156`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            u8::from_str_radix(hex, 16).ok()
        } else if s.len() == 2 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            u8::from_str_radix(s, 16).ok()
        } else {
            s.parse::<u8>().ok()
        };

        let value = value.ok_or_else(|| {
            SignerError::ValidationError(format!(
                "Invalid slot format '{s}'. Expected hex value (9a, 9c, 9d, or 9e)"
            ))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for PivSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}
