//! Service layer module root.
//! Device sessions, the signing context, the hardware signing method and
//! public-key export.

pub mod context;
pub mod export;
pub mod session;
pub mod signing_method;

pub use context::{verify_keyfunc, SigningContext, YubiKeyConfig};
pub use export::{Jwk, PublicKeyExport};
pub use session::{key_id_for_certificate, DeviceSession, SlotSigner};
pub use signing_method::YubiKeySigningMethod;
