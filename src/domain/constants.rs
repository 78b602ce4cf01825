//! Domain constants shared by the hardware adapter, the signer and the CLIs.
//! Keep this intentionally small; only broadly reused literals should live here.

// === PIV Slot Constants ===

/// PIV Authentication slot (9A)
pub const PIV_SLOT_AUTHENTICATION: u8 = 0x9a;

/// PIV Digital Signature slot (9C) - default for token signing
pub const PIV_SLOT_SIGNATURE: u8 = 0x9c;

/// PIV Key Management slot (9D)
pub const PIV_SLOT_KEY_MANAGEMENT: u8 = 0x9d;

/// PIV Card Authentication slot (9E)
pub const PIV_SLOT_CARD_AUTHENTICATION: u8 = 0x9e;

/// All valid PIV slots for certificate operations
pub const VALID_PIV_SLOTS: &[u8] = &[
    PIV_SLOT_AUTHENTICATION,
    PIV_SLOT_SIGNATURE,
    PIV_SLOT_KEY_MANAGEMENT,
    PIV_SLOT_CARD_AUTHENTICATION,
];

// === Device and CLI defaults ===

/// Substring (lowercase) a PC/SC reader name must contain to be used
pub const DEFAULT_READER_FILTER: &str = "yubikey";

/// Default slot in CLI notation
pub const DEFAULT_SLOT: &str = "9c";

/// Factory-default PIV PIN
pub const DEFAULT_PIN: &str = "123456";

/// Environment variable consulted for the PIN
pub const DEFAULT_PIN_ENV: &str = "YUBICO_PIN";

// === Algorithm identifiers ===

/// Algorithm name the hardware method registers under before an override
pub const ALG_YKRS256: &str = "YKRS256";

/// Standard JWS algorithm name for RSASSA-PKCS1-v1_5 with SHA-256
pub const ALG_RS256: &str = "RS256";

// === ASN.1 / PKCS#1 Constants ===

/// rsaEncryption (1.2.840.113549.1.1.1)
pub const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

/// DER prefix of a SHA-256 `DigestInfo`; the 32 digest bytes follow it.
pub const SHA256_DIGEST_INFO_PREFIX: &[u8] = &[
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

/// Minimum number of 0xFF bytes in an EMSA-PKCS1-v1_5 padding string
pub const PKCS1_MIN_PADDING: usize = 8;
