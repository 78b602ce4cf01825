//! Error types shared by every layer of the signer.

use thiserror::Error;

/// Result type for signer operations
pub type SignerResult<T> = Result<T, SignerError>;

/// Error kinds surfaced by the signer, the token library and the CLIs
#[derive(Error, Debug, miette::Diagnostic)]
pub enum SignerError {
    #[error("YubiKey not found: {0}")]
    #[diagnostic(help("make sure the key is inserted and pcscd is running"))]
    DeviceNotFound(String),

    #[error("Unable to read certificate from slot: {0}")]
    SlotReadError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Invalid key type: {0}")]
    InvalidKeyType(String),

    #[error("Signing failed: {0}")]
    SigningFailure(String),

    #[error("Signature verification failed: {0}")]
    VerificationFailure(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unknown signing algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid claims: {0}")]
    ClaimsInvalid(String),

    #[error("Certificate error: {0}")]
    CertificateError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<der::Error> for SignerError {
    fn from(error: der::Error) -> Self {
        SignerError::CertificateError(error.to_string())
    }
}

impl From<serde_json::Error> for SignerError {
    fn from(error: serde_json::Error) -> Self {
        SignerError::MalformedToken(error.to_string())
    }
}

impl From<std::io::Error> for SignerError {
    fn from(error: std::io::Error) -> Self {
        SignerError::IoError(error.to_string())
    }
}
