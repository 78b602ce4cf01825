use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{encode_segment, Claims, SigningMethod};
use crate::infra::error::SignerResult;

/// JOSE header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl Header {
    #[must_use]
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            typ: Some("JWT".to_string()),
            kid: None,
        }
    }
}

/// A token being built or one returned by the [`Parser`](super::Parser).
pub struct Token<C> {
    pub header: Header,
    pub claims: C,
    pub method: Arc<dyn SigningMethod>,
    /// Compact form the token was parsed from; empty for new tokens.
    pub raw: String,
    /// Encoded signature segment; empty until parsed.
    pub signature: String,
    /// Set by the parser once signature and claims have been checked.
    pub valid: bool,
}

impl<C: Claims> Token<C> {
    /// New unsigned token whose header names `method`.
    pub fn new_with_claims(method: Arc<dyn SigningMethod>, claims: C) -> Self {
        Self {
            header: Header::new(method.alg()),
            claims,
            method,
            raw: String::new(),
            signature: String::new(),
            valid: false,
        }
    }

    /// `b64url(header) "." b64url(claims)`
    pub fn signing_string(&self) -> SignerResult<String> {
        let header = serde_json::to_vec(&self.header)?;
        let claims = serde_json::to_vec(&self.claims)?;
        Ok(format!(
            "{}.{}",
            encode_segment(&header),
            encode_segment(&claims)
        ))
    }

    /// Sign with `key` and return the compact serialization.
    pub fn signed_string(&self, key: &dyn Any) -> SignerResult<String> {
        let signing_input = self.signing_string()?;
        let signature = self.method.sign(&signing_input, key)?;
        Ok(format!("{signing_input}.{signature}"))
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for Token<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("header", &self.header)
            .field("claims", &self.claims)
            .field("method", &self.method.alg())
            .field("valid", &self.valid)
            .finish()
    }
}
