use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::infra::error::{SignerError, SignerResult};

/// Claim sets a [`Token`](super::Token) can carry.
pub trait Claims: Serialize + DeserializeOwned {
    /// Time-based validation performed after the signature checks out.
    fn validate(&self, _now: i64) -> SignerResult<()> {
        Ok(())
    }
}

/// Registered claims of RFC 7519 §4.1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl StandardClaims {
    /// Issuer-only claims expiring `ttl_secs` from now
    #[must_use]
    pub fn issued_by(issuer: impl Into<String>, ttl_secs: i64) -> Self {
        let now = super::now_unix();
        Self {
            iss: Some(issuer.into()),
            iat: Some(now),
            exp: Some(now.saturating_add(ttl_secs)),
            ..Self::default()
        }
    }
}

impl Claims for StandardClaims {
    fn validate(&self, now: i64) -> SignerResult<()> {
        if let Some(exp) = self.exp {
            if now >= exp {
                return Err(SignerError::ClaimsInvalid(format!(
                    "token expired {}s ago",
                    now - exp
                )));
            }
        }
        if let Some(nbf) = self.nbf {
            if now < nbf {
                return Err(SignerError::ClaimsInvalid("token is not valid yet".into()));
            }
        }
        if let Some(iat) = self.iat {
            if now < iat {
                return Err(SignerError::ClaimsInvalid(
                    "token used before issued".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Claims for serde_json::Map<String, serde_json::Value> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_claims_are_omitted() {
        let claims = StandardClaims {
            iss: Some("test".into()),
            exp: Some(1_700_000_060),
            ..StandardClaims::default()
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"{"exp":1700000060,"iss":"test"}"#);
    }

    #[test]
    fn test_time_validation() {
        let claims = StandardClaims {
            exp: Some(100),
            nbf: Some(50),
            iat: Some(40),
            ..StandardClaims::default()
        };
        assert!(claims.validate(60).is_ok());
        assert!(matches!(
            claims.validate(100),
            Err(SignerError::ClaimsInvalid(_))
        ));
        assert!(matches!(
            claims.validate(45),
            Err(SignerError::ClaimsInvalid(_))
        ));
        assert!(StandardClaims::default().validate(i64::MAX).is_ok());
    }

    #[test]
    fn test_issued_by() {
        let claims = StandardClaims::issued_by("test", 60);
        assert_eq!(claims.iss.as_deref(), Some("test"));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 60);
    }
}
