use std::any::Any;

use super::{decode_segment, now_unix, Claims, Header, SigningMethodRegistry, Token};
use crate::infra::error::{SignerError, SignerResult};

/// Parses and verifies compact tokens against a registry.
#[derive(Debug, Clone)]
pub struct Parser<'r> {
    registry: &'r SigningMethodRegistry,
    validate_claims: bool,
}

impl<'r> Parser<'r> {
    #[must_use]
    pub fn new(registry: &'r SigningMethodRegistry) -> Self {
        Self {
            registry,
            validate_claims: true,
        }
    }

    /// Skip time-based claim validation.
    #[must_use]
    pub fn without_claims_validation(mut self) -> Self {
        self.validate_claims = false;
        self
    }

    /// Decode `token`, resolve the verification key through `keyfunc`,
    /// check the signature and then the claims.
    ///
    /// `keyfunc` sees the decoded but not yet verified token.
    pub fn parse<C, K, F>(&self, token: &str, keyfunc: F) -> SignerResult<Token<C>>
    where
        C: Claims,
        K: Any,
        F: FnOnce(&Token<C>) -> SignerResult<K>,
    {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SignerError::MalformedToken(
                "token contains an invalid number of segments".into(),
            ));
        };

        let header: Header = serde_json::from_slice(&decode_segment(header_b64, "header")?)?;
        let claims: C = serde_json::from_slice(&decode_segment(claims_b64, "claims")?)?;

        let method = self
            .registry
            .get(&header.alg)
            .ok_or_else(|| SignerError::UnknownAlgorithm(header.alg.clone()))?;

        let mut parsed = Token {
            header,
            claims,
            method,
            raw: token.to_string(),
            signature: signature.to_string(),
            valid: false,
        };

        let key = keyfunc(&parsed)?;
        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        parsed.method.verify(signing_input, signature, &key)?;

        if self.validate_claims {
            parsed.claims.validate(now_unix())?;
        }

        parsed.valid = true;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::StandardClaims;

    fn no_key(_: &Token<StandardClaims>) -> SignerResult<()> {
        Ok(())
    }

    #[test]
    fn test_wrong_segment_count() {
        let registry = SigningMethodRegistry::with_standard();
        let parser = Parser::new(&registry);
        for token in ["", "a.b", "a.b.c.d"] {
            let err = parser.parse::<StandardClaims, _, _>(token, no_key).unwrap_err();
            assert!(matches!(err, SignerError::MalformedToken(_)), "{token}");
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let registry = SigningMethodRegistry::with_standard();
        // {"alg":"none"} . {}
        let err = Parser::new(&registry)
            .parse::<StandardClaims, _, _>("eyJhbGciOiJub25lIn0.e30.", no_key)
            .unwrap_err();
        assert!(matches!(err, SignerError::UnknownAlgorithm(alg) if alg == "none"));
    }

    #[test]
    fn test_bad_base64_header() {
        let registry = SigningMethodRegistry::with_standard();
        let err = Parser::new(&registry)
            .parse::<StandardClaims, _, _>("***.e30.c2ln", no_key)
            .unwrap_err();
        assert!(matches!(err, SignerError::MalformedToken(_)));
    }
}
