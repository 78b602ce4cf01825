//! PEM and JWK export of the slot public key.

mod common;

use common::{MockConnector, MockMode, SIGNING_KEY_ID, TEST_PIN};
use yubikey_jwt::{
    Jwk, Parser, PivPin, PivSlot, PublicKeyExport, SignerError, SigningContext,
    SigningMethodRegistry, StandardClaims, Token, YubiKeyConfig, YubiKeySigningMethod,
};

const EXPECTED_N: &str = "xw8QIqq5HMWMD9T3eirffnNcG0FlAiviZP_Vfg5jTluTcuE_BoNO2XcMudHy6OlwkfCKLVgXkhGlCLpnII9wxLbag8OMspCBeku8znon8t6m0aObqkcvzqRFJbRWOElXYQ6H8torCWAiKpDOjQL6Zo97oNWAFtAjLv2YFf9xgSLlEYsMX3rqdh_dQUrO1t2aUCT7JtuoLyEnKjNZ07w1oLcVsLweILeMXzTYh-NxFbrzwJWqpFWDHhH0Rh4e6bOAGykZodVEPDDZ9axooUvL1wA-AWov4qFGfX2CHuOq48DCxjWbHjAP0rLrNYzRYqhaDhFyplbWyW9UT4aLwPVlqw";

#[test]
fn test_jwk_components() {
    let export = PublicKeyExport::from_certificate(&common::fixture("signing_cert.der")).unwrap();

    assert_eq!(export.key_id, SIGNING_KEY_ID);
    assert_eq!(export.jwk.kty, "RSA");
    assert_eq!(export.jwk.kid.as_deref(), Some(SIGNING_KEY_ID));
    assert_eq!(export.jwk.n, EXPECTED_N);
    assert_eq!(export.jwk.e, "AQAB");
}

#[test]
fn test_pem_matches_openssl() {
    let export = PublicKeyExport::from_certificate(&common::fixture("signing_cert.der")).unwrap();
    let expected = common::fixture_string("signing_pub.pem");

    assert!(export.pem().starts_with("-----BEGIN PUBLIC KEY-----"));
    assert_eq!(export.pem().trim(), expected.trim());
}

#[test]
fn test_jwk_json_shape() {
    let export = PublicKeyExport::from_certificate(&common::fixture("signing_cert.der")).unwrap();
    let json = export.jwk.to_pretty_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kty"], "RSA");
    assert_eq!(value["kid"], SIGNING_KEY_ID);
    assert_eq!(value["e"], "AQAB");
    assert!(json.contains('\n'));

    let parsed: Jwk = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, export.jwk);
}

#[test]
fn test_export_from_device_needs_no_pin() {
    let connector = MockConnector::new();
    let export = PublicKeyExport::from_device(&connector, PivSlot::SIGNATURE).unwrap();

    assert_eq!(export.key_id, SIGNING_KEY_ID);
    assert_eq!(connector.counters.pin_checks(), 0);
    assert_eq!(connector.counters.opens(), 1);
    assert_eq!(connector.counters.closes(), 1);
}

#[test]
fn test_export_errors() {
    let absent = MockConnector::new().with_mode(MockMode::Absent);
    let err = PublicKeyExport::from_device(&absent, PivSlot::SIGNATURE).unwrap_err();
    assert!(matches!(err, SignerError::DeviceNotFound(_)));

    let empty = MockConnector::new().with_mode(MockMode::EmptySlot);
    let err = PublicKeyExport::from_device(&empty, PivSlot::SIGNATURE).unwrap_err();
    assert!(matches!(err, SignerError::SlotReadError(_)));
    assert_eq!(empty.counters.opens(), empty.counters.closes());

    let err = PublicKeyExport::from_certificate(&common::fixture("ec_cert.der")).unwrap_err();
    assert!(matches!(err, SignerError::CertificateError(_)));

    let err = PublicKeyExport::from_certificate(b"not a certificate").unwrap_err();
    assert!(matches!(err, SignerError::CertificateError(_)));
}

#[test]
fn test_jwk_rejects_non_rsa() {
    let mut jwk = PublicKeyExport::from_certificate(&common::fixture("signing_cert.der"))
        .unwrap()
        .jwk;
    jwk.kty = "EC".into();
    assert!(matches!(
        jwk.decoding_key(),
        Err(SignerError::InvalidKeyType(_))
    ));
}

#[test]
fn test_token_verifies_with_exported_keys() {
    let connector = MockConnector::new().into_arc();
    let mut registry = SigningMethodRegistry::with_standard();
    let method = YubiKeySigningMethod::new(connector.clone()).override_in(&mut registry);

    let config = YubiKeyConfig::new(PivPin::new(TEST_PIN).unwrap());
    let context = SigningContext::initialize(config, connector.as_ref()).unwrap();
    let mut token = Token::new_with_claims(method, StandardClaims::issued_by("test", 60));
    context.apply_key_id(&mut token.header);
    let signed = token.signed_string(&context).unwrap();

    let export = PublicKeyExport::from_device(connector.as_ref(), PivSlot::SIGNATURE).unwrap();
    let parser = Parser::new(&registry);

    let from_pem = jsonwebtoken::DecodingKey::from_rsa_pem(export.pem().as_bytes()).unwrap();
    let parsed = parser
        .parse::<StandardClaims, _, _>(&signed, |_| Ok(from_pem))
        .unwrap();
    assert!(parsed.valid);

    let from_jwk = export.jwk.decoding_key().unwrap();
    let parsed = parser
        .parse::<StandardClaims, _, _>(&signed, |token| {
            assert_eq!(token.header.kid, export.jwk.kid);
            Ok(from_jwk)
        })
        .unwrap();
    assert!(parsed.valid);
}
