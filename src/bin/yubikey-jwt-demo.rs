//! End-to-end demo: sign a token on the YubiKey and verify it twice.
//!
//! Verification runs once with the public key cached from the device and
//! once with a key rebuilt from the exported PEM, which needs no hardware.

use jsonwebtoken::DecodingKey;
use yubikey_jwt::{
    Parser, PivPin, SignerError, SignerResult, SigningContext, SigningMethodRegistry,
    StandardClaims, Token, YubiKeyConfig, YubiKeySigningMethod,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn run() -> SignerResult<()> {
    let mut registry = SigningMethodRegistry::with_standard();
    let method = YubiKeySigningMethod::pcsc().override_in(&mut registry);

    let config = YubiKeyConfig::new(PivPin::new("123456")?);
    let context = SigningContext::initialize(config, method.connector().as_ref())?;

    let claims = StandardClaims::issued_by("test", 60);
    let mut token = Token::new_with_claims(method, claims);
    context.apply_key_id(&mut token.header);

    let token_string = token.signed_string(&context)?;
    println!("TOKEN: {token_string}");

    let parser = Parser::new(&registry);

    let verified = parser.parse::<StandardClaims, _, _>(&token_string, context.keyfunc())?;
    if !verified.valid {
        return Err(SignerError::VerificationFailure(
            "token rejected with device public key".into(),
        ));
    }
    log::info!("     verified with YK PublicKey");

    let exported_pem = context
        .config()
        .public_key()
        .map(|key| key.to_pem().to_string())
        .ok_or_else(|| SignerError::MissingConfiguration("no public key cached".into()))?;
    let exported = DecodingKey::from_rsa_pem(exported_pem.as_bytes())
        .map_err(|e| SignerError::InvalidKeyType(format!("exported PEM unusable: {e}")))?;

    let reverified = parser.parse::<StandardClaims, _, _>(&verified.raw, |_| Ok(exported))?;
    if !reverified.valid {
        return Err(SignerError::VerificationFailure(
            "token rejected with exported public key".into(),
        ));
    }
    log::info!("     verified with exported PublicKey");

    Ok(())
}
