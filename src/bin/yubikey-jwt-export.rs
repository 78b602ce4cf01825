//! Print the signing slot's public key as PEM and as a JWK.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser as ClapParser;
use yubikey_jwt::{
    ConfigManager, Parser, PcscConnector, PivConnector, PivPin, PivSlot, PublicKeyExport,
    SignerError, SignerResult, SigningContext, SigningMethodRegistry, StandardClaims, Token,
    YubiKeyConfig, YubiKeySigningMethod,
};

#[derive(ClapParser)]
#[command(name = "yubikey-jwt-export")]
#[command(about = "Export the YubiKey signing key as PEM and JWK")]
#[command(long_about = "
Reads the certificate in a PIV slot of the first reader whose name contains
\"yubikey\" and prints its public key as PEM and as a JSON Web Key whose kid
is the hex SHA-256 of the certificate.

SLOT REFERENCE:
    9a = Authentication
    9c = Digital Signature (default)
    9d = Key Management
    9e = Card Authentication

ENVIRONMENT VARIABLES:
    YUBICO_PIN      YubiKey PIN (used with --check-signing)
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// YubiKey PIN (defaults to the configured PIN variable, then 123456)
    #[arg(short, long)]
    pin: Option<String>,

    /// YubiKey slot (defaults to the configured slot, then 9c)
    #[arg(short, long, value_name = "SLOT_ID")]
    slot: Option<String>,

    /// Settings file (defaults to the user configuration directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sign a probe token with the PIN and verify it against the exported key
    #[arg(long)]
    check_signing: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> SignerResult<()> {
    log::info!("======= Init  ========");

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let settings = manager.load_or_default()?;

    let slot = match &cli.slot {
        Some(slot) => slot.parse::<PivSlot>()?,
        None => settings.piv_slot()?,
    };
    let connector: Arc<dyn PivConnector> = Arc::new(PcscConnector::new(&settings.reader_filter));

    let export = PublicKeyExport::from_device(connector.as_ref(), slot)?;
    log::info!("     PublicKey: \n{}", export.pem());
    println!("JWK Format:\n{}", export.jwk.to_pretty_json()?);

    if cli.check_signing {
        let pin = cli
            .pin
            .or_else(|| settings.pin_from_env())
            .unwrap_or_else(|| PivPin::default().as_str().to_string());
        check_signing(connector, slot, &pin, &export)?;
    }

    Ok(())
}

/// Round-trip a short-lived token through the device and the exported JWK.
fn check_signing(
    connector: Arc<dyn PivConnector>,
    slot: PivSlot,
    pin: &str,
    export: &PublicKeyExport,
) -> SignerResult<()> {
    let mut registry = SigningMethodRegistry::with_standard();
    let method = YubiKeySigningMethod::new(connector).override_in(&mut registry);

    let config = YubiKeyConfig::new(PivPin::new(pin)?)
        .with_slot(slot)
        .with_key_id(export.key_id.clone());
    let context = SigningContext::from_config(config);

    let mut token = Token::new_with_claims(method, StandardClaims::issued_by("yubikey-jwt-export", 60));
    context.apply_key_id(&mut token.header);
    let signed = token.signed_string(&context)?;

    let decoding_key = export.jwk.decoding_key()?;
    let parsed = Parser::new(&registry).parse::<StandardClaims, _, _>(&signed, |_| Ok(decoding_key))?;
    if !parsed.valid {
        return Err(SignerError::VerificationFailure(
            "probe token rejected by exported key".into(),
        ));
    }

    log::info!("     signing check passed for slot {slot}");
    Ok(())
}
