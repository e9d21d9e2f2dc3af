//! webca binary - a certificate authority behind a web form.
//!
//! Runs an HTTP server that hands out freshly generated RSA keys and
//! self-signed root CA certificates in PEM format, or, with `--genroot`,
//! prints one root CA to stdout and exits.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use webca::configs::AppConfig;
use webca::encode;
use webca::issuer;
use webca::keygen;
use webca::template::{self, SubjectAttributes};
use webca::webserver;

#[derive(Parser)]
#[command(name = "webca")]
#[command(about = "Self-service X.509 certificate issuance behind a web form", long_about = None)]
struct Cli {
    /// Listening address, e.g. 127.0.0.1:8080 (overrides the config file)
    #[arg(long)]
    listen: Option<String>,

    /// Configuration file path
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Generate a root certificate on stdout and exit
    #[arg(long)]
    genroot: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = if Path::new(&cli.config).exists() {
        AppConfig::from_file(&cli.config)?
    } else {
        tracing::debug!(path = %cli.config, "config file not found, using defaults");
        AppConfig::default()
    };

    if let Some(listen) = cli.listen.as_deref() {
        let (host, port) = listen
            .rsplit_once(':')
            .context("Listen address must be host:port")?;
        config.server.host = host.to_string();
        config.server.port = port.parse().context("Invalid listen port")?;
    }

    if cli.genroot {
        return generate_root(&config);
    }

    webserver::start_webserver(config)
}

/// One-shot mode: issue a self-signed root CA from the configured defaults
/// and print the key and certificate PEM blocks to stdout.
fn generate_root(config: &AppConfig) -> Result<()> {
    let defaults = &config.root_ca_defaults;
    let private_key = keygen::generate_rsa_key(config.issuance.key_bits)?;

    let subject = SubjectAttributes {
        common_name: defaults.common_name.clone(),
        country: defaults.country.clone(),
        organizational_unit: defaults.organizational_unit.clone(),
        organization: defaults.organization.clone(),
    };

    let template = template::build_template(subject, true)?;
    let certificate = issuer::self_sign(template, &private_key)?;

    print!("{}", encode::issuance_bundle(&private_key, &certificate)?);
    Ok(())
}
