mod commands;
mod config;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use camocert_core::cert::KeyAlgorithm;
use camocert_core::guard::{exit_on_escalation, quiet_escalation_hook, FatalWriter};

use config::Config;

#[derive(Parser)]
#[command(name = "camocert", about = "Ephemeral, fingerprint-resistant self-signed TLS credentials")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh self-signed certificate and private key
    Generate {
        /// Host name bound as the certificate common name (omit for none)
        #[arg(long, default_value = "")]
        host: String,

        /// Key algorithm: rsa, rsa-<bits>, or p256. Overrides CAMOCERT_KEY.
        #[arg(long)]
        key: Option<KeyAlgorithm>,

        /// Most ~30-day periods to backdate notBefore by. Overrides CAMOCERT_MAX_BACKDATE_PERIODS.
        #[arg(long)]
        max_backdate_periods: Option<u32>,

        /// Write cert.pem and key.pem into this directory instead of stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    quiet_escalation_hook();

    // Initialize tracing (controlled by RUST_LOG env var). A dead stderr
    // escalates rather than silently dropping logs.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(|| FatalWriter::new("stderr", io::stderr()))
        .init();

    // Everything that can log or write runs inside the boundary.
    let result = exit_on_escalation(|| {
        // Load .env file if present (non-fatal if missing).
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env file loaded: {e}");
        }

        match Cli::parse().command {
            Commands::Generate {
                host,
                key,
                max_backdate_periods,
                out_dir,
            } => {
                let config = Config::from_env().with_overrides(key, max_backdate_periods);
                commands::generate::run_generate(&host, &config, out_dir.as_deref())
            }
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
