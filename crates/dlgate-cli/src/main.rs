//! `dlgate` CLI: operator tooling for download grants.
//!
//! Mints and checks grant values locally with the same signing routine
//! the server uses. No network involved: anyone holding the signing
//! secret can mint a grant offline.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use dlgate_core::clock::SystemClock;
use dlgate_core::grant::GrantAuthority;
use dlgate_core::secret::SigningSecret;

/// dlgate: signed download grants for gated assets.
#[derive(Parser)]
#[command(
    name = "dlgate",
    version,
    about = "dlgate CLI: mint and verify download grants",
    after_help = "Examples:\n  \
        dlgate secret\n  \
        dlgate mint brochure --ttl 300\n  \
        dlgate verify brochure 1768000000.p6examPleTagvAlue"
)]
struct Cli {
    /// Signing secret (must match the server's DLGATE_SECRET).
    #[arg(long, env = "DLGATE_SECRET")]
    secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a grant for a resource class.
    Mint {
        /// Resource class, e.g. `brochure` or `quotes`.
        class: String,
        /// Grant lifetime in seconds.
        #[arg(long, default_value = "300")]
        ttl: u64,
    },
    /// Verify a grant value against a resource class.
    Verify {
        /// Resource class the grant should be bound to.
        class: String,
        /// The grant value, `{expires_at}.{tag}`.
        value: String,
    },
    /// Generate a fresh signing secret.
    Secret,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Secret => {
            println!("{}", SigningSecret::generate().expose());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Mint { class, ttl } => {
            let grants = authority(cli.secret)?;
            println!("{}", grants.issue(&class, ttl));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { class, value } => {
            let grants = authority(cli.secret)?;
            if grants.verify(Some(&value), &class) {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn authority(secret: Option<String>) -> Result<GrantAuthority> {
    let Some(secret) = secret.filter(|s| !s.trim().is_empty()) else {
        bail!("no signing secret: pass --secret or set DLGATE_SECRET");
    };
    Ok(GrantAuthority::new(
        SigningSecret::new(secret),
        Arc::new(SystemClock),
    ))
}
