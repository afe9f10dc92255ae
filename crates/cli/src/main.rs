//! NovaShop shell - interactive storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Against the backend named in NOVASHOP_BACKEND_URL (or .env)
//! novashop
//!
//! # Against an explicit backend
//! novashop --backend-url http://localhost:8000
//! ```
//!
//! One process is one shopping session: the cart lives in memory and is
//! gone when the shell exits, while the signed-in session persists in the
//! session file and is restored on the next start.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use novashop_client::config::ClientConfig;

mod commands;
mod render;

use commands::shell::Shell;

#[derive(Parser)]
#[command(name = "novashop")]
#[command(author, version, about = "Interactive NovaShop storefront shell")]
struct Cli {
    /// Backend origin, overriding NOVASHOP_BACKEND_URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Session file path, overriding NOVASHOP_SESSION_FILE
    #[arg(long)]
    session_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Pick up RUST_LOG and NOVASHOP_* from a local .env before anything
    // reads the environment.
    let _ = dotenvy::dotenv();

    // Keep diagnostics off the interactive prompt unless asked for.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Shell::new(config).run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig, novashop_client::config::ConfigError> {
    match &cli.backend_url {
        Some(backend_url) => ClientConfig::new(backend_url, cli.session_file.clone()),
        None => {
            let mut config = ClientConfig::from_env()?;
            if let Some(path) = &cli.session_file {
                config.session_file = path.clone();
            }
            Ok(config)
        }
    }
}
