//! # bulletin: Service-Bulletin Extractor
//!
//! Thin entrypoint for the `bulletin` command-line interface. All logic lives
//! in the `bulletin_cli` library crate.

use anyhow::Result;
use bulletin_cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // 2. Setup logging (stderr, so stdout stays clean for `schema`)
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bulletin=info".parse()?))
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 3. Parse CLI arguments
    let cli = Cli::parse();

    // 4. Run and map failures to a non-zero exit code
    if let Err(e) = run(cli).await {
        eprintln!("[bulletin error] {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
