//! KubeSnake binary entry point.
//!
//! This is a thin wrapper around the kubesnake-cli library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Runs the selected command
//!
//! Logs go to stderr so that `kubesnake show` output stays clean on stdout.

use anyhow::Result;
use kubesnake_cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::from_args();
    tracing::debug!("arguments: {cli:?}");

    run(cli).await?;

    Ok(())
}
