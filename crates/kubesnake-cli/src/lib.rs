//! KubeSnake command line.
//!
//! A thin wrapper around [`kubesnake_embed`]:
//! - `kubesnake embed <config.json>` validates a config file and embeds it
//!   into the running binary (or `--target`)
//! - `kubesnake show` prints the embedded config
//! - `kubesnake` with no subcommand prints the banner and, when an e2e
//!   beacon URL is configured, POSTs the beacon file to it
//!
//! # Example
//!
//! ```no_run
//! use kubesnake_cli::{Cli, run};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let cli = Cli::from_args();
//!     run(cli).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod app;
pub mod beacon;
pub mod cli;
pub mod error;

pub use app::{resolve_beacon_url, run};
pub use beacon::{BEACON_TIMEOUT, BeaconSender, DEFAULT_BEACON_PATH};
pub use cli::{BANNER, Cli, Command};
pub use error::{AppError, BeaconError};
