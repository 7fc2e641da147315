//! Command-line arguments.
//!
//! # Configuration Sources
//!
//! The runtime configuration is the document embedded in the binary itself.
//! Operators can override the beacon settings via:
//! - CLI arguments (`--beacon-url`, `--beacon-path`)
//! - Environment variables (`KUBESNAKE_E2E_BEACON_URL`, `KUBESNAKE_E2E_BEACON_PATH`)

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

use crate::beacon::DEFAULT_BEACON_PATH;

/// Banner printed on start-up
pub const BANNER: &str = "KubeSnake ( https://github.com/DivergentCodes/kubesnake )";

/// KubeSnake command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "kubesnake", about = BANNER, version)]
pub struct Cli {
    /// Enable e2e mode and POST the beacon file to this URL
    ///
    /// Takes precedence over the embedded `e2e.beaconUrl`.
    #[arg(long, env = "KUBESNAKE_E2E_BEACON_URL", global = true)]
    pub beacon_url: Option<Url>,

    /// Beacon file read in e2e mode
    #[arg(
        long,
        env = "KUBESNAKE_E2E_BEACON_PATH",
        default_value = DEFAULT_BEACON_PATH,
        global = true
    )]
    pub beacon_path: PathBuf,

    /// Subcommand; without one, KubeSnake runs normally
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Embed config into this kubesnake binary
    Embed {
        /// JSON config file to embed
        config: PathBuf,

        /// Embed into this executable instead of the running one
        #[arg(long)]
        target: Option<PathBuf>,
    },

    /// Print the config embedded in this kubesnake binary
    Show {
        /// Read this executable instead of the running one
        #[arg(long)]
        target: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse from the process arguments and environment.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_embed() {
        let cli = Cli::try_parse_from(["kubesnake", "embed", "config.json"]).unwrap();
        match cli.command {
            Some(Command::Embed { config, target }) => {
                assert_eq!(config, PathBuf::from("config.json"));
                assert!(target.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_embed_with_target() {
        let cli = Cli::try_parse_from([
            "kubesnake",
            "embed",
            "config.json",
            "--target",
            "/opt/kubesnake",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Embed { target: Some(ref t), .. }) if t == &PathBuf::from("/opt/kubesnake")
        ));
    }

    #[test]
    fn test_embed_requires_config() {
        assert!(Cli::try_parse_from(["kubesnake", "embed"]).is_err());
    }

    #[test]
    fn test_parse_beacon_overrides() {
        let cli = Cli::try_parse_from([
            "kubesnake",
            "--beacon-url",
            "http://collector:8080/beacon",
            "--beacon-path",
            "/tmp/beacon.json",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            cli.beacon_url.map(String::from).as_deref(),
            Some("http://collector:8080/beacon")
        );
        assert_eq!(cli.beacon_path, PathBuf::from("/tmp/beacon.json"));
    }

    #[test]
    fn test_rejects_invalid_beacon_url() {
        assert!(Cli::try_parse_from(["kubesnake", "--beacon-url", "not a url"]).is_err());
    }
}
