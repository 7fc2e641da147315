//! Error types for the KubeSnake command line.

use std::path::PathBuf;
use thiserror::Error;

use kubesnake_embed::EmbedError;

/// Beacon delivery errors.
#[derive(Debug, Error)]
pub enum BeaconError {
    /// Beacon file could not be read
    #[error("read beacon file {}: {source}", path.display())]
    ReadBeacon {
        /// Beacon file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be built or the request failed
    #[error("post beacon: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("beacon POST failed: {0}")]
    Status(reqwest::StatusCode),
}

/// Top-level application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Embedding or loading the self-carried config failed
    #[error(transparent)]
    Embed(#[from] EmbedError),

    /// Beacon mode failed
    #[error(transparent)]
    Beacon(#[from] BeaconError),
}
