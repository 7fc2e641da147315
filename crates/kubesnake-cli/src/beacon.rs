//! E2E beacon sender.
//!
//! In e2e mode KubeSnake reads a beacon file written by the test harness and
//! POSTs it back to a collector, proving that a copy of the binary ran with
//! its embedded configuration.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::BeaconError;

/// Canonical beacon file location in e2e mode
pub const DEFAULT_BEACON_PATH: &str = "/var/run/kubesnake/beacon.json";

/// Upper bound on the whole exchange (DNS, connect, request, response)
pub const BEACON_TIMEOUT: Duration = Duration::from_secs(10);

/// POSTs beacon files to a collector URL.
#[derive(Debug, Clone)]
pub struct BeaconSender {
    client: reqwest::Client,
}

impl BeaconSender {
    /// Create a sender bounded by [`BEACON_TIMEOUT`].
    pub fn new() -> Result<Self, BeaconError> {
        Self::with_timeout(BEACON_TIMEOUT)
    }

    /// Create a sender with a custom total timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, BeaconError> {
        // Idempotent; a provider installed earlier wins.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Read the beacon at `beacon_path` and POST it to `url`.
    ///
    /// Anything but `200 OK` is an error.
    pub async fn send(&self, url: &Url, beacon_path: &Path) -> Result<(), BeaconError> {
        let beacon = tokio::fs::read(beacon_path)
            .await
            .map_err(|source| BeaconError::ReadBeacon {
                path: beacon_path.to_path_buf(),
                source,
            })?;

        debug!("posting {} byte beacon to {url}", beacon.len());

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(beacon)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BeaconError::Status(status));
        }

        info!("beacon sent to {url}");
        Ok(())
    }
}
