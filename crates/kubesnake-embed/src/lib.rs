//! Self-carrying configuration for KubeSnake executables
//!
//! KubeSnake stays a single portable binary as it propagates, so its
//! configuration travels inside the executable file itself. This crate
//! appends a checksummed payload plus a fixed-size footer to the tail of a
//! binary, recovers it from the binary's own bytes, and swaps in a new
//! payload without stacking old ones.
//!
//! ```text
//! [ base bytes ][ payload ][ footer: magic(16) | length(u32 LE) | crc32(u32 LE) ]
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kubesnake_embed::{embed_payload, load_embedded_config};
//!
//! embed_payload("./kubesnake", br#"{"e2e":{"beaconUrl":"http://beacon:8080"}}"#)?;
//!
//! if let Some(config) = load_embedded_config("./kubesnake")? {
//!     println!("beacon: {:?}", config.e2e_beacon_url());
//! }
//! # Ok::<(), kubesnake_embed::EmbedError>(())
//! ```
//!
//! A file without a footer is not an error: loading returns `Ok(None)`.
//! A footer that carries the magic but does not match its payload is.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod embedder;
pub mod error;
pub mod footer;
pub mod loader;
pub mod self_path;

pub use config::{Config, E2eConfig};
pub use embedder::{
    base_size_and_permissions, embed_config_file, embed_config_file_into_self, embed_payload,
};
pub use error::{ConfigError, EmbedError, Result};
pub use footer::{FOOTER_MAGIC, FOOTER_SIZE, Footer, MAX_PAYLOAD_SIZE, checksum, scan_footer};
pub use loader::{
    load_config_from_file, load_embedded_config, load_embedded_config_from_self, load_payload,
    load_payload_from_self, read_payload,
};
pub use self_path::resolve_self_path;
