//! Error types for embedding and loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for embed and load operations
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Configuration document errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document does not match the schema (bad JSON, unknown field, bad URL)
    #[error("config is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Bytes follow the first complete JSON value
    #[error("config is not valid JSON: trailing data")]
    TrailingData,
}

/// Errors raised while reading or writing an embedded payload
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Failed to open a file
    #[error("open {}: {source}", path.display())]
    Open {
        /// File that could not be opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O failure at a named step
    #[error("{step}: {source}")]
    Io {
        /// Step that failed (for example "read footer" or "replace executable")
        step: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Footer could not be encoded or decoded
    #[error("footer codec: {0}")]
    Footer(#[source] binrw::Error),

    /// Stored payload length is above the safety ceiling
    #[error("embedded config too large: {length} bytes (max {max})")]
    PayloadTooLarge {
        /// Length claimed by the footer
        length: u64,
        /// Maximum accepted length
        max: usize,
    },

    /// Footer claims more payload bytes than the file holds
    #[error("embedded config offset underflow: length {length} with file size {file_size}")]
    OffsetUnderflow {
        /// Length claimed by the footer
        length: u32,
        /// Size of the carrier file
        file_size: u64,
    },

    /// Stored checksum does not match the payload bytes
    #[error("embedded config checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the footer
        expected: u32,
        /// Checksum computed over the bytes read
        actual: u32,
    },

    /// Refused to embed an empty payload
    #[error("config is empty")]
    EmptyPayload,

    /// Refused to embed a payload above the safety ceiling
    #[error("config too large: {size} bytes (max {max})")]
    PayloadRejected {
        /// Size of the rejected payload
        size: usize,
        /// Maximum accepted size
        max: usize,
    },

    /// The base executable shrank while it was being copied
    #[error("copy executable bytes: expected {expected} bytes, copied {copied}")]
    ShortCopy {
        /// Bytes that should have been copied
        expected: u64,
        /// Bytes actually copied
        copied: u64,
    },

    /// Failed to read a standalone config file
    #[error("read config file {}: {source}", path.display())]
    ReadConfigFile {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A standalone config file failed validation
    #[error("invalid config in {}: {source}", path.display())]
    InvalidConfigFile {
        /// Config file path
        path: PathBuf,
        /// Validation failure
        #[source]
        source: ConfigError,
    },

    /// Embedded payload is not a valid configuration document
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Could not determine the path of the running executable
    #[error("resolve executable path: {0}")]
    SelfPath(#[source] std::io::Error),
}

impl EmbedError {
    pub(crate) fn io(step: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { step, source }
    }

    pub(crate) fn open(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Check if this error means the stored payload or footer is damaged
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::PayloadTooLarge { .. }
                | Self::OffsetUnderflow { .. }
                | Self::ChecksumMismatch { .. }
        )
    }

    /// Check if this error rejected caller input before touching any file
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyPayload
                | Self::PayloadRejected { .. }
                | Self::InvalidConfigFile { .. }
                | Self::Config(_)
        )
    }
}
