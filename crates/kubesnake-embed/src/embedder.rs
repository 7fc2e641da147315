//! Install a payload into a carrier file
//!
//! The target is never opened for writing. A staging file is created next
//! to it, filled with the base bytes, the payload and a fresh footer, synced,
//! and renamed over the target. Any payload installed earlier is stripped
//! first, so repeated installs do not stack.

use std::fs::{self, File, Permissions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{EmbedError, Result};
use crate::footer::{FOOTER_SIZE, Footer, MAX_PAYLOAD_SIZE, checksum, scan_footer};
use crate::self_path::resolve_self_path;

/// Size of the file with any installed payload and footer removed, plus the
/// file's permissions.
pub fn base_size_and_permissions(path: impl AsRef<Path>) -> Result<(u64, Permissions)> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(EmbedError::open(path))?;
    let metadata = file
        .metadata()
        .map_err(EmbedError::io("stat executable"))?;
    let size = metadata.len();
    let permissions = metadata.permissions();

    let Some(footer) = scan_footer(&mut file, size)? else {
        return Ok((size, permissions));
    };

    let base_size = size
        .checked_sub(FOOTER_SIZE as u64 + u64::from(footer.length))
        .ok_or(EmbedError::OffsetUnderflow {
            length: footer.length,
            file_size: size,
        })?;

    debug!(
        "{} carries a {} byte payload, base size {base_size}",
        path.display(),
        footer.length
    );
    Ok((base_size, permissions))
}

/// Embed `payload` into the file at `path`, replacing any earlier payload.
///
/// The payload must be 1..=[`MAX_PAYLOAD_SIZE`] bytes; anything else is
/// rejected before the filesystem is touched.
pub fn embed_payload(path: impl AsRef<Path>, payload: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let length = validate_payload(payload)?;

    let (base_size, permissions) = base_size_and_permissions(path)?;
    let source = File::open(path).map_err(EmbedError::open(path))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = format!(
        ".{}.tmp-",
        path.file_name().map_or_else(
            || "kubesnake".into(),
            |name| name.to_string_lossy()
        )
    );

    // Dropped (and removed) on any early return below.
    let mut staging = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(dir)
        .map_err(EmbedError::io("create temp file"))?;

    staging
        .as_file()
        .set_permissions(permissions.clone())
        .map_err(EmbedError::io("chmod temp executable"))?;

    let copied = io::copy(&mut source.take(base_size), &mut staging)
        .map_err(EmbedError::io("copy executable bytes"))?;
    if copied != base_size {
        return Err(EmbedError::ShortCopy {
            expected: base_size,
            copied,
        });
    }

    staging
        .write_all(payload)
        .map_err(EmbedError::io("write embedded config"))?;

    let footer = Footer::new(length, checksum(payload)).to_bytes()?;
    staging
        .write_all(&footer)
        .map_err(EmbedError::io("write footer"))?;

    staging
        .as_file()
        .sync_all()
        .map_err(EmbedError::io("sync temp executable"))?;

    // Close before the rename; write-back errors were already reported by
    // sync_all. The path is still removed if the rename fails.
    let (file, staged) = staging.into_parts();
    drop(file);
    staged
        .persist(path)
        .map_err(|err| EmbedError::Io {
            step: "replace executable",
            source: err.error,
        })?;

    // rename keeps the mode on POSIX filesystems, but not every filesystem
    // behaves.
    if let Err(err) = fs::set_permissions(path, permissions) {
        warn!(
            "could not re-apply permissions to {}: {err}",
            path.display()
        );
    }

    info!(
        "embedded {} byte config into {} (base {base_size} bytes)",
        payload.len(),
        path.display()
    );
    Ok(())
}

/// Validate the config file at `config_path` and embed its exact bytes into
/// `exe_path`.
pub fn embed_config_file(exe_path: impl AsRef<Path>, config_path: impl AsRef<Path>) -> Result<()> {
    let config_path = config_path.as_ref();
    let raw = fs::read(config_path).map_err(|source| EmbedError::ReadConfigFile {
        path: config_path.to_path_buf(),
        source,
    })?;

    Config::from_json_slice(&raw).map_err(|source| EmbedError::InvalidConfigFile {
        path: config_path.to_path_buf(),
        source,
    })?;

    embed_payload(exe_path, &raw)
}

/// Embed the config file at `config_path` into the running executable.
///
/// Returns the resolved path that was rewritten.
pub fn embed_config_file_into_self(config_path: impl AsRef<Path>) -> Result<PathBuf> {
    let exe_path = resolve_self_path()?;
    embed_config_file(&exe_path, config_path)?;
    Ok(exe_path)
}

fn validate_payload(payload: &[u8]) -> Result<u32> {
    if payload.is_empty() {
        return Err(EmbedError::EmptyPayload);
    }
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(EmbedError::PayloadRejected {
            size: payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    u32::try_from(payload.len()).map_err(|_| EmbedError::PayloadRejected {
        size: payload.len(),
        max: MAX_PAYLOAD_SIZE,
    })
}
