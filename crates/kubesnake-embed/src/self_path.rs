//! Locate the running executable

use std::path::PathBuf;
use tracing::debug;

use crate::error::{EmbedError, Result};

/// Path of the running executable, with symlinks resolved.
///
/// Resolution is best-effort: if the path cannot be canonicalized the
/// unresolved path is returned. Nothing is cached between calls.
pub fn resolve_self_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(EmbedError::SelfPath)?;

    match std::fs::canonicalize(&exe_path) {
        Ok(real) => Ok(real),
        Err(err) => {
            debug!(
                "could not resolve symlinks for {}: {err}",
                exe_path.display()
            );
            Ok(exe_path)
        }
    }
}
