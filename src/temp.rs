//! Temporary working directory for a run.
//!
//! The directory is created at startup, used as the working directory of every
//! spawned installer, and removed when the guard is dropped on any exit path.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{PkgError, Result};

/// Prefix of the per-run directory name
pub const WORKDIR_PREFIX: &str = "install_temp_";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path, so temp dirs are never created under the current working
/// directory (e.g. when TMPDIR=tmp).
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Owns the per-run temporary directory and removes it on drop
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// Create a fresh directory under [`temp_dir_base`]
    pub fn create() -> Result<Self> {
        Self::create_in(&temp_dir_base())
    }

    /// Create a fresh directory under `base`
    pub fn create_in(base: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(base)
            .map_err(|e| PkgError::TempDirFailed {
                reason: format!("{}: {e}", base.display()),
            })?;
        tracing::debug!(path = %dir.path().display(), "created working directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        tracing::debug!(path = %self.dir.path().display(), "removing working directory");
    }
}
