//! Scoped staging directory for runtime bundles.

use crate::packager::{error::Result, utils::fs};
use std::path::{Path, PathBuf};

/// Ephemeral directory assembled into a runtime bundle.
///
/// Any directory already at the path (for example one left behind by an
/// interrupted run) is destroyed on creation. The tree is removed by
/// [`StagingTree::remove`] on the normal path; if the value is dropped
/// without that call the directory is removed synchronously in `Drop`.
#[derive(Debug)]
pub struct StagingTree {
    path: PathBuf,
    removed: bool,
}

impl StagingTree {
    /// Destroys and recreates the staging directory at `path`.
    pub async fn create(path: &Path) -> Result<Self> {
        fs::create_dir_all(path, true).await?;
        log::debug!("Created staging directory {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            removed: false,
        })
    }

    /// Staging directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the staging directory.
    pub async fn remove(mut self) -> Result<()> {
        self.removed = true;
        fs::remove_dir_all(&self.path).await?;
        log::debug!("Removed staging directory {}", self.path.display());
        Ok(())
    }
}

impl Drop for StagingTree {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!(
                        "Failed to remove staging directory {}: {}",
                        self.path.display(),
                        e
                    );
                }
            }
        }
    }
}
