//! Workspace cleanup before toolchain builds.

use crate::packager::{error::Result, utils::fs};
use std::path::PathBuf;

/// Recursively removes every existing path in `paths`.
///
/// Absent paths are skipped; any other I/O failure aborts the cleanup.
pub async fn clean(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        if fs::remove_dir_all(path).await? {
            log::debug!("Removed {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_existing_and_skips_missing() {
        let temp = tempfile::tempdir().unwrap();
        let dist = temp.path().join("dist");
        let build = temp.path().join("build");
        std::fs::create_dir_all(dist.join("nested")).unwrap();
        std::fs::write(dist.join("nested/old.tar.gz"), "x").unwrap();

        clean(&[dist.clone(), build.clone()]).await.unwrap();
        assert!(!dist.exists());
        assert!(!build.exists());

        // second run is a no-op
        clean(&[dist, build]).await.unwrap();
    }
}
