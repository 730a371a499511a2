//! File system utilities for packaging.
//!
//! Provides idempotent directory operations and the filtered tree copy used
//! when merging project sources into a runtime bundle.

use crate::packager::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates `path` and its parents; with `erase`, an existing tree is removed first.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes `path` recursively; a missing path is not an error.
///
/// Returns `true` when something was removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Recursively copies a directory, skipping every entry for which `exclude`
/// returns `true` (excluded directories are not descended into).
///
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir_filtered<F>(from: &Path, to: &Path, exclude: F) -> Result<u64>
where
    F: Fn(&Path) -> bool + Send + 'static,
{
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;

        let mut copied = 0u64;
        let walker = walkdir::WalkDir::new(&from)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !exclude(entry.path()));

        for entry in walker {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", &dest_path)?;
                copied += 1;
            }
        }

        Ok::<u64, Error>(copied)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Lists the entries of `dir` sorted by path. A missing directory yields an empty list.
pub async fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::Fs {
                context: "reading directory",
                path: dir.to_path_buf(),
                error: e,
            });
        }
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading directory entry", dir)?
    {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
