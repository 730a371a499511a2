//! Final artifact listing.

use crate::cli::OutputManager;
use crate::packager::{Result, Settings, checksum::calculate_sha256, utils::fs::list_dir};
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Prints `Created:` followed by the absolute path of every dist entry.
///
/// Returns the listed paths in the printed order.
pub async fn announce(settings: &Settings, output: &OutputManager) -> Result<Vec<PathBuf>> {
    let entries = list_dir(&settings.dist_dir()).await?;
    output.println("Created:")?;

    let mut created = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = entry.absolutize()?.into_owned();
        output.println(&path.display().to_string())?;

        if path.is_file() {
            let digest = calculate_sha256(&path).await?;
            log::debug!("sha256 {}  {}", digest, path.display());
            output.verbose(&format!("  sha256: {}", digest))?;
        }
        created.push(path);
    }

    Ok(created)
}
