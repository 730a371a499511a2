//! Runtime archive lookup and download.

use crate::cli::OutputManager;
use crate::packager::{
    error::{ErrorExt, Result},
    settings::Settings,
    utils::http,
};
use std::path::PathBuf;

/// Returns the cached runtime archive, downloading it first when absent.
pub async fn acquire_runtime(settings: &Settings, output: &OutputManager) -> Result<PathBuf> {
    let archive = settings.runtime_archive();
    if archive.is_file() {
        log::debug!("Using cached runtime {}", archive.display());
        return Ok(archive);
    }

    let cache_dir = settings.runtime_cache_dir();
    tokio::fs::create_dir_all(&cache_dir)
        .await
        .fs_context("creating runtime cache directory", &cache_dir)?;

    let url = settings.runtime().download_url();
    output.progress(&format!(
        "{} not found, going to download from {}",
        settings.runtime().archive_name(),
        url
    ))?;
    http::download_to(&url, &archive).await?;

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::{RuntimeSettings, SettingsBuilder, error::Error};

    #[tokio::test]
    async fn cached_archive_is_reused() {
        let temp = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new().root(temp.path()).build().unwrap();
        std::fs::create_dir_all(settings.runtime_cache_dir()).unwrap();
        std::fs::write(settings.runtime_archive(), "jar").unwrap();

        let path = acquire_runtime(&settings, &OutputManager::new(false, true))
            .await
            .unwrap();
        assert_eq!(path, settings.runtime_archive());
    }

    #[tokio::test]
    async fn missing_archive_is_downloaded_into_cache() {
        let temp = tempfile::tempdir().unwrap();
        let base = crate::packager::utils::http::test_server::serve_once("200 OK", b"jar bytes").await;
        let settings = SettingsBuilder::new()
            .root(temp.path())
            .runtime(RuntimeSettings {
                url_template: format!("{}/jython-standalone-{{version}}.jar", base),
                ..Default::default()
            })
            .build()
            .unwrap();

        let path = acquire_runtime(&settings, &OutputManager::new(false, true))
            .await
            .unwrap();

        assert_eq!(path, settings.runtime_archive());
        assert_eq!(std::fs::read(&path).unwrap(), b"jar bytes");
        let cached: Vec<_> = std::fs::read_dir(settings.runtime_cache_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(cached.len(), 1, "{cached:?}");
    }

    #[tokio::test]
    async fn unreachable_source_is_fetch_error() {
        let temp = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .root(temp.path())
            .runtime(RuntimeSettings {
                url_template: "http://127.0.0.1:9/runtime-{version}.jar".into(),
                ..Default::default()
            })
            .build()
            .unwrap();

        let err = acquire_runtime(&settings, &OutputManager::new(false, true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { ref url, .. } if url.ends_with("runtime-2.5.3.jar")));
        assert!(!settings.runtime_archive().exists());
        // the cache directory is created, but holds no partial download
        assert_eq!(std::fs::read_dir(settings.runtime_cache_dir()).unwrap().count(), 0);
    }
}
