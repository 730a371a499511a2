//! HTTP utilities for downloading the bundled runtime.

use crate::packager::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads `url` into `dest`.
///
/// The body is streamed into a uniquely named sibling file which is renamed
/// into place once complete, so an interrupted transfer never leaves a
/// truncated file at `dest`.
pub async fn download_to(url: &str, dest: &Path) -> Result<u64> {
    let fetch_error = |reason: String| Error::Fetch {
        url: url.to_string(),
        reason,
    };

    let parsed = url::Url::parse(url).map_err(|e| fetch_error(e.to_string()))?;
    log::info!("Downloading {}", parsed);

    let mut response = reqwest::get(parsed)
        .await
        .map_err(|e| fetch_error(format!("Download failed: {}", e)))?
        .error_for_status()
        .map_err(|e| fetch_error(e.to_string()))?;

    let parent = dest
        .parent()
        .ok_or_else(|| fetch_error(format!("{} has no parent directory", dest.display())))?;
    let partial = parent.join(format!(".download-{}", uuid::Uuid::new_v4()));

    let written = async {
        let mut file = tokio::fs::File::create(&partial)
            .await
            .fs_context("creating download file", &partial)?;
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| fetch_error(format!("Failed to read response: {}", e)))?
        {
            file.write_all(&chunk)
                .await
                .fs_context("writing download file", &partial)?;
            written += chunk.len() as u64;
        }
        file.flush().await.fs_context("flushing download file", &partial)?;
        Ok::<u64, Error>(written)
    }
    .await;

    match written {
        Ok(written) => {
            tokio::fs::rename(&partial, dest)
                .await
                .fs_context("moving download into place", dest)?;
            log::debug!("Downloaded {} bytes to {}", written, dest.display());
            Ok(written)
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(e)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    fn leftovers(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn malformed_url_is_a_fetch_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = download_to("not a url", &temp.path().join("x.jar"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
        assert!(!temp.path().join("x.jar").exists());
    }

    #[tokio::test]
    async fn body_is_streamed_into_place() {
        let temp = tempfile::tempdir().unwrap();
        let base = serve_once("200 OK", b"PK runtime bytes").await;
        let dest = temp.path().join("runtime.jar");

        let written = download_to(&format!("{}/runtime.jar", base), &dest)
            .await
            .unwrap();

        assert_eq!(written, 16);
        assert_eq!(std::fs::read(&dest).unwrap(), b"PK runtime bytes");
        assert_eq!(leftovers(temp.path()), vec!["runtime.jar".to_string()]);
    }

    #[tokio::test]
    async fn error_status_leaves_nothing_behind() {
        let temp = tempfile::tempdir().unwrap();
        let base = serve_once("404 Not Found", b"missing").await;
        let url = format!("{}/runtime.jar", base);

        let err = download_to(&url, &temp.path().join("runtime.jar"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fetch { url: ref failed, .. } if *failed == url));
        assert!(leftovers(temp.path()).is_empty());
    }
}
