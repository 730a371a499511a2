//! Individual runtime bundling stages.
//!
//! Each function performs one step against an existing staging directory.
//! Sequencing, stage attribution and cleanup live in the parent module.

use crate::packager::{
    error::{Context, Error, ErrorExt, Result},
    settings::Settings,
    utils::{fs, tool::run_tool},
};
use std::path::{Path, PathBuf};

/// Suffix of bytecode files produced by the runtime's compiler.
pub const COMPILED_SUFFIX: &str = "$py.class";

/// Manifest location inside the bundle.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Compiles every `*.java` file of the native source directory into `staging`.
///
/// A missing directory or one without sources is an error: the bundle's
/// entry point lives there.
///
/// Returns the number of compiled source files.
pub async fn compile_native_sources(
    settings: &Settings,
    runtime_archive: &Path,
    staging: &Path,
) -> Result<usize> {
    let sources = native_sources(&settings.native_source_dir())?;

    log::info!("Compiling {} source files", sources.len());
    let level = &settings.runtime().compatibility_level;
    let mut args = vec![
        "-d".into(),
        staging.as_os_str().to_os_string(),
        "-target".into(),
        level.into(),
        "-source".into(),
        level.into(),
        "-cp".into(),
        runtime_archive.as_os_str().to_os_string(),
    ];
    args.extend(sources.iter().map(|p| p.as_os_str().to_os_string()));

    run_tool(&settings.tools().javac, args, settings.root()).await?;
    Ok(sources.len())
}

/// Lists `*.java` files directly inside `dir`, sorted.
fn native_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        crate::bail!("native source directory {} does not exist", dir.display());
    }
    let dir_str = dir
        .to_str()
        .with_context(|| format!("{} is not valid UTF-8", dir.display()))?;
    // the directory part is literal, only the file name is a pattern
    let pattern = format!(
        "{}{}*.java",
        glob::Pattern::escape(dir_str),
        std::path::MAIN_SEPARATOR
    );

    let mut sources = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::GenericError(e.to_string()))?;
        if path.is_file() {
            sources.push(path);
        }
    }
    if sources.is_empty() {
        crate::bail!("no native sources in {}", dir.display());
    }
    sources.sort();
    Ok(sources)
}

/// Extracts the full runtime archive into `staging`.
pub async fn extract_runtime(runtime_archive: &Path, staging: &Path) -> Result<()> {
    let archive_path = runtime_archive.to_path_buf();
    let staging = staging.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file =
            std::fs::File::open(&archive_path).fs_context("opening runtime archive", &archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        log::debug!(
            "Extracting {} entries from {}",
            archive.len(),
            archive_path.display()
        );
        archive.extract(&staging)?;
        Ok::<(), Error>(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Extraction task panicked: {}", e)))?
}

/// Returns `true` for compiled caches that must never be copied into a bundle.
pub fn is_compiled_cache(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name == "__pycache__"
        || name.ends_with(".pyc")
        || name.ends_with(".pyo")
        || name.ends_with(COMPILED_SUFFIX)
}

/// Project library location inside the staging tree, e.g. `Lib/robot`.
pub fn project_library_dir(settings: &Settings, staging: &Path) -> Result<PathBuf> {
    let package = settings
        .project()
        .source_dir
        .file_name()
        .with_context(|| {
            format!(
                "source_dir {} has no package name",
                settings.project().source_dir.display()
            )
        })?;
    Ok(staging.join(&settings.runtime().library_dir).join(package))
}

/// Copies the project's interpretable sources into the staging library
/// directory and drops fixture directories.
///
/// Returns the destination directory.
pub async fn merge_project_sources(settings: &Settings, staging: &Path) -> Result<PathBuf> {
    let dest = project_library_dir(settings, staging)?;
    let copied = fs::copy_dir_filtered(&settings.source_dir(), &dest, is_compiled_cache).await?;
    log::debug!("Copied {} project files to {}", copied, dest.display());

    for fixture in &settings.project().fixture_dirs {
        let fixture_path = dest.join(fixture);
        if fs::remove_dir_all(&fixture_path).await? {
            log::debug!("Removed fixture directory {}", fixture_path.display());
        }
    }

    Ok(dest)
}

/// Runs the runtime's bytecode compiler over `staging`, then prunes sources
/// that now have a compiled sibling, except those under `keep`.
///
/// Returns the number of removed source files.
pub async fn recompile_all(
    settings: &Settings,
    runtime_archive: &Path,
    staging: &Path,
    keep: &Path,
) -> Result<usize> {
    let args = [
        "-jar".into(),
        runtime_archive.as_os_str().to_os_string(),
        "-m".into(),
        "compileall".into(),
        staging.as_os_str().to_os_string(),
    ];
    run_tool::<_, std::ffi::OsString>(&settings.tools().java, args, settings.root()).await?;

    prune_compiled_sources(staging, keep).await
}

/// Deletes each `*.py` file under `root` that has a `*$py.class` sibling,
/// leaving everything under `keep` untouched.
pub async fn prune_compiled_sources(root: &Path, keep: &Path) -> Result<usize> {
    let root = root.to_path_buf();
    let keep = keep.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let mut removed = 0usize;
        let walker = walkdir::WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| entry.path() != keep.as_path());

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "py") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path
                .with_file_name(format!("{stem}{COMPILED_SUFFIX}"))
                .is_file()
            {
                std::fs::remove_file(path).fs_context("removing compiled source", path)?;
                removed += 1;
            }
        }
        log::debug!("Pruned {} compiled sources", removed);
        Ok::<usize, Error>(removed)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Prune task panicked: {}", e)))?
}

/// Renders the bundle manifest for `version`.
pub fn manifest_content(settings: &Settings, version: &str) -> String {
    format!(
        "Manifest-Version: 1.0\n\
         Main-Class: {}\n\
         Specification-Version: {}\n\
         Implementation-Version: {}\n",
        settings.project().main_class,
        settings.project().specification_version,
        version
    )
}

/// Overwrites the staging manifest.
pub async fn write_manifest(settings: &Settings, staging: &Path, version: &str) -> Result<()> {
    let manifest = staging.join(MANIFEST_PATH);
    if let Some(parent) = manifest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating manifest directory", parent)?;
    }
    tokio::fs::write(&manifest, manifest_content(settings, version))
        .await
        .fs_context("writing manifest", &manifest)
}

/// Packages `staging` into the versioned bundle in the dist directory.
///
/// A partially written archive is removed when the archiver fails.
pub async fn package(settings: &Settings, staging: &Path, version: &str) -> Result<PathBuf> {
    let dist = settings.dist_dir();
    tokio::fs::create_dir_all(&dist)
        .await
        .fs_context("creating output directory", &dist)?;

    let bundle = settings.bundle_path(version);
    let args = [
        "cvfM".into(),
        bundle.as_os_str().to_os_string(),
        ".".into(),
    ];

    if let Err(e) = run_tool::<_, std::ffi::OsString>(&settings.tools().jar, args, staging).await {
        if let Err(remove_err) = tokio::fs::remove_file(&bundle).await {
            log::debug!("Failed to remove partial {}: {}", bundle.display(), remove_err);
        }
        return Err(e);
    }

    Ok(bundle)
}
