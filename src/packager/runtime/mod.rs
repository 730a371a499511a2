//! Standalone runtime bundle creation.
//!
//! Merges a downloaded interpreter runtime archive with the project's own
//! sources and repackages everything into one self-contained jar.
//!
//! # Process
//!
//! 1. Acquire the runtime archive (cached under the runtime cache dir)
//! 2. Create a fresh staging tree
//! 3. Compile native sources into staging
//! 4. Extract the runtime archive into staging
//! 5. Merge project sources into the runtime library directory
//! 6. Recompile everything with the runtime's bytecode compiler
//! 7. Rewrite the manifest
//! 8. Package staging into `dist/<name>-<version>.jar`
//! 9. Remove the staging tree (on every exit path)

mod acquire;
mod stages;
mod staging;

pub use acquire::acquire_runtime;
pub use stages::{COMPILED_SUFFIX, MANIFEST_PATH, is_compiled_cache, manifest_content};
pub use staging::StagingTree;

use crate::cli::OutputManager;
use crate::packager::{error::Error, error::Result, settings::Settings};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Bundling stage, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleStage {
    /// Locate or download the runtime archive.
    AcquireRuntime,
    /// Destroy and recreate the staging tree.
    CreateStaging,
    /// Compile native sources.
    CompileNativeSources,
    /// Unpack the runtime archive.
    ExtractRuntime,
    /// Copy project sources.
    MergeProjectSources,
    /// Run the runtime's bytecode compiler.
    RecompileAll,
    /// Overwrite the manifest.
    WriteManifest,
    /// Create the output archive.
    Package,
}

impl BundleStage {
    /// User-facing hint printed when this stage fails.
    pub fn failure_hint(self) -> &'static str {
        match self {
            BundleStage::AcquireRuntime => "Unable to obtain the runtime archive!",
            BundleStage::CompileNativeSources | BundleStage::RecompileAll => {
                "Unable to compile java classes!"
            }
            BundleStage::Package => "Unable to create jar!",
            BundleStage::CreateStaging
            | BundleStage::ExtractRuntime
            | BundleStage::MergeProjectSources
            | BundleStage::WriteManifest => "Unable to assemble the jar contents!",
        }
    }
}

impl fmt::Display for BundleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BundleStage::AcquireRuntime => "acquiring runtime",
            BundleStage::CreateStaging => "creating staging directory",
            BundleStage::CompileNativeSources => "compiling native sources",
            BundleStage::ExtractRuntime => "extracting runtime",
            BundleStage::MergeProjectSources => "merging project sources",
            BundleStage::RecompileAll => "recompiling sources",
            BundleStage::WriteManifest => "writing manifest",
            BundleStage::Package => "packaging",
        };
        f.write_str(name)
    }
}

trait StageExt<T> {
    fn stage(self, stage: BundleStage) -> Result<T>;
}

impl<T> StageExt<T> for Result<T> {
    fn stage(self, stage: BundleStage) -> Result<T> {
        self.map_err(|e| Error::Bundle {
            stage,
            source: Box::new(e),
        })
    }
}

/// Builds the runtime bundle for `version` and returns its path.
///
/// The staging tree is removed whether or not a stage fails; on failure no
/// archive is left in the dist directory.
pub async fn bundle(settings: &Settings, version: &str, output: &OutputManager) -> Result<PathBuf> {
    let runtime_archive = acquire_runtime(settings, output)
        .await
        .stage(BundleStage::AcquireRuntime)?;
    output.progress(&format!("Using runtime {}", runtime_archive.display()))?;

    let staging = StagingTree::create(&settings.staging_dir())
        .await
        .stage(BundleStage::CreateStaging)?;
    let staging_path = staging.path().to_path_buf();

    let result = assemble(settings, &runtime_archive, &staging_path, version).await;
    let bundle = settle(result, staging.remove().await, &staging_path)?;

    output.success(&format!(
        "Created {} based on {}",
        bundle.display(),
        runtime_archive.display()
    ))?;
    Ok(bundle)
}

/// Combines the assembly result with the staging cleanup result.
///
/// A cleanup failure never replaces the assembly outcome: a built bundle is
/// kept and the leftover staging tree is only reported.
fn settle(result: Result<PathBuf>, cleanup: Result<()>, staging: &Path) -> Result<PathBuf> {
    if let Err(e) = cleanup {
        log::warn!(
            "Failed to remove staging directory {}: {}",
            staging.display(),
            e
        );
    }
    result
}

/// Runs stages 3 to 8 against an existing staging tree.
async fn assemble(
    settings: &Settings,
    runtime_archive: &Path,
    staging: &Path,
    version: &str,
) -> Result<PathBuf> {
    stages::compile_native_sources(settings, runtime_archive, staging)
        .await
        .stage(BundleStage::CompileNativeSources)?;

    stages::extract_runtime(runtime_archive, staging)
        .await
        .stage(BundleStage::ExtractRuntime)?;

    let project_lib = stages::merge_project_sources(settings, staging)
        .await
        .stage(BundleStage::MergeProjectSources)?;

    let pruned = stages::recompile_all(settings, runtime_archive, staging, &project_lib)
        .await
        .stage(BundleStage::RecompileAll)?;
    log::debug!("Removed {} runtime sources with compiled counterparts", pruned);

    stages::write_manifest(settings, staging, version)
        .await
        .stage(BundleStage::WriteManifest)?;

    stages::package(settings, staging, version)
        .await
        .stage(BundleStage::Package)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::packager::{SettingsBuilder, ToolSettings};
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn write_runtime_archive(settings: &Settings) {
        std::fs::create_dir_all(settings.runtime_cache_dir()).unwrap();
        let file = std::fs::File::create(settings.runtime_archive()).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
        zip.write_all(b"Manifest-Version: 1.0\n").unwrap();
        zip.start_file("Lib/os.py", options).unwrap();
        zip.write_all(b"# os\n").unwrap();
        zip.finish().unwrap();
    }

    fn write_project(settings: &Settings) {
        let src = settings.source_dir();
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("__init__.py"), "").unwrap();
        std::fs::create_dir_all(settings.native_source_dir()).unwrap();
        std::fs::write(settings.native_source_dir().join("RobotFramework.java"), "").unwrap();
    }

    fn script(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn settings(root: &Path, tools: ToolSettings) -> Settings {
        let settings = SettingsBuilder::new().root(root).tools(tools).build().unwrap();
        write_runtime_archive(&settings);
        write_project(&settings);
        settings
    }

    #[tokio::test]
    async fn recompile_failure_cleans_up() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(
            temp.path(),
            ToolSettings {
                javac: "true".into(),
                java: "false".into(),
                jar: "true".into(),
                ..Default::default()
            },
        );

        let err = bundle(&settings, "2.8", &OutputManager::new(false, true))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Bundle {
                stage: BundleStage::RecompileAll,
                ..
            }
        ));
        assert!(!settings.staging_dir().exists());
        assert!(!settings.bundle_path("2.8").exists());
    }

    #[tokio::test]
    async fn missing_compiler_is_reported_as_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(
            temp.path(),
            ToolSettings {
                javac: "no-such-javac-4711".into(),
                ..Default::default()
            },
        );

        let err = bundle(&settings, "2.8", &OutputManager::new(false, true))
            .await
            .unwrap_err();

        match err {
            Error::Bundle { stage, source } => {
                assert_eq!(stage, BundleStage::CompileNativeSources);
                assert!(matches!(*source, Error::ToolNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!settings.staging_dir().exists());
    }

    fn assert_compile_failure(err: Error) {
        match err {
            Error::Bundle { stage, source } => {
                assert_eq!(stage, BundleStage::CompileNativeSources);
                assert!(
                    matches!(*source, Error::ToolFailed { ref tool, code: Some(1) } if tool == "false"),
                    "{source}"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn failing_compiler_aborts_bundle() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(
            temp.path(),
            ToolSettings {
                javac: "false".into(),
                java: "true".into(),
                jar: "true".into(),
                ..Default::default()
            },
        );

        let err = bundle(&settings, "2.8", &OutputManager::new(false, true))
            .await
            .unwrap_err();

        assert_compile_failure(err);
        assert!(!settings.staging_dir().exists());
        assert!(!settings.bundle_path("2.8").exists());
    }

    #[tokio::test]
    async fn native_sources_found_under_pattern_characters_in_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("proj[1]");
        std::fs::create_dir_all(&root).unwrap();
        let settings = settings(
            &root,
            ToolSettings {
                javac: "false".into(),
                java: "true".into(),
                jar: "true".into(),
                ..Default::default()
            },
        );

        let err = bundle(&settings, "2.8", &OutputManager::new(false, true))
            .await
            .unwrap_err();

        assert_compile_failure(err);
        assert!(!settings.bundle_path("2.8").exists());
    }

    #[tokio::test]
    async fn missing_native_sources_abort_bundle() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(
            temp.path(),
            ToolSettings {
                javac: "true".into(),
                java: "true".into(),
                jar: "true".into(),
                ..Default::default()
            },
        );
        std::fs::remove_dir_all(settings.native_source_dir()).unwrap();

        let err = bundle(&settings, "2.8", &OutputManager::new(false, true))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Bundle {
                stage: BundleStage::CompileNativeSources,
                ..
            }
        ));
        assert!(err.to_string().contains("does not exist"), "{err}");
        assert!(!settings.staging_dir().exists());
        assert!(!settings.bundle_path("2.8").exists());
    }

    #[test]
    fn cleanup_failure_keeps_built_bundle() {
        let bundle = PathBuf::from("dist/robotframework-2.8.jar");
        let cleanup = Err(Error::GenericError("permission denied".into()));

        let kept = settle(Ok(bundle.clone()), cleanup, Path::new("tmp-jar-dir")).unwrap();
        assert_eq!(kept, bundle);

        let err = settle(
            Err(Error::ToolFailed {
                tool: "jar".into(),
                code: Some(2),
            }),
            Err(Error::GenericError("busy".into())),
            Path::new("tmp-jar-dir"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { code: Some(2), .. }));
    }

    #[tokio::test]
    async fn successful_bundle_writes_manifest_and_archive() {
        let temp = tempfile::tempdir().unwrap();
        let tools_dir = temp.path().join("tools");
        std::fs::create_dir_all(&tools_dir).unwrap();

        // compileall stand-in: produce a compiled sibling for every source
        let java = script(
            &tools_dir,
            "java",
            r#"find "$5" -name '*.py' | while read f; do touch "${f%.py}\$py.class"; done"#,
        );
        // archiver stand-in: record the manifest and the staged project source
        let jar = script(
            &tools_dir,
            "jar",
            r#"cat META-INF/MANIFEST.MF > "$2" && test -f Lib/robot/__init__.py && test ! -f Lib/os.py"#,
        );

        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).unwrap();
        let settings = settings(
            &root,
            ToolSettings {
                javac: "true".into(),
                java,
                jar,
                ..Default::default()
            },
        );

        let path = bundle(&settings, "2.8rc1", &OutputManager::new(false, true))
            .await
            .unwrap();

        assert_eq!(path, settings.bundle_path("2.8rc1"));
        let manifest = std::fs::read_to_string(&path).unwrap();
        assert!(manifest.contains("Implementation-Version: 2.8rc1"));
        assert!(manifest.contains("Main-Class: org.robotframework.RobotFramework"));
        assert!(!settings.staging_dir().exists());
    }

    #[tokio::test]
    async fn packaging_failure_leaves_no_archive() {
        let temp = tempfile::tempdir().unwrap();
        let tools_dir = temp.path().join("tools");
        std::fs::create_dir_all(&tools_dir).unwrap();
        let jar = script(&tools_dir, "jar", r#"echo partial > "$2"; exit 2"#);

        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).unwrap();
        let settings = settings(
            &root,
            ToolSettings {
                javac: "true".into(),
                java: "true".into(),
                jar,
                ..Default::default()
            },
        );

        let err = bundle(&settings, "2.8", &OutputManager::new(false, true))
            .await
            .unwrap_err();

        match err {
            Error::Bundle { stage, source } => {
                assert_eq!(stage, BundleStage::Package);
                assert!(matches!(*source, Error::ToolFailed { code: Some(2), .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!settings.bundle_path("2.8").exists());
        assert!(!settings.staging_dir().exists());
    }
}
