//! Core Settings struct and implementations.

use super::{ProjectSettings, RuntimeSettings, ToolSettings};
use std::path::{Path, PathBuf};

/// Main settings for packaging operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every path
/// accessor returns an absolute path resolved against the project root.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Project root directory.
    root: PathBuf,

    /// Project layout.
    project: ProjectSettings,

    /// Bundled runtime.
    runtime: RuntimeSettings,

    /// External program names.
    tools: ToolSettings,

    /// Host operating system (`std::env::consts::OS` naming).
    host_os: String,
}

impl Settings {
    /// Returns the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the project layout settings.
    pub fn project(&self) -> &ProjectSettings {
        &self.project
    }

    /// Returns the runtime settings.
    pub fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    /// Returns the external tool settings.
    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// Returns the host operating system name.
    pub fn host_os(&self) -> &str {
        &self.host_os
    }

    /// Output directory for artifacts.
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(&self.project.dist_dir)
    }

    /// Intermediate build directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.project.build_dir)
    }

    /// Interpretable source package.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.project.source_dir)
    }

    /// Native source directory.
    pub fn native_source_dir(&self) -> PathBuf {
        self.root.join(&self.project.native_source_dir)
    }

    /// Generated version module.
    pub fn version_file(&self) -> PathBuf {
        self.root.join(&self.project.version_file)
    }

    /// Runtime bundle staging directory.
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(&self.project.staging_dir)
    }

    /// Packaging toolchain entry script.
    pub fn setup_script(&self) -> PathBuf {
        self.root.join(&self.project.setup_script)
    }

    /// Installer bitmap.
    pub fn installer_bitmap(&self) -> PathBuf {
        self.root.join(&self.project.installer_bitmap)
    }

    /// Runtime archive cache directory.
    pub fn runtime_cache_dir(&self) -> PathBuf {
        self.root.join(&self.runtime.cache_dir)
    }

    /// Cached runtime archive path.
    pub fn runtime_archive(&self) -> PathBuf {
        self.runtime_cache_dir().join(self.runtime.archive_name())
    }

    /// Output path of the runtime bundle for `version`.
    pub fn bundle_path(&self, version: &str) -> PathBuf {
        self.dist_dir()
            .join(format!("{}-{}.jar", self.project.name, version))
    }

    /// Directories removed before toolchain builds.
    pub fn clean_targets(&self) -> Vec<PathBuf> {
        vec![self.dist_dir(), self.build_dir()]
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        root: PathBuf,
        project: ProjectSettings,
        runtime: RuntimeSettings,
        tools: ToolSettings,
        host_os: String,
    ) -> Self {
        Self {
            root,
            project,
            runtime,
            tools,
            host_os,
        }
    }
}
