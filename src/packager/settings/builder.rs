//! Builder for constructing Settings.

use super::{ProjectSettings, ReleaseConfig, RuntimeSettings, Settings, ToolSettings};
use crate::packager::error::{Context, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use release_packager::packager::SettingsBuilder;
///
/// # fn example() -> release_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root(".")
///     .load_config()?
///     .build()?;
/// println!("artifacts go to {}", settings.dist_dir().display());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    root: Option<PathBuf>,
    project: ProjectSettings,
    runtime: RuntimeSettings,
    tools: ToolSettings,
    host_os: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Applies `release.toml` from the configured root, if present.
    pub fn load_config(self) -> Result<Self> {
        let root = self.root.clone().context("root is required")?;
        let config = ReleaseConfig::load(&root)?;
        Ok(self.config(config))
    }

    /// Replaces project, runtime and tool settings with `config`.
    pub fn config(mut self, config: ReleaseConfig) -> Self {
        self.project = config.project;
        self.runtime = config.runtime;
        self.tools = config.tools;
        self
    }

    /// Sets the project layout.
    ///
    /// Default: [`ProjectSettings::default`]
    pub fn project(mut self, project: ProjectSettings) -> Self {
        self.project = project;
        self
    }

    /// Sets the runtime settings.
    ///
    /// Default: [`RuntimeSettings::default`]
    pub fn runtime(mut self, runtime: RuntimeSettings) -> Self {
        self.runtime = runtime;
        self
    }

    /// Sets the external tool names.
    ///
    /// Default: [`ToolSettings::default`]
    pub fn tools(mut self, tools: ToolSettings) -> Self {
        self.tools = tools;
        self
    }

    /// Overrides the host operating system.
    ///
    /// Default: `std::env::consts::OS`
    pub fn host_os(mut self, os: impl Into<String>) -> Self {
        self.host_os = Some(os.into());
        self
    }

    /// Builds the settings, making the root absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or cannot be made absolute.
    pub fn build(self) -> Result<Settings> {
        let root = self.root.context("root is required")?;
        let root = root
            .absolutize()
            .fs_context("resolving project root", &root)?
            .into_owned();

        Ok(Settings::new(
            root,
            self.project,
            self.runtime,
            self.tools,
            self.host_os
                .unwrap_or_else(|| std::env::consts::OS.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_an_error() {
        let err = SettingsBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("root is required"));
    }

    #[test]
    fn paths_resolve_against_root() {
        let temp = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .root(temp.path())
            .host_os("windows")
            .build()
            .unwrap();

        assert_eq!(settings.dist_dir(), temp.path().join("dist"));
        assert_eq!(
            settings.version_file(),
            temp.path().join("src/robot/version.py")
        );
        assert_eq!(
            settings.runtime_archive(),
            temp.path().join("ext-lib/jython-standalone-2.5.3.jar")
        );
        assert_eq!(
            settings.bundle_path("2.8rc1"),
            temp.path().join("dist/robotframework-2.8rc1.jar")
        );
        assert_eq!(settings.host_os(), "windows");
    }

    #[test]
    fn load_config_applies_overrides() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("release.toml"),
            "[project]\nname = \"acme\"\ndist_dir = \"out\"\n",
        )
        .unwrap();

        let settings = SettingsBuilder::new()
            .root(temp.path())
            .load_config()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(settings.bundle_path("1.0"), temp.path().join("out/acme-1.0.jar"));
    }
}
