//! Optional `release.toml` overrides.

use super::{ProjectSettings, RuntimeSettings, ToolSettings};
use crate::packager::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::Path;

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Parsed `release.toml`.
///
/// Every table and key is optional; anything left out keeps its default.
///
/// ```toml
/// [project]
/// name = "robotframework"
///
/// [runtime]
/// version = "2.5.3"
///
/// [tools]
/// javac = "/opt/jdk/bin/javac"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// `[project]` table
    pub project: ProjectSettings,
    /// `[runtime]` table
    pub runtime: RuntimeSettings,
    /// `[tools]` table
    pub tools: ToolSettings,
}

impl ReleaseConfig {
    /// Loads `release.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).fs_context("reading config", &path)?;
        let config: Self = toml::from_str(&content)?;
        if !config.runtime.url_template.contains("{version}") {
            crate::bail!(
                "{}: runtime url_template must contain {{version}}",
                path.display()
            );
        }
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = ReleaseConfig::load(temp.path()).unwrap();
        assert_eq!(config.tools.javac, "javac");
        assert_eq!(config.project.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[runtime]\nversion = \"2.7.0\"\n\n[tools]\njar = \"/usr/bin/jar\"\n",
        )
        .unwrap();

        let config = ReleaseConfig::load(temp.path()).unwrap();
        assert_eq!(config.runtime.version, "2.7.0");
        assert_eq!(config.runtime.name, "jython-standalone");
        assert_eq!(config.tools.jar, "/usr/bin/jar");
        assert_eq!(config.tools.java, "java");
        assert_eq!(config.project.name, "robotframework");
    }

    #[test]
    fn url_template_needs_version_placeholder() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[runtime]\nurl_template = \"https://mirror.example/jython.jar\"\n",
        )
        .unwrap();

        let err = ReleaseConfig::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains("{version}"), "{err}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[tools]\nmaven = \"mvn\"\n").unwrap();

        let err = ReleaseConfig::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains("release.toml"));
    }
}
