//! Standalone interpreter runtime bundled into jar distributions.

use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_URL_TEMPLATE: &str = "https://search.maven.org/remotecontent?filepath=org/python/jython-standalone/{version}/jython-standalone-{version}.jar";

/// Runtime archive identity, cache location and download source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Archive base name, e.g. `jython-standalone`.
    pub name: String,

    /// Runtime version, e.g. `2.5.3`.
    pub version: String,

    /// Download URL; every `{version}` is replaced with [`Self::version`].
    pub url_template: String,

    /// Local cache directory, relative to the project root.
    pub cache_dir: PathBuf,

    /// `-source`/`-target` level used when compiling native sources.
    pub compatibility_level: String,

    /// Library directory inside the runtime archive layout.
    pub library_dir: PathBuf,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            name: "jython-standalone".into(),
            version: "2.5.3".into(),
            url_template: DEFAULT_URL_TEMPLATE.into(),
            cache_dir: PathBuf::from("ext-lib"),
            compatibility_level: "1.5".into(),
            library_dir: PathBuf::from("Lib"),
        }
    }
}

impl RuntimeSettings {
    /// File name of the cached runtime archive.
    pub fn archive_name(&self) -> String {
        format!("{}-{}.jar", self.name, self.version)
    }

    /// Download URL for the configured version.
    pub fn download_url(&self) -> String {
        self.url_template.replace("{version}", &self.version)
    }
}
