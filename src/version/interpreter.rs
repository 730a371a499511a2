//! Interpreter identity reported by the full version descriptor.

use crate::packager::utils::tool::ExternalTool;
use std::fmt;

/// Interpreter families distinguished by the version module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    /// JVM implementation
    Jython,
    /// .NET implementation
    IronPython,
    /// PyPy
    PyPy,
    /// CPython and anything unrecognised
    Python,
}

impl Interpreter {
    /// Detects the interpreter from `sys.platform` and `sys.version`.
    pub fn detect(platform: &str, version_banner: &str) -> Self {
        if platform.starts_with("java") {
            Interpreter::Jython
        } else if platform == "cli" {
            Interpreter::IronPython
        } else if version_banner.contains("PyPy") {
            Interpreter::PyPy
        } else {
            Interpreter::Python
        }
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interpreter::Jython => "Jython",
            Interpreter::IronPython => "IronPython",
            Interpreter::PyPy => "PyPy",
            Interpreter::Python => "Python",
        })
    }
}

/// `sys.platform` and `sys.version` of an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// `sys.platform`, e.g. `linux2` or `java1.7.0_80`
    pub platform: String,
    /// Full `sys.version` banner
    pub version_banner: String,
}

impl RuntimeInfo {
    /// Creates runtime information from raw values.
    pub fn new(platform: impl Into<String>, version_banner: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            version_banner: version_banner.into(),
        }
    }

    /// Interpreter family.
    pub fn interpreter(&self) -> Interpreter {
        Interpreter::detect(&self.platform, &self.version_banner)
    }

    /// Language version, the first token of the banner.
    pub fn language_version(&self) -> &str {
        self.version_banner.split_whitespace().next().unwrap_or("")
    }

    /// Asks `program` for its platform and version.
    pub async fn probe(program: &str) -> crate::packager::Result<Self> {
        let tool = ExternalTool::locate(program)?;
        let stdout = tool
            .output(["-c", "import sys; print(sys.platform); print(sys.version)"])
            .await?;

        let mut lines = stdout.lines();
        let platform = lines.next().unwrap_or_default().trim().to_string();
        let banner = lines.collect::<Vec<_>>().join(" ");
        Ok(Self::new(platform, banner.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_order() {
        assert_eq!(Interpreter::detect("java1.7.0", "2.5.3"), Interpreter::Jython);
        assert_eq!(Interpreter::detect("cli", "2.7.5"), Interpreter::IronPython);
        assert_eq!(
            Interpreter::detect("linux2", "2.7.13 (PyPy 5.8.0 with GCC 6.2.0)"),
            Interpreter::PyPy
        );
        assert_eq!(Interpreter::detect("darwin", "2.7.18 (default)"), Interpreter::Python);
    }

    #[test]
    fn language_version_is_first_token() {
        let info = RuntimeInfo::new("linux2", "2.7.18 (default, Apr 20 2020)");
        assert_eq!(info.language_version(), "2.7.18");
        assert_eq!(RuntimeInfo::new("linux", "").language_version(), "");
    }
}
