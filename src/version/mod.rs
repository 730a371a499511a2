//! Version number and release tag resolution.
//!
//! A version number is either a dotted numeric version (`2.3`, `2.3.1`), the
//! development snapshot sentinel `trunk`, or `keep`. Every value except `keep`
//! produces a new [`VersionSpec`]; `keep` returns the one already stored in
//! the version module.
//!
//! Resolution itself never writes. The caller persists an
//! [`Resolution::Update`] with [`metadata::write`].

pub mod interpreter;
pub mod metadata;
mod template;

pub use interpreter::{Interpreter, RuntimeInfo};

use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;
use std::{path::PathBuf, sync::LazyLock};
use thiserror::Error;

/// Development snapshot sentinel.
pub const TRUNK: &str = "trunk";

/// Sentinel keeping the stored version.
pub const KEEP: &str = "keep";

/// Release tag of a final release.
pub const FINAL: &str = "final";

static NUMERIC_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+(\.\d+)?$").expect("version pattern is valid"));

static PRERELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(a|alpha|b|beta|rc)\d*$").expect("tag pattern is valid"));

/// Version resolution and metadata errors.
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version number matches none of the accepted forms.
    #[error("Invalid version number '{0}': expected a dotted number like 2.3 or 2.3.1, 'trunk' or 'keep'")]
    InvalidVersion(String),

    /// Release tag missing or matches none of the accepted forms.
    #[error("Invalid release tag {}: expected alpha, beta or rc (optionally numbered) or 'final'", display_tag(.0))]
    InvalidReleaseTag(Option<String>),

    /// Stored version module could not be read.
    #[error("Failed to read version module {}: {source}", .path.display())]
    Read {
        /// Version module path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Stored version module could not be written.
    #[error("Failed to write version module {}: {source}", .path.display())]
    Write {
        /// Version module path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Stored version module lacks a field.
    #[error("Version module {} has no {field} field", .path.display())]
    MalformedMetadata {
        /// Version module path
        path: PathBuf,
        /// Missing field
        field: &'static str,
    },

    /// Template rendering failed.
    #[error("Failed to render version module: {0}")]
    Render(#[from] handlebars::RenderError),
}

fn display_tag(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("'{tag}'"),
        None => "<missing>".to_string(),
    }
}

/// Accepted version number forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionNumber {
    /// Dotted numeric version.
    Numeric(String),
    /// Development snapshot, tagged with the current date.
    Trunk,
    /// Keep the stored version.
    Keep,
}

impl VersionNumber {
    /// Parses a version number argument.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        match value {
            TRUNK => Ok(VersionNumber::Trunk),
            KEEP => Ok(VersionNumber::Keep),
            v if NUMERIC_VERSION.is_match(v) => Ok(VersionNumber::Numeric(v.to_string())),
            other => Err(VersionError::InvalidVersion(other.to_string())),
        }
    }
}

/// Validates a release tag for a numeric version.
pub fn validate_release_tag(tag: Option<&str>) -> Result<&str, VersionError> {
    match tag {
        Some(tag) if tag == FINAL || PRERELEASE_TAG.is_match(tag) => Ok(tag),
        other => Err(VersionError::InvalidReleaseTag(other.map(str::to_string))),
    }
}

/// Version metadata stored in the generated version module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSpec {
    /// Version number, e.g. `2.1.13` or `trunk`
    pub version: String,
    /// Release tag, e.g. `final`, `rc2` or a `YYYYMMDD` date
    pub release: String,
    /// Generation time, `YYYYMMDD-HHMMSS`
    pub timestamp: String,
}

impl VersionSpec {
    /// Creates a spec stamped with `now`.
    pub fn new(version: impl Into<String>, release: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            version: version.into(),
            release: release.into(),
            timestamp: now.format("%Y%m%d-%H%M%S").to_string(),
        }
    }

    /// Version alone for final releases, otherwise `version<sep>release`.
    ///
    /// ```
    /// use release_packager::version::VersionSpec;
    ///
    /// let spec = VersionSpec {
    ///     version: "2.1.13".into(),
    ///     release: "alpha2".into(),
    ///     timestamp: "20091015-142301".into(),
    /// };
    /// assert_eq!(spec.version_string(" "), "2.1.13 alpha2");
    /// assert_eq!(spec.version_string(""), "2.1.13alpha2");
    /// ```
    pub fn version_string(&self, sep: &str) -> String {
        if self.release == FINAL {
            self.version.clone()
        } else {
            format!("{}{}{}", self.version, sep, self.release)
        }
    }

    /// Human readable descriptor: `<who> <version> (<interpreter> <lang version> on <platform>)`.
    pub fn full_version(&self, who: &str, runtime: &RuntimeInfo) -> String {
        format!(
            "{} {} ({} {} on {})",
            who,
            self.version_string(" "),
            runtime.interpreter(),
            runtime.language_version(),
            runtime.platform
        )
        .trim()
        .to_string()
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Stored metadata kept as is.
    Keep(VersionSpec),
    /// New metadata to persist.
    Update(VersionSpec),
}

impl Resolution {
    /// The resolved spec, whichever variant.
    pub fn spec(&self) -> &VersionSpec {
        match self {
            Resolution::Keep(spec) | Resolution::Update(spec) => spec,
        }
    }
}

/// Validates the arguments without touching the filesystem.
///
/// Returns `None` for `keep`, otherwise the spec to write.
pub fn compute(
    version_number: &str,
    release_tag: Option<&str>,
    now: DateTime<Local>,
) -> Result<Option<VersionSpec>, VersionError> {
    match VersionNumber::parse(version_number)? {
        VersionNumber::Keep => Ok(None),
        VersionNumber::Trunk => {
            if let Some(tag) = release_tag {
                log::debug!("Ignoring release tag '{}' for {}", tag, TRUNK);
            }
            let date = now.format("%Y%m%d").to_string();
            Ok(Some(VersionSpec::new(TRUNK, date, now)))
        }
        VersionNumber::Numeric(version) => {
            let release = validate_release_tag(release_tag)?;
            Ok(Some(VersionSpec::new(version, release, now)))
        }
    }
}

/// Resolves the version for this invocation.
///
/// `keep` reads the stored module at `version_file`; everything else is
/// computed from the arguments and stamped with `now`.
pub async fn resolve(
    version_number: &str,
    release_tag: Option<&str>,
    version_file: &std::path::Path,
    now: DateTime<Local>,
) -> Result<Resolution, VersionError> {
    match compute(version_number, release_tag, now)? {
        Some(spec) => Ok(Resolution::Update(spec)),
        None => Ok(Resolution::Keep(metadata::read(version_file).await?)),
    }
}
