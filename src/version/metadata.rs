//! Rendering and parsing of the generated version module.

use super::{VersionError, VersionSpec, template::VERSION_MODULE_TEMPLATE};
use handlebars::Handlebars;
use regex::Regex;
use std::{path::Path, sync::LazyLock};

static FIELD_PATTERNS: LazyLock<[(&'static str, Regex); 3]> = LazyLock::new(|| {
    ["VERSION", "RELEASE", "TIMESTAMP"].map(|field| {
        let pattern = format!(r"(?m)^{field} = '([^'\n]*)'[ \t\r]*$");
        (field, Regex::new(&pattern).expect("field pattern is valid"))
    })
});

/// Renders the version module for `spec`.
pub fn render(spec: &VersionSpec) -> Result<String, VersionError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    Ok(handlebars.render_template(VERSION_MODULE_TEMPLATE, spec)?)
}

/// Extracts `VERSION`, `RELEASE` and `TIMESTAMP` from module source.
pub fn parse(source: &str, path: &Path) -> Result<VersionSpec, VersionError> {
    let [version, release, timestamp] = FIELD_PATTERNS.each_ref().map(|(field, regex)| {
        regex
            .captures(source)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| VersionError::MalformedMetadata {
                path: path.to_path_buf(),
                field: *field,
            })
    });

    Ok(VersionSpec {
        version: version?,
        release: release?,
        timestamp: timestamp?,
    })
}

/// Reads the stored version module at `path`.
pub async fn read(path: &Path) -> Result<VersionSpec, VersionError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| VersionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse(&source, path)
}

/// Overwrites the version module at `path` with `spec`.
pub async fn write(path: &Path, spec: &VersionSpec) -> Result<(), VersionError> {
    let content = render(spec)?;
    tokio::fs::write(path, content)
        .await
        .map_err(|source| VersionError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("Wrote version module {}", path.display());
    Ok(())
}
