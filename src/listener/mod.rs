//! Import event formatter used by acceptance tests.
//!
//! Receives library, resource and variable file import events and writes one
//! block per event:
//!
//! ```text
//! Imported Library
//! 	name: OperatingSystem
//! 	args: []
//! 	source: //OperatingSystem.py
//! ```
//!
//! Absolute paths are shortened so that the output does not depend on where
//! the project is checked out or whether a compiled module was imported.

use std::{collections::BTreeMap, fmt, io::Write};

/// Attribute value of an import event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Scalar text value.
    Text(String),
    /// List value, e.g. library arguments.
    List(Vec<String>),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

/// Kind of imported item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Test library
    Library,
    /// Resource file
    Resource,
    /// Variable file
    Variables,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportKind::Library => "Library",
            ImportKind::Resource => "Resource",
            ImportKind::Variables => "Variables",
        })
    }
}

/// Writes formatted import events to `W`.
pub struct ImportListener<W: Write> {
    out: W,
}

impl<W: Write> ImportListener<W> {
    /// Creates a listener writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Library import event.
    pub fn library_import(
        &mut self,
        name: &str,
        attrs: &BTreeMap<String, AttrValue>,
    ) -> std::io::Result<()> {
        self.imported(ImportKind::Library, name, attrs)
    }

    /// Resource import event.
    pub fn resource_import(
        &mut self,
        name: &str,
        attrs: &BTreeMap<String, AttrValue>,
    ) -> std::io::Result<()> {
        self.imported(ImportKind::Resource, name, attrs)
    }

    /// Variable file import event.
    pub fn variables_import(
        &mut self,
        name: &str,
        attrs: &BTreeMap<String, AttrValue>,
    ) -> std::io::Result<()> {
        self.imported(ImportKind::Variables, name, attrs)
    }

    fn imported(
        &mut self,
        kind: ImportKind,
        name: &str,
        attrs: &BTreeMap<String, AttrValue>,
    ) -> std::io::Result<()> {
        writeln!(self.out, "Imported {}", kind)?;
        writeln!(self.out, "\tname: {}", name)?;
        // BTreeMap iterates in sorted key order
        for (key, value) in attrs {
            writeln!(self.out, "\t{}: {}", key, pretty(value))?;
        }
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn close(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Formats an attribute value for output.
pub fn pretty(value: &AttrValue) -> String {
    match value {
        AttrValue::List(items) => format!("[{}]", items.join(", ")),
        AttrValue::Text(text) if is_absolute(text) => normalize_path(text),
        AttrValue::Text(text) => text.clone(),
    }
}

fn is_absolute(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes {
        [b'/' | b'\\', ..] => true,
        [drive, b':', b'/' | b'\\', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Shortens an absolute module path.
///
/// Compiled module names (`$py.class`, `.pyc`) map back to their `.py`
/// source. A package `__init__.py` is shown as its package directory,
/// anything else as its file name, both prefixed with `//`.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace("$py.class", ".py").replace(".pyc", ".py");
    let tokens: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|token| !token.is_empty())
        .collect();

    match tokens.split_last() {
        Some((&"__init__.py", dirs)) => format!("//{}", dirs.join("/")),
        Some((file, _)) => format!("//{}", file),
        None => "//".to_string(),
    }
}
