//! Release packaging for a Python project with a Java runtime bundle.
//!
//! This library provides the pieces behind the `release-packager` binary:
//! - version metadata resolution and the generated version module
//! - workspace cleanup, source archives and Windows installers
//! - a standalone jar bundling the project with its runtime
//! - an import event formatter used by acceptance tests
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod listener;
pub mod packager;
pub mod version;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
