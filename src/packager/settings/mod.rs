//! Configuration structures for packaging operations.
//!
//! Settings describe the project layout, the standalone runtime that gets
//! bundled into jar distributions, and the external tools that are invoked.
//! Defaults match the project layout; a `release.toml` at the project root
//! can override any of them.

mod builder;
mod config;
mod core;
mod project;
mod runtime;
mod tools;

pub use builder::SettingsBuilder;
pub use config::{CONFIG_FILE_NAME, ReleaseConfig};
pub use core::Settings;
pub use project::ProjectSettings;
pub use runtime::RuntimeSettings;
pub use tools::ToolSettings;
