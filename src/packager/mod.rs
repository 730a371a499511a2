//! Packaging components.
//!
//! This module holds everything that touches the workspace or runs external
//! tools:
//!
//! - [`clean`] - removal of prior build output
//! - [`archive`] - source archive and installer builds through the setup script
//! - [`runtime`] - standalone runtime bundle assembly
//! - [`settings`] - project layout, runtime and tool configuration
//! - [`checksum`] - artifact digests
//! - [`utils`] - filesystem, HTTP and subprocess helpers

pub mod archive;
pub mod checksum;
pub mod clean;
pub mod error;
pub mod runtime;
pub mod settings;
pub mod utils;

pub use archive::{ArchiveKind, BuildOutcome, InstallerPolicy};
pub use error::{Error, Result};
pub use runtime::BundleStage;
pub use settings::{
    ProjectSettings, ReleaseConfig, RuntimeSettings, Settings, SettingsBuilder, ToolSettings,
};
