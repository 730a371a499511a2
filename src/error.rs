//! Top-level error type for release commands.
//!
//! Wraps the component errors and decides how each is reported: argument
//! problems are usage errors, packaging failures carry the tool's exit code.

use crate::{packager, version::VersionError};
use thiserror::Error;

/// Result type alias for release commands
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit code for usage and validation errors.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Main error type for all release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// Version resolution errors
    #[error("{0}")]
    Version(#[from] VersionError),

    /// Packaging errors
    #[error("{0}")]
    Packaging(#[from] packager::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Arguments rejected by the parser
    #[error("{reason}")]
    Usage {
        /// Parser message
        reason: String,
    },

    /// Command could not proceed
    #[error("Command execution failed: {reason}")]
    ExecutionFailed {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Whether the usage text should accompany this error.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ReleaseError::Cli(CliError::Usage { .. })
                | ReleaseError::Version(
                    VersionError::InvalidVersion(_) | VersionError::InvalidReleaseTag(_)
                )
        )
    }

    /// Exit code the process should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            e if e.is_usage_error() => USAGE_EXIT_CODE,
            ReleaseError::Packaging(e) => e.exit_code(),
            _ => 1,
        }
    }

    /// Extra lines printed before the error itself.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ReleaseError::Packaging(packager::Error::Bundle { stage, .. }) => {
                Some(stage.failure_hint())
            }
            _ => None,
        }
    }
}
