//! Error types for packaging operations.
//!
//! Every failure of an external tool carries the tool name so the caller can
//! tell a missing executable apart from one that ran and returned non-zero.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the packaging components.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// External executable could not be located or spawned.
    #[error("`{tool}` was not found. Check that {tool} is available at the command line.")]
    ToolNotFound {
        /// Program name as configured
        tool: String,
    },

    /// External executable ran but reported failure.
    #[error("`{tool}` failed with exit code {}", display_code(.code))]
    ToolFailed {
        /// Program name as configured
        tool: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// Spawning a command failed for a reason other than a missing binary.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that could not be started
        command: String,
        /// Underlying error
        error: io::Error,
    },

    /// Runtime archive could not be downloaded.
    #[error("failed to download {url}: {reason}")]
    Fetch {
        /// Source URL
        url: String,
        /// Failure description
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// A runtime bundling stage failed.
    #[error("{stage} failed: {source}")]
    Bundle {
        /// Stage that failed
        stage: crate::packager::runtime::BundleStage,
        /// Underlying failure
        source: Box<Error>,
    },

    /// Runtime archive is not a valid zip archive.
    #[error("invalid runtime archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failed.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// Glob pattern was invalid.
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// Path was not under the expected prefix.
    #[error(transparent)]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Configuration file could not be parsed.
    #[error("invalid release.toml: {0}")]
    Config(#[from] toml::de::Error),

    /// Plain I/O error without path context.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
}

impl Error {
    /// Exit code the process should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Attaches filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error with the operation description and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Adds a message to errors and empty options.
pub trait Context<T> {
    /// Replaces the failure with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily computes the failure message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_exit_code_is_propagated() {
        let err = Error::ToolFailed {
            tool: "python".into(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("exit code 3"));
    }

    #[test]
    fn signal_termination_exits_with_one() {
        let err = Error::ToolFailed {
            tool: "jar".into(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("<signal>"));
    }

    #[test]
    fn not_found_names_the_tool() {
        let err = Error::ToolNotFound {
            tool: "javac".into(),
        };
        assert!(err.to_string().contains("javac"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.fs_context("removing", "/tmp/x").unwrap_err();
        assert!(err.to_string().starts_with("removing /tmp/x"));
    }
}
