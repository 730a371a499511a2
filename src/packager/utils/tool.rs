//! External tool resolution and invocation.
//!
//! Every collaborator (packaging toolchain, compilers, archiver) is run as a
//! blocking subprocess whose exit status is the only success signal. A tool
//! that cannot be located is reported as [`Error::ToolNotFound`], one that ran
//! and failed as [`Error::ToolFailed`].

use crate::packager::error::{Error, Result};
use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

/// A resolved external executable.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    name: String,
    path: PathBuf,
}

impl ExternalTool {
    /// Locates `program` through `PATH` (or directly, when it is a path).
    pub fn locate(program: &str) -> Result<Self> {
        match which::which(program) {
            Ok(path) => {
                log::debug!("Found {} at: {}", program, path.display());
                Ok(Self {
                    name: program.to_string(),
                    path,
                })
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", program, e);
                Err(Error::ToolNotFound {
                    tool: program.to_string(),
                })
            }
        }
    }

    /// Runs the tool to completion, inheriting stdio.
    pub async fn run<I, S>(&self, args: I, cwd: &Path) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .collect();
        log::debug!(
            "Running {} {}",
            self.path.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let status = tokio::process::Command::new(&self.path)
            .args(&args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            log::debug!("{} exited with {:?}", self.name, status.code());
            return Err(Error::ToolFailed {
                tool: self.name.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }

    /// Runs the tool and returns its captured stdout.
    pub async fn output<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = tokio::process::Command::new(&self.path)
            .args(args)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            log::debug!(
                "{} failed: {}",
                self.name,
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(Error::ToolFailed {
                tool: self.name.clone(),
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn spawn_error(&self, error: io::Error) -> Error {
        if error.kind() == io::ErrorKind::NotFound {
            Error::ToolNotFound {
                tool: self.name.clone(),
            }
        } else {
            Error::CommandFailed {
                command: self.name.clone(),
                error,
            }
        }
    }
}

/// Locates and runs `program` in one step.
pub async fn run_tool<I, S>(program: &str, args: I, cwd: &Path) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ExternalTool::locate(program)?.run(args, cwd).await
}
