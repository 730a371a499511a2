//! Command line interface for release packaging.
//!
//! Parses arguments, builds [`Settings`](crate::packager::Settings) for the
//! selected root, runs the command and turns failures into exit codes.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::{BuildCommand, Step};
pub use output::OutputManager;

use crate::error::{CliError, ReleaseError, Result, USAGE_EXIT_CODE};
use crate::packager::SettingsBuilder;
use clap::error::ErrorKind;
use std::ffi::OsString;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    run_with_args(std::env::args_os()).await
}

/// Runs with explicit arguments; the first item is the program name.
pub async fn run_with_args<I, T>(argv: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_args(argv) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(0);
        }
        Err(e) => {
            let err = ReleaseError::from(CliError::Usage {
                reason: e.render().to_string().trim_end().to_string(),
            });
            return report(&err, &OutputManager::new(false, false));
        }
    };

    let output = OutputManager::new(args.verbose, args.quiet);
    log::debug!("{:?}", args);

    let settings = SettingsBuilder::new()
        .root(&args.root)
        .load_config()
        .and_then(|builder| builder.build());
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => return report(&e.into(), &output),
    };

    match commands::execute(
        args.command,
        &args.version_number,
        args.release_tag.as_deref(),
        &settings,
        &output,
        chrono::Local::now(),
    )
    .await
    {
        Ok(_) => Ok(0),
        Err(e) => report(&e, &output),
    }
}

/// Prints `err` the way its kind requires and returns the exit code.
fn report(err: &ReleaseError, output: &OutputManager) -> Result<i32> {
    if let Some(hint) = err.hint() {
        output.error(hint)?;
    }
    output.error(&err.to_string())?;

    if err.is_usage_error() {
        output.println("")?;
        output.println(&Args::usage())?;
        return Ok(USAGE_EXIT_CODE);
    }

    Ok(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_command_is_usage_error() {
        let code = run_with_args(["release-packager", "bdist", "2.0"]).await.unwrap();
        assert_eq!(code, USAGE_EXIT_CODE);
    }

    #[tokio::test]
    async fn invalid_version_touches_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_string_lossy().into_owned();
        let code = run_with_args(["release-packager", "--root", &root, "sdist", "2.x", "final"])
            .await
            .unwrap();
        assert_eq!(code, USAGE_EXIT_CODE);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
