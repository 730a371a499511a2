//! Release commands and the step table driving them.
//!
//! Each [`BuildCommand`] maps to a fixed, ordered list of [`Step`]s. The
//! version step always runs first so that invalid arguments are rejected
//! before anything in the workspace changes.

mod announce;

pub use announce::announce;

use crate::cli::OutputManager;
use crate::error::{CliError, Result};
use crate::packager::{self, ArchiveKind, BuildOutcome, Settings, clean};
use crate::version::{self, Resolution, RuntimeInfo, VersionSpec, metadata};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::path::PathBuf;

/// Command selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildCommand {
    /// Create source distribution
    Sdist,
    /// Create Windows installer
    Wininst,
    /// Create both packages
    All,
    /// Update only version information
    Version,
    /// Create stand-alone jar containing the project and its runtime
    Jar,
}

/// One unit of work in a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Resolve and persist version metadata.
    Version,
    /// Remove prior build output.
    Clean,
    /// Build the source distribution.
    SourceArchive,
    /// Build the Windows installer.
    Installer,
    /// Assemble the standalone runtime bundle.
    RuntimeBundle,
    /// List the created artifacts.
    Announce,
}

impl BuildCommand {
    /// Steps run by this command, in order.
    pub fn steps(self) -> &'static [Step] {
        use Step::*;
        match self {
            BuildCommand::Sdist => &[Version, Clean, SourceArchive, Announce],
            BuildCommand::Wininst => &[Version, Clean, Installer, Announce],
            BuildCommand::All => &[Version, Clean, SourceArchive, Installer, Announce],
            BuildCommand::Version => &[Version],
            BuildCommand::Jar => &[Version, RuntimeBundle, Announce],
        }
    }
}

/// Runs `command` against `settings`.
///
/// Returns the announced artifacts; empty when the command announces
/// nothing or every build step was skipped.
pub async fn execute(
    command: BuildCommand,
    version_number: &str,
    release_tag: Option<&str>,
    settings: &Settings,
    output: &OutputManager,
    now: DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    let mut spec: Option<VersionSpec> = None;
    let mut produced = false;
    let mut created = Vec::new();

    for step in command.steps() {
        log::debug!("{:?}: {:?}", command, step);
        match step {
            Step::Version => {
                spec = Some(update_version(version_number, release_tag, settings, output, now).await?);
            }
            Step::Clean => clean::clean(&settings.clean_targets()).await?,
            Step::SourceArchive => {
                let release = &resolved(&spec)?.release;
                let outcome = packager::archive::build(settings, ArchiveKind::Source, release, output).await?;
                produced |= outcome == BuildOutcome::Created;
            }
            Step::Installer => {
                let release = &resolved(&spec)?.release;
                let outcome =
                    packager::archive::build(settings, ArchiveKind::Installer, release, output).await?;
                produced |= outcome == BuildOutcome::Created;
            }
            Step::RuntimeBundle => {
                let version = resolved(&spec)?.version_string("");
                packager::runtime::bundle(settings, &version, output).await?;
                produced = true;
            }
            Step::Announce if produced => created = announce(settings, output).await?,
            Step::Announce => log::debug!("Nothing was created"),
        }
    }

    if let (BuildCommand::Version, Some(spec)) = (command, &spec) {
        describe_runtime(spec, settings).await;
    }

    Ok(created)
}

fn resolved(spec: &Option<VersionSpec>) -> Result<&VersionSpec> {
    spec.as_ref().ok_or_else(|| {
        CliError::ExecutionFailed {
            reason: "version was not resolved before building".to_string(),
        }
        .into()
    })
}

async fn update_version(
    version_number: &str,
    release_tag: Option<&str>,
    settings: &Settings,
    output: &OutputManager,
    now: DateTime<Local>,
) -> Result<VersionSpec> {
    let version_file = settings.version_file();
    let resolution = version::resolve(version_number, release_tag, &version_file, now).await?;
    match &resolution {
        Resolution::Update(spec) => {
            metadata::write(&version_file, spec).await?;
            output.success(&format!("Updated version to {} {}", spec.version, spec.release))?;
        }
        Resolution::Keep(spec) => {
            output.progress(&format!("Keeping version {}", spec.version_string(" ")))?;
        }
    }
    Ok(resolution.spec().clone())
}

/// Logs the full version as the configured interpreter would report it.
async fn describe_runtime(spec: &VersionSpec, settings: &Settings) {
    let who = &settings.project().name;
    match RuntimeInfo::probe(&settings.tools().python).await {
        Ok(info) => log::info!("{}", spec.full_version(who, &info)),
        Err(e) => log::debug!("Could not probe {}: {}", settings.tools().python, e),
    }
}
