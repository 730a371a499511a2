//! Source archive and installer creation through the packaging toolchain.
//!
//! Both kinds are produced by running the project's setup script with the
//! configured interpreter; artifacts land in the settings' dist directory.
//! Installers are native to Windows, so builds on other hosts are gated by
//! [`InstallerPolicy`].

use crate::cli::OutputManager;
use crate::packager::{error::Result, settings::Settings, utils::tool::run_tool};
use std::ffi::OsString;

/// Release tag marking a final release.
pub const FINAL_RELEASE: &str = "final";

/// Host operating system on which installers are built natively.
pub const INSTALLER_NATIVE_OS: &str = "windows";

/// Artifact kinds produced by the packaging toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Source distribution.
    Source,
    /// Windows installer.
    Installer,
}

impl ArchiveKind {
    /// Human readable name used in status lines.
    pub fn display_name(self) -> &'static str {
        match self {
            ArchiveKind::Source => "source distribution",
            ArchiveKind::Installer => "Windows installer",
        }
    }

    /// Setup script arguments for this kind.
    pub fn setup_args(self, settings: &Settings) -> Vec<OsString> {
        let mut args = vec![settings.setup_script().into_os_string()];
        match self {
            ArchiveKind::Source => {
                args.extend(["sdist".into(), "--force-manifest".into()]);
            }
            ArchiveKind::Installer => {
                args.extend([
                    "bdist_wininst".into(),
                    "--bitmap".into(),
                    settings.installer_bitmap().into_os_string(),
                    "--install-script".into(),
                    settings.project().install_script.clone().into(),
                ]);
            }
        }
        args
    }
}

/// Result of a successful archive build request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The toolchain ran and succeeded.
    Created,
    /// Policy prevented the build; nothing was produced.
    Skipped,
}

/// Whether an installer may be built on the current host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerPolicy {
    /// Native host.
    Proceed,
    /// Foreign host, pre-release: build, but the output may differ from a native build.
    ProceedWithWarning,
    /// Foreign host, final release: do not build.
    Skip,
}

impl InstallerPolicy {
    /// Decides the policy for `release` on `host_os`.
    pub fn evaluate(release: &str, host_os: &str) -> Self {
        if host_os == INSTALLER_NATIVE_OS {
            InstallerPolicy::Proceed
        } else if release == FINAL_RELEASE {
            InstallerPolicy::Skip
        } else {
            InstallerPolicy::ProceedWithWarning
        }
    }
}

/// Builds `kind` with the packaging toolchain.
///
/// Returns [`BuildOutcome::Skipped`] when a final installer is requested on a
/// non-native host. A missing interpreter or a non-zero exit from the setup
/// script is returned as an error after printing the failure status line.
pub async fn build(
    settings: &Settings,
    kind: ArchiveKind,
    release: &str,
    output: &OutputManager,
) -> Result<BuildOutcome> {
    let policy = match kind {
        ArchiveKind::Source => InstallerPolicy::Proceed,
        ArchiveKind::Installer => InstallerPolicy::evaluate(release, settings.host_os()),
    };

    if policy == InstallerPolicy::Skip {
        output.warn("Final Windows installers can only be created in Windows.")?;
        output.warn("Windows installer was not created.")?;
        return Ok(BuildOutcome::Skipped);
    }

    let name = kind.display_name();
    output.progress(&format!("Creating {}...", name))?;

    if let Err(e) = run_tool(
        &settings.tools().python,
        kind.setup_args(settings),
        settings.root(),
    )
    .await
    {
        output.error(&format!("Creating {} failed.", name))?;
        return Err(e);
    }

    output.success(&format!("{} created successfully.", capitalize(name)))?;

    if policy == InstallerPolicy::ProceedWithWarning {
        output.warn("Windows installers created on other platforms may not")?;
        output.warn("be exactly identical to ones created in Windows.")?;
    }

    Ok(BuildOutcome::Created)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
