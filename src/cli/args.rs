//! Command line argument parsing.

use super::commands::BuildCommand;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Release packaging for the project
#[derive(Parser, Debug)]
#[command(
    name = "release-packager",
    version,
    about = "Stamps version metadata and creates release packages",
    long_about = "Stamps version metadata and creates release packages.

Argument 'command' can have one of the following values:
  - sdist    : create source distribution
  - wininst  : create Windows installer
  - all      : create both packages
  - version  : update only version information in 'src/robot/version.py'
  - jar      : create stand-alone jar file containing the project and Jython

'version_number' must be a version number in format '2.x(.y)', 'trunk' or
'keep'. With 'keep', version information is not updated.

'release_tag' must be either 'alpha', 'beta', 'rc' or 'final', where all but
the last one can have a number after the name like 'alpha1' or 'rc2'. When
'version_number' is 'trunk', 'release_tag' is automatically assigned to the
current date.

The runtime jar is cached in 'ext-lib' under the project root and downloaded
when missing. Distribution packages are created under 'dist', which is
deleted initially (except by 'jar'). Layout, runtime and tool names can be
overridden in 'release.toml' at the project root.

Examples:
  release-packager sdist 2.0 final
  release-packager wininst keep
  release-packager all 2.1.13 alpha
  release-packager sdist trunk
  release-packager version trunk
  release-packager jar 2.8 rc1"
)]
pub struct Args {
    /// Command to run
    #[arg(value_enum)]
    pub command: BuildCommand,

    /// Version number: 2.x(.y), 'trunk' or 'keep'
    pub version_number: String,

    /// Release tag: a/alpha, b/beta, rc (optionally numbered) or 'final'
    pub release_tag: Option<String>,

    /// Project root
    #[arg(long, value_name = "DIR", default_value = ".", env = "RELEASE_PACKAGER_ROOT")]
    pub root: PathBuf,

    /// Print artifact checksums and other details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print only errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parses arguments, returning clap's error instead of exiting.
    pub fn try_parse_args<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(argv)
    }

    /// Full usage documentation.
    pub fn usage() -> String {
        Self::command().render_long_help().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_positionals() {
        let args = Args::try_parse_args(["release-packager", "all", "2.1.13", "alpha"]).unwrap();
        assert_eq!(args.command, BuildCommand::All);
        assert_eq!(args.version_number, "2.1.13");
        assert_eq!(args.release_tag.as_deref(), Some("alpha"));
        assert_eq!(args.root, PathBuf::from("."));
    }

    #[test]
    fn release_tag_is_optional() {
        let args = Args::try_parse_args(["release-packager", "wininst", "keep"]).unwrap();
        assert_eq!(args.command, BuildCommand::Wininst);
        assert!(args.release_tag.is_none());
    }

    #[test]
    fn wrong_arity_and_unknown_commands_fail() {
        assert!(Args::try_parse_args(["release-packager"]).is_err());
        assert!(Args::try_parse_args(["release-packager", "sdist"]).is_err());
        assert!(Args::try_parse_args(["release-packager", "sdist", "2.0", "final", "extra"]).is_err());
        assert!(Args::try_parse_args(["release-packager", "bdist", "2.0", "final"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let args = Args::try_parse_args(["release-packager", "-q", "version", "keep"]).unwrap();
        assert!(args.quiet);
        assert!(Args::try_parse_args(["release-packager", "-q", "-v", "version", "keep"]).is_err());
    }

    #[test]
    fn usage_lists_commands() {
        let usage = Args::usage();
        for command in ["sdist", "wininst", "all", "version", "jar"] {
            assert!(usage.contains(command), "{command}");
        }
    }
}
