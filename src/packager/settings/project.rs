//! Project layout and artifact metadata.

use serde::Deserialize;
use std::path::PathBuf;

/// Project layout, relative to the project root.
///
/// # Examples
///
/// ```
/// use release_packager::packager::ProjectSettings;
///
/// let project = ProjectSettings::default();
/// assert_eq!(project.name, "robotframework");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSettings {
    /// Artifact name prefix, e.g. `robotframework-2.8.jar`.
    pub name: String,

    /// Interpretable source package copied into runtime bundles.
    pub source_dir: PathBuf,

    /// Directory holding the `*.java` sources compiled into runtime bundles.
    pub native_source_dir: PathBuf,

    /// Generated version module.
    pub version_file: PathBuf,

    /// Output directory for every artifact.
    pub dist_dir: PathBuf,

    /// Intermediate build directory of the packaging toolchain.
    pub build_dir: PathBuf,

    /// Staging directory used while assembling a runtime bundle.
    pub staging_dir: PathBuf,

    /// Packaging toolchain entry script.
    pub setup_script: PathBuf,

    /// Bitmap shown by the installer.
    pub installer_bitmap: PathBuf,

    /// Post-install script name passed to the installer build.
    pub install_script: String,

    /// Test-data directories, relative to `source_dir`, that never ship.
    pub fixture_dirs: Vec<PathBuf>,

    /// Entry point written to the bundle manifest.
    pub main_class: String,

    /// `Specification-Version` written to the bundle manifest.
    pub specification_version: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: "robotframework".into(),
            source_dir: PathBuf::from("src/robot"),
            native_source_dir: PathBuf::from("src/java/org/robotframework"),
            version_file: PathBuf::from("src/robot/version.py"),
            dist_dir: PathBuf::from("dist"),
            build_dir: PathBuf::from("build"),
            staging_dir: PathBuf::from("tmp-jar-dir"),
            setup_script: PathBuf::from("setup.py"),
            installer_bitmap: PathBuf::from("robot.bmp"),
            install_script: "robot_postinstall.py".into(),
            fixture_dirs: vec![PathBuf::from("htmldata/testdata")],
            main_class: "org.robotframework.RobotFramework".into(),
            specification_version: "2".into(),
        }
    }
}
