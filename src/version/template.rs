//! Generated version module template.

/// Python module written to the version file.
///
/// The accessors mirror [`VersionSpec::version_string`](super::VersionSpec::version_string)
/// and [`VersionSpec::full_version`](super::VersionSpec::full_version); the
/// interpreter is detected when the module is imported, not when it is written.
pub const VERSION_MODULE_TEMPLATE: &str = r#"# Automatically generated by release-packager. Do not edit.

import sys

VERSION = '{{version}}'
RELEASE = '{{release}}'
TIMESTAMP = '{{timestamp}}'


def get_version(sep=' '):
    if RELEASE == 'final':
        return VERSION
    return VERSION + sep + RELEASE


def get_full_version(who=''):
    sys_version = sys.version.split()[0]
    version = '%s %s (%s %s on %s)' \
        % (who, get_version(), _get_interpreter(), sys_version, sys.platform)
    return version.strip()


def _get_interpreter():
    if sys.platform.startswith('java'):
        return 'Jython'
    if sys.platform == 'cli':
        return 'IronPython'
    if 'PyPy' in sys.version:
        return 'PyPy'
    return 'Python'
"#;
