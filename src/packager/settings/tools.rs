//! External tool program names.

use serde::Deserialize;

/// Programs invoked by the packaging pipeline.
///
/// Values are resolved through `PATH` unless they contain a path separator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    /// Interpreter running the packaging toolchain script.
    pub python: String,
    /// Native source compiler.
    pub javac: String,
    /// JVM launcher used to run the runtime's bytecode compiler.
    pub java: String,
    /// Archive creation utility.
    pub jar: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            python: "python".into(),
            javac: "javac".into(),
            java: "java".into(),
            jar: "jar".into(),
        }
    }
}
