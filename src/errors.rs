//! Error mapping guide:
//! - Every SetupError is fatal and maps to exit code 1.
//! - Display strings are what the operator sees after "Error during setup:"; keep them stable.
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SetupError {
    /// Missing or unusable configuration; raised before any side effect.
    Configuration(String),
    /// The clone tool exited non-zero. Carries the captured streams.
    Clone {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The dependency installer exited non-zero.
    Install { code: Option<i32> },
    Filesystem { path: PathBuf, source: io::Error },
    /// An external tool could not be started or its output could not be read.
    Spawn(anyhow::Error),
}

impl SetupError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SetupError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Configuration(msg) => f.write_str(msg),
            SetupError::Clone { .. } => f.write_str("Git Clone failed!"),
            SetupError::Install { .. } => f.write_str("Pip install failed!"),
            SetupError::Filesystem { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            SetupError::Spawn(e) => write!(f, "{e:#}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Filesystem { source, .. } => Some(source),
            SetupError::Spawn(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for SetupError {
    fn from(e: anyhow::Error) -> Self {
        SetupError::Spawn(e)
    }
}

/// Map a SetupError to the process exit code.
pub fn exit_code_for_setup_error(_e: &SetupError) -> u8 {
    1
}

/// Render the user-facing failure line for a SetupError.
pub fn display_for_setup_error(e: &SetupError) -> String {
    format!("❌ Error during setup: {e}")
}
