//! Error handling for fedtune
//!
//! Two kinds of failure exist in this tool and the types keep them apart:
//! fatal preflight failures (the process exits non-zero) and recoverable
//! step failures (logged, the checklist continues).

use thiserror::Error;

/// Main error type for fedtune
#[derive(Error, Debug)]
pub enum TuneError {
    /// IO errors (file operations, stdin, log file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required external command could not be spawned at all
    #[error("failed to run {command}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command ran but exited with a non-zero status
    #[error("{command} exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Startup prerequisite not met (root, sudo, dnf); always fatal
    #[error("prerequisite not met: {0}")]
    Preflight(String),
}

/// Result type alias for fedtune operations
pub type Result<T> = std::result::Result<T, TuneError>;

impl TuneError {
    /// Create a spawn error for a command that could not be started
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create a preflight error
    pub fn preflight(msg: impl Into<String>) -> Self {
        Self::Preflight(msg.into())
    }
}
