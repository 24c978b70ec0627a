//! Application error types.
//!
//! Domain outcomes (import failures, rejected commands, unrecognized
//! utterances) are plain values in their own modules. This type covers the
//! ambient failures around them: IO, configuration, serialization.

use thiserror::Error;

use crate::import::ImportError;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// A presentation could not be imported
    #[error("Import of {file} failed: {source}")]
    Import {
        /// Declared file name of the rejected input.
        file: String,
        /// The typed import failure.
        source: ImportError,
    },

    /// JSON encoding of model values failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The engine task has shut down and can no longer accept commands
    #[error("Command engine is no longer running")]
    EngineClosed,
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Wrap an import failure with the file it came from
    pub fn import(file: impl Into<String>, source: ImportError) -> Self {
        Self::Import { file: file.into(), source }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
