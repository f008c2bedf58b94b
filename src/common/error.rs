//! Error types for jtreg-launch
//!
//! Every failure is a violated precondition: the message names what was
//! expected so the operator can fix the command, template or environment
//! and re-run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jtreg-launch
#[derive(Error, Debug)]
pub enum Error {
    // === Command Errors ===
    #[error("'{0}' not found in command")]
    BuildToolMissing(String),

    #[error("Failed to quote command for the shell: {0}")]
    CommandQuoting(String),

    #[error("Failed to run build command: {0}")]
    CommandSpawn(#[source] io::Error),

    // === Rerun Block Errors ===
    #[error("Unexpected output format: no 'rerun:' block found in command output")]
    MarkerNotFound,

    #[error("Unexpected output format: rerun block is not terminated by a blank line")]
    UnterminatedBlock,

    #[error("Unexpected output format: {0}")]
    UnexpectedLine(String),

    #[error("Unexpected env line: {0}")]
    InvalidEnvLine(String),

    #[error("Unexpected {expected} command: {line}")]
    InvalidExecutable { expected: String, line: String },

    #[error("Unexpected {expected} arg: {line}")]
    InvalidArgument { expected: String, line: String },

    #[error("Invalid {what}: {} does not exist", .path.display())]
    PathNotFound { what: String, path: PathBuf },

    // === Template Errors ===
    #[error("Template file does not exist: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template {} is not a JSON object", .0.display())]
    TemplateNotObject(PathBuf),

    // === Launch File Errors ===
    #[error("Invalid launch file '{path}': {error}")]
    LaunchFile { path: String, error: String },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a path not found error
    pub fn path_not_found(what: &str, path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound {
            what: what.to_string(),
            path: path.into(),
        }
    }

    /// Create an executable mismatch error
    pub fn invalid_executable(expected: &str, line: &str) -> Self {
        Self::InvalidExecutable {
            expected: expected.to_string(),
            line: line.to_string(),
        }
    }

    /// Create a malformed argument line error
    pub fn invalid_argument(expected: &str, line: &str) -> Self {
        Self::InvalidArgument {
            expected: expected.to_string(),
            line: line.to_string(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
