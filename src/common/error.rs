//! Error types for the case runner
//!
//! These errors cover everything that can go wrong *outside* a running case:
//! loading and parsing case files, and reaching the external collaborators.
//! A failure *inside* a running case is a [`RunError`](crate::case::RunError),
//! not one of these - the evaluator converts collaborator faults at the step
//! boundary instead of letting them escape.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the case runner
#[derive(Error, Debug)]
pub enum Error {
    // === Case loading errors ===
    #[error("failed to read case file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("invalid case file '{path}': {error}")]
    CaseParse { path: String, error: String },

    #[error("no case files matching '*{suffix}' under '{path}'")]
    NoCasesFound { path: String, suffix: String },

    // === Collaborator errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to run command '{command}': {error}")]
    Spawn { command: String, error: String },

    #[error("empty command")]
    EmptyCommand,

    // === IO errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file read error with path context
    pub fn file_read(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a case parse error with path context
    pub fn case_parse(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::CaseParse {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a spawn error for a command that could not be executed
    pub fn spawn(command: &str, error: impl std::fmt::Display) -> Self {
        Self::Spawn {
            command: command.to_string(),
            error: error.to_string(),
        }
    }
}
