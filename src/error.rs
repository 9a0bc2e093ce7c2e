use std::io;

use thiserror::Error;

/// Errors surfaced by the pacer library.
///
/// Typing itself never fails; these cover construction and the ambient
/// plumbing around a session (config files, log files).
#[derive(Debug, Error)]
pub enum PacerError {
    /// I/O error while touching config or log files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file could not be encoded or decoded.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A passage needs at least one character.
    #[error("passage must not be empty")]
    EmptyPassage,
}
