//! Error types for the command-line front end.

use oxide_sqlfmt_core::ParseError;

/// Errors that can occur while formatting input.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input is not a statement the formatter accepts.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// IO error (reading the input file or stdin).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error for `--json` output.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;
