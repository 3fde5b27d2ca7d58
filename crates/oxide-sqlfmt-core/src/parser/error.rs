//! Parser error types.

use thiserror::Error;

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The statement is structurally broken: missing FROM, unbalanced
    /// parentheses, empty input, a dangling clause keyword and so on.
    #[error("malformed statement: {reason}")]
    MalformedStatement {
        /// What was wrong, in words.
        reason: String,
    },

    /// The statement starts with something other than SELECT.
    #[error("unsupported statement kind: {0}")]
    UnsupportedStatementKind(String),
}

impl ParseError {
    /// Creates a [`ParseError::MalformedStatement`].
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedStatement {
            reason: reason.into(),
        }
    }

    /// Creates a [`ParseError::UnsupportedStatementKind`].
    #[must_use]
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedStatementKind(kind.into())
    }
}

/// Result type alias for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
