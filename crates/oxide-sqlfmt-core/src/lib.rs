//! # oxide-sqlfmt-core
//!
//! A SQL SELECT parser and pretty-printer for developer tooling: debug
//! logging, query normalization and review of generated SQL.
//!
//! The parser does not tokenize. It works on the raw character stream:
//! quoted text is swapped for opaque placeholders, keywords are matched only
//! on word boundaries, and lists are split only outside parentheses. Clauses
//! are then cut out by a fixed pipeline of stages, recursing into FROM and
//! JOIN subqueries.
//!
//! ```rust
//! let sql = oxide_sqlfmt_core::format(
//!     "SELECT id, name FROM users u LEFT JOIN orders o ON u.id = o.user_id WHERE u.active = 1",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "select id, name\n  from users u\n  left join orders o\n    on u.id = o.user_id\n where u.active = 1"
//! );
//! ```
//!
//! Only SELECT statements are supported; anything else is rejected with
//! [`ParseError::UnsupportedStatementKind`]. Failures are all-or-nothing: no
//! partial output is ever produced.

pub mod ast;
pub mod options;
pub mod parser;
pub mod scan;

mod printer;

pub use ast::{Combinator, Condition, Field, Join, JoinKind, Statement, Table};
pub use options::{FormatOptions, KeywordCase};
pub use parser::{ParseError, Parser, Result};

use tracing::debug;

/// Parses `raw` into a [`Statement`].
///
/// # Errors
///
/// Returns a [`ParseError`] if `raw` is not a well-formed SELECT statement.
pub fn parse(raw: &str) -> Result<Statement> {
    Parser::new(raw).parse_statement()
}

/// Parses and re-renders `raw` with the default [`FormatOptions`].
///
/// # Errors
///
/// Returns a [`ParseError`] if `raw` is not a well-formed SELECT statement.
pub fn format(raw: &str) -> Result<String> {
    format_with(raw, &FormatOptions::default())
}

/// Parses and re-renders `raw` with the given options.
///
/// # Errors
///
/// Returns a [`ParseError`] if `raw` is not a well-formed SELECT statement.
pub fn format_with(raw: &str, options: &FormatOptions) -> Result<String> {
    debug!(len = raw.len(), ?options, "formatting statement");
    parse(raw).map(|statement| statement.render_with(options))
}
