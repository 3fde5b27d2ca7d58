//! Command-line front end for `oxide-sqlfmt-core`.
//!
//! Reads one SELECT statement from a file or stdin and prints it either
//! re-rendered or as the parsed tree in JSON.
//!
//! # CLI Usage
//!
//! ```bash
//! # Format a file
//! oxide-sqlfmt query.sql
//!
//! # Format stdin with upper-case keywords
//! echo "select a from t" | oxide-sqlfmt --uppercase
//!
//! # Dump the parsed statement
//! oxide-sqlfmt --json query.sql
//! ```

pub mod error;

use std::io::Read;
use std::path::Path;

use oxide_sqlfmt_core::{FormatOptions, Parser};
use tracing::debug;

pub use error::{CliError, Result};

/// What `run` writes for a successfully parsed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The aligned SQL text.
    #[default]
    Text,
    /// The parsed statement as pretty-printed JSON.
    Json,
}

/// Settings collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Rendering options passed to the formatter.
    pub options: FormatOptions,
    /// Output mode.
    pub output: OutputMode,
}

/// Reads the whole input from `path`, or from stdin when `path` is absent
/// or `-`.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the input cannot be read.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "reading input file");
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            debug!("reading stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Parses `sql` and produces the output selected by `config`.
///
/// # Errors
///
/// Returns [`CliError::Parse`] if `sql` is rejected by the parser, and
/// [`CliError::Serialization`] if JSON output fails.
pub fn run(sql: &str, config: &Config) -> Result<String> {
    let statement = Parser::new(sql).parse_statement()?;
    debug!(
        fields = statement.fields.len(),
        joins = statement.joins.len(),
        output = ?config.output,
        "statement parsed"
    );
    match config.output {
        OutputMode::Text => Ok(statement.render_with(&config.options)),
        OutputMode::Json => Ok(serde_json::to_string_pretty(&statement)?),
    }
}
