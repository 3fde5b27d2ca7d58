//! SQL Parser implementation.

use std::sync::Arc;

use tracing::{debug, trace};

use super::cursor::Cursor;
use super::error::{ParseError, Result};
use super::stages::{self, Context};
use crate::ast::Statement;
use crate::scan::{is_balanced, normalize_whitespace, Keyword, LiteralTable};

/// Deepest subquery nesting accepted before giving up.
pub const MAX_NESTING_DEPTH: usize = 64;

/// SQL Parser.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Parses a single SQL statement.
    ///
    /// Quoted text is protected and whitespace normalized before any clause is
    /// extracted, so the returned tree holds placeholders wherever quoted text
    /// appeared outside the SELECT list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedStatement`] for empty input, unbalanced
    /// parentheses or a statement whose clauses cannot be extracted, and
    /// [`ParseError::UnsupportedStatementKind`] for anything but SELECT.
    pub fn parse_statement(&self) -> Result<Statement> {
        debug!(len = self.input.len(), "parsing statement");
        let result = self.parse_protected();
        if let Err(err) = &result {
            debug!(%err, "statement rejected");
        }
        result
    }

    fn parse_protected(&self) -> Result<Statement> {
        let (protected, literals) = LiteralTable::protect(self.input)?;
        let literals = Arc::new(literals);
        let text = normalize_whitespace(&protected);
        if text.is_empty() {
            return Err(ParseError::malformed("empty input"));
        }
        if !is_balanced(&text) {
            return Err(ParseError::malformed("unbalanced parentheses"));
        }
        parse_query(Cursor::new(&text), Context::root(&literals))
    }
}

/// Dispatches on the leading keyword of a statement or subquery.
pub(crate) fn parse_query(cursor: Cursor<'_>, ctx: Context<'_>) -> Result<Statement> {
    let text = cursor.as_str();
    if text.is_empty() {
        return Err(ParseError::malformed("empty subquery"));
    }
    let word = text
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or(text);
    match Keyword::from_str(word) {
        Some(Keyword::Select) => parse_select(cursor, ctx),
        Some(kind) if kind.is_statement_kind() => Err(ParseError::unsupported(kind.as_str())),
        _ => Err(ParseError::unsupported(ctx.literals.restore(word))),
    }
}

/// Runs every extraction stage over a SELECT statement.
fn parse_select(cursor: Cursor<'_>, ctx: Context<'_>) -> Result<Statement> {
    trace!(depth = ctx.depth, len = cursor.len(), "parsing SELECT");

    let (limit, cursor) = stages::limit(cursor)?;
    let (offset, cursor) = stages::offset(cursor)?;
    let (order_by, cursor) = stages::order_by(cursor)?;
    let ((distinct, fields), cursor) = stages::select_list(cursor, ctx)?;
    let ((from, mut joins), cursor) = stages::from_clause(cursor, ctx)?;
    let (explicit_joins, cursor) = stages::joins(cursor, ctx)?;
    joins.extend(explicit_joins);
    let (where_clause, cursor) = stages::where_clause(cursor)?;
    let (group_by, cursor) = stages::group_by(cursor)?;
    let (having, cursor) = stages::having(cursor, !group_by.is_empty())?;
    stages::finish(cursor, ctx)?;

    Ok(Statement {
        distinct,
        fields,
        from,
        joins,
        where_clause,
        group_by,
        having,
        order_by,
        limit,
        offset,
        literals: Arc::clone(ctx.literals),
        nesting_depth: ctx.depth,
    })
}
