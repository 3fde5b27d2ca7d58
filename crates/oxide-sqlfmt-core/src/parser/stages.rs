//! Clause extraction stages.
//!
//! Every stage takes the current [`Cursor`] and returns what it extracted
//! together with the cursor that remains. A stage whose clause is absent hands
//! the cursor back unchanged; otherwise the returned cursor is strictly
//! shorter. [`super::parser`] composes them in a fixed order:
//!
//! 1. [`limit`], [`offset`] and [`order_by`] cut trailing clauses off the end.
//! 2. [`select_list`], [`from_clause`], [`joins`], [`where_clause`],
//!    [`group_by`] and [`having`] consume from the front.
//! 3. [`finish`] rejects anything left over.

use std::sync::Arc;

use tracing::trace;

use super::cursor::Cursor;
use super::error::{ParseError, Result};
use super::parser::parse_query;
use crate::ast::{Condition, Field, Join, JoinKind, Table};
use crate::scan::{
    count_top_level, find_top_level, first_boundary, leading, matching_close, split,
    split_ranges, token_end, top_level_char, Keyword, LiteralTable, GROUP_BY, ORDER_BY,
};

/// Keywords that end a FROM item.
const FROM_END: &[&str] = &[
    "join", "left", "right", "inner", "outer", "full", "cross", "where", GROUP_BY, "having",
    ORDER_BY, "limit",
];

/// Keywords that end the run of JOIN clauses.
const JOINS_END: &[&str] = &["where", GROUP_BY, "having", ORDER_BY, "limit"];

/// Keywords that end a joined table reference.
const JOIN_TABLE_END: &[&str] = &["on", "using"];

/// Bytes after which a trailing word is an operand, not an alias.
const OPERATOR_BYTES: &[u8] = b"+-*/%=<>!|&^~:,";

/// What stages need to know about the statement being parsed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context<'l> {
    /// Nesting depth of the statement being parsed.
    pub depth: usize,
    /// Placeholders of the whole input.
    pub literals: &'l Arc<LiteralTable>,
}

impl<'l> Context<'l> {
    pub(crate) const fn root(literals: &'l Arc<LiteralTable>) -> Self {
        Self { depth: 0, literals }
    }

    /// The context for a subquery one level down.
    pub(crate) fn nested(self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > super::MAX_NESTING_DEPTH {
            return Err(ParseError::malformed(format!(
                "subqueries nested deeper than {}",
                super::MAX_NESTING_DEPTH
            )));
        }
        Ok(Self {
            depth,
            literals: self.literals,
        })
    }
}

/// Splits `body` on top-level commas, rejecting empty entries.
fn comma_list(body: &str, clause: &str) -> Result<Vec<String>> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ParseError::malformed(format!("{clause} without a list")));
    }
    split(body, ",")
        .pieces()
        .into_iter()
        .map(|piece| {
            if piece.is_empty() {
                Err(ParseError::malformed(format!("empty entry in {clause} list")))
            } else {
                Ok(piece.to_owned())
            }
        })
        .collect()
}

/// Cuts the rightmost top-level `keyword` and everything after it.
fn trailing_clause<'a>(
    cursor: Cursor<'a>,
    keyword: Keyword,
    clause: &str,
) -> Result<(Option<String>, Cursor<'a>)> {
    let text = cursor.as_str();
    let keyword = keyword.as_str();
    let Some(idx) = find_top_level(text, keyword, -1) else {
        return Ok((None, cursor));
    };
    let expr = text[idx + keyword.len()..].trim();
    if expr.is_empty() {
        return Err(ParseError::malformed(format!("{clause} without an expression")));
    }
    trace!(stage = keyword, remaining = idx, "extracted");
    Ok((Some(expr.to_owned()), cursor.truncate(idx)))
}

/// Extracts the rightmost top-level LIMIT and everything after it, so a
/// following OFFSET stays part of the limit expression.
pub(crate) fn limit(cursor: Cursor<'_>) -> Result<(Option<String>, Cursor<'_>)> {
    trailing_clause(cursor, Keyword::Limit, "LIMIT")
}

/// Extracts an OFFSET that is not part of a LIMIT expression, either on its
/// own or written before LIMIT.
pub(crate) fn offset(cursor: Cursor<'_>) -> Result<(Option<String>, Cursor<'_>)> {
    trailing_clause(cursor, Keyword::Offset, "OFFSET")
}

/// Extracts the rightmost top-level ORDER BY list.
pub(crate) fn order_by(cursor: Cursor<'_>) -> Result<(Vec<String>, Cursor<'_>)> {
    let text = cursor.as_str();
    let Some(idx) = find_top_level(text, ORDER_BY, -1) else {
        return Ok((Vec::new(), cursor));
    };
    let items = comma_list(&text[idx + ORDER_BY.len()..], "ORDER BY")?;
    trace!(stage = "order_by", items = items.len(), "extracted");
    Ok((items, cursor.truncate(idx)))
}

/// Extracts the SELECT list up to its top-level FROM.
///
/// The returned cursor starts right after `from`.
pub(crate) fn select_list<'a>(
    cursor: Cursor<'a>,
    ctx: Context<'_>,
) -> Result<((bool, Vec<Field>), Cursor<'a>)> {
    let text = cursor.as_str();
    let start = leading(text, Keyword::Select.as_str())
        .ok_or_else(|| ParseError::malformed("expected SELECT"))?;
    let from = Keyword::From.as_str();
    let end = find_top_level(&text[start..], from, 1)
        .map(|idx| start + idx)
        .ok_or_else(|| ParseError::malformed("missing FROM after SELECT"))?;

    let mut list = text[start..end].trim();
    let distinct = match leading(list, Keyword::Distinct.as_str()) {
        Some(offset) => {
            list = list[offset..].trim_start();
            true
        }
        None => false,
    };
    if list.is_empty() {
        return Err(ParseError::malformed("empty SELECT list"));
    }

    let fields = comma_list(list, "SELECT")?
        .iter()
        .map(|segment| field(segment, ctx.literals))
        .collect::<Vec<_>>();
    trace!(stage = "select", fields = fields.len(), distinct, "extracted");
    Ok(((distinct, fields), cursor.advance(end + from.len())))
}

/// Builds a field from one SELECT list entry, restoring its literals.
///
/// A string literal in alias position (`interval '1 day'`) is an operand.
fn field(segment: &str, literals: &LiteralTable) -> Field {
    let (expression, alias) = match split_alias(segment) {
        (expr, Some(alias)) if !literals.restore(alias).starts_with('\'') => (expr, Some(alias)),
        _ => (segment, None),
    };
    Field {
        expression: literals.restore(expression),
        alias: alias.map(|alias| literals.restore(alias)),
    }
}

/// Splits `expr as alias` or `expr alias`.
fn split_alias(segment: &str) -> (&str, Option<&str>) {
    let keyword = Keyword::As.as_str();
    if let Some(idx) = find_top_level(segment, keyword, -1) {
        let expr = segment[..idx].trim();
        let alias = segment[idx + keyword.len()..].trim();
        if !expr.is_empty() && is_alias(alias) {
            return (expr, Some(alias));
        }
    }
    implicit_alias(segment).map_or((segment, None), |(expr, alias)| (expr, Some(alias)))
}

/// Detects a bare trailing identifier used as an alias.
fn implicit_alias(segment: &str) -> Option<(&str, &str)> {
    if segment.ends_with(')') {
        return None;
    }
    let idx = segment.rfind(' ')?;
    let expr = segment[..idx].trim_end();
    let alias = &segment[idx + 1..];
    if expr.is_empty() || !is_alias(alias) {
        return None;
    }
    if expr
        .as_bytes()
        .last()
        .is_some_and(|b| OPERATOR_BYTES.contains(b))
    {
        return None;
    }
    let previous = expr.rsplit(' ').next().unwrap_or(expr);
    match Keyword::from_str(previous) {
        Some(Keyword::End) | None => Some((expr, alias)),
        Some(_) => None,
    }
}

/// Returns true for a plain identifier that is not a keyword.
fn is_alias(word: &str) -> bool {
    let bytes = word.as_bytes();
    !bytes.is_empty()
        && !bytes[0].is_ascii_digit()
        && bytes
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        && Keyword::from_str(word).is_none()
}

/// Parses `alias`, `as alias` or nothing.
fn table_alias(region: &str, ctx: Context<'_>) -> Result<Option<String>> {
    let region = region.trim();
    if region.is_empty() {
        return Ok(None);
    }
    let alias = leading(region, Keyword::As.as_str())
        .map_or(region, |offset| region[offset..].trim());
    if is_alias(alias) {
        Ok(Some(alias.to_owned()))
    } else {
        Err(ParseError::malformed(format!(
            "unexpected `{}` after table reference",
            ctx.literals.restore(region)
        )))
    }
}

/// Parses a table name or parenthesised subquery plus its alias.
///
/// The alias runs until the first top-level comma or one of `terminators`.
fn table_ref<'a>(
    cursor: Cursor<'a>,
    ctx: Context<'_>,
    terminators: &[&str],
    clause: &str,
) -> Result<(Table, Cursor<'a>)> {
    let text = cursor.as_str();
    if text.is_empty() {
        return Err(ParseError::malformed(format!("missing table after {clause}")));
    }

    let (table, source_end) = if text.starts_with('(') {
        let close = matching_close(text, 0)
            .ok_or_else(|| ParseError::malformed("unbalanced parentheses"))?;
        let query = parse_query(Cursor::new(&text[1..close]), ctx.nested()?)?;
        (Table::subquery(query), close + 1)
    } else {
        let end = token_end(text);
        let name = &text[..end];
        if name.is_empty() || Keyword::from_str(name).is_some() {
            return Err(ParseError::malformed(format!("missing table after {clause}")));
        }
        (Table::named(name), end)
    };

    let after = cursor.advance(source_end);
    let rest = after.as_str();
    let region_end = [first_boundary(rest, terminators), top_level_char(rest, b',')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
    let table = match table_alias(&rest[..region_end], ctx)? {
        Some(alias) => table.alias(alias),
        None => table,
    };
    Ok((table, after.advance(region_end)))
}

/// Extracts the FROM target and any comma-separated items after it.
///
/// Comma-separated items are returned as [`JoinKind::Cross`] joins.
pub(crate) fn from_clause<'a>(
    cursor: Cursor<'a>,
    ctx: Context<'_>,
) -> Result<((Table, Vec<Join>), Cursor<'a>)> {
    let (table, mut rest) = table_ref(cursor, ctx, FROM_END, "FROM")?;
    let mut joins = Vec::new();
    while let Some(next) = rest.strip_comma() {
        let (item, after) = table_ref(next, ctx, FROM_END, "FROM")?;
        joins.push(Join::new(JoinKind::Cross, item));
        rest = after;
    }
    trace!(stage = "from", comma_items = joins.len(), remaining = rest.len(), "extracted");
    Ok(((table, joins), rest))
}

/// Splits trailing join modifiers (`left outer`) off a piece.
fn trailing_modifiers(piece: &str) -> (&str, &str) {
    let mut cut = piece.len();
    loop {
        let head = piece[..cut].trim_end();
        let start = head.rfind(' ').map_or(0, |idx| idx + 1);
        let word = &head[start..];
        if !Keyword::from_str(word).is_some_and(|kw| kw.is_join_modifier()) {
            break;
        }
        cut = start;
    }
    (piece[..cut].trim(), piece[cut..].trim())
}

/// Maps the words before `join` to a join kind.
fn join_kind(modifiers: &str) -> Result<JoinKind> {
    let words = modifiers
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>();
    let words = words.iter().map(String::as_str).collect::<Vec<_>>();
    match words.as_slice() {
        [] => Ok(JoinKind::Plain),
        ["left"] | ["left", "outer"] => Ok(JoinKind::Left),
        ["right"] | ["right", "outer"] => Ok(JoinKind::Right),
        ["inner"] => Ok(JoinKind::Inner),
        ["outer"] => Ok(JoinKind::Outer),
        ["full"] | ["full", "outer"] => Ok(JoinKind::Full),
        ["cross"] => Ok(JoinKind::Cross),
        _ => Err(ParseError::malformed(format!(
            "unrecognised join modifier `{modifiers}`"
        ))),
    }
}

/// Parses `table [alias] [on predicate | using (columns)]`.
fn join(body: &str, kind: JoinKind, ctx: Context<'_>) -> Result<Join> {
    let (table, rest) = table_ref(Cursor::new(body), ctx, JOIN_TABLE_END, "JOIN")?;
    let rest = rest.as_str();
    let mut join = Join::new(kind, table);

    if rest.is_empty() {
        return Ok(join);
    }
    if let Some(offset) = leading(rest, Keyword::On.as_str()) {
        let predicate = rest[offset..].trim();
        if predicate.is_empty() {
            return Err(ParseError::malformed("ON without a predicate"));
        }
        join.on_predicate = Some(predicate.to_owned());
        return Ok(join);
    }
    if let Some(offset) = leading(rest, Keyword::Using.as_str()) {
        let columns = rest[offset..].trim();
        let inner = columns
            .strip_prefix('(')
            .and_then(|c| c.strip_suffix(')'))
            .filter(|_| matching_close(columns, 0) == Some(columns.len() - 1))
            .ok_or_else(|| ParseError::malformed("USING without a column list"))?;
        join.using = comma_list(inner, "USING")?;
        return Ok(join);
    }
    Err(ParseError::malformed(format!(
        "unexpected `{}` in JOIN",
        ctx.literals.restore(rest)
    )))
}

/// Extracts every JOIN clause before WHERE/GROUP BY/HAVING.
pub(crate) fn joins<'a>(cursor: Cursor<'a>, ctx: Context<'_>) -> Result<(Vec<Join>, Cursor<'a>)> {
    let text = cursor.as_str();
    let end = first_boundary(text, JOINS_END).unwrap_or(text.len());
    let region = &text[..end];
    if region.trim().is_empty() {
        return Ok((Vec::new(), cursor));
    }

    let pieces = split(region, Keyword::Join.as_str()).pieces();
    let Some((first, rest)) = pieces.split_first().filter(|(_, rest)| !rest.is_empty()) else {
        return Err(ParseError::malformed(format!(
            "expected JOIN, found `{}`",
            ctx.literals.restore(region.trim())
        )));
    };

    let mut modifiers = *first;
    let mut joins = Vec::with_capacity(rest.len());
    for (idx, piece) in rest.iter().enumerate() {
        let (body, next) = if idx + 1 == rest.len() {
            (*piece, "")
        } else {
            trailing_modifiers(piece)
        };
        joins.push(join(body, join_kind(modifiers)?, ctx)?);
        modifiers = next;
    }
    trace!(stage = "joins", joins = joins.len(), "extracted");
    Ok((joins, cursor.advance(end)))
}

/// Returns true while a predicate has an unfinished top-level `between` or
/// `case`.
fn is_open(predicate: &str) -> bool {
    count_top_level(predicate, Keyword::Between.as_str())
        > count_top_level(predicate, Keyword::And.as_str())
        || count_top_level(predicate, Keyword::Case.as_str())
            > count_top_level(predicate, Keyword::End.as_str())
}

/// Splits a WHERE/HAVING body on top-level `and`.
///
/// OR-combined predicates stay together in one condition.
fn conditions(body: &str, clause: &str) -> Result<Vec<Condition>> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ParseError::malformed(format!("{clause} without a predicate")));
    }

    let mut spans: Vec<std::ops::Range<usize>> = Vec::new();
    for range in split_ranges(body, Keyword::And.as_str()) {
        match spans.last_mut() {
            Some(last) if is_open(&body[last.clone()]) => last.end = range.end,
            _ => spans.push(range),
        }
    }

    spans
        .into_iter()
        .map(|span| {
            let predicate = body[span].trim();
            if predicate.is_empty() {
                Err(ParseError::malformed(format!("empty predicate in {clause}")))
            } else {
                Ok(Condition::and(predicate))
            }
        })
        .collect()
}

/// Extracts a leading WHERE clause.
pub(crate) fn where_clause(cursor: Cursor<'_>) -> Result<(Vec<Condition>, Cursor<'_>)> {
    let text = cursor.as_str();
    let Some(start) = leading(text, Keyword::Where.as_str()) else {
        return Ok((Vec::new(), cursor));
    };
    let end = first_boundary(&text[start..], &[GROUP_BY, "having", ORDER_BY, "limit"])
        .map_or(text.len(), |idx| start + idx);
    let conditions = conditions(&text[start..end], "WHERE")?;
    trace!(stage = "where", conditions = conditions.len(), "extracted");
    Ok((conditions, cursor.advance(end)))
}

/// Extracts a leading GROUP BY list.
pub(crate) fn group_by(cursor: Cursor<'_>) -> Result<(Vec<String>, Cursor<'_>)> {
    let text = cursor.as_str();
    let Some(start) = leading(text, GROUP_BY) else {
        return Ok((Vec::new(), cursor));
    };
    let end = first_boundary(&text[start..], &["having", ORDER_BY, "limit"])
        .map_or(text.len(), |idx| start + idx);
    let items = comma_list(&text[start..end], "GROUP BY")?;
    trace!(stage = "group_by", items = items.len(), "extracted");
    Ok((items, cursor.advance(end)))
}

/// Extracts a leading HAVING clause, which requires a preceding GROUP BY.
///
/// HAVING over an implicit single group (`select count(*) from t having
/// count(*) > 1`) is rejected as malformed rather than parsed.
pub(crate) fn having(cursor: Cursor<'_>, grouped: bool) -> Result<(Vec<Condition>, Cursor<'_>)> {
    let text = cursor.as_str();
    let Some(start) = leading(text, Keyword::Having.as_str()) else {
        return Ok((Vec::new(), cursor));
    };
    if !grouped {
        return Err(ParseError::malformed("HAVING without GROUP BY"));
    }
    let end = first_boundary(&text[start..], &[ORDER_BY, "limit"])
        .map_or(text.len(), |idx| start + idx);
    let conditions = conditions(&text[start..end], "HAVING")?;
    trace!(stage = "having", conditions = conditions.len(), "extracted");
    Ok((conditions, cursor.advance(end)))
}

/// Fails unless every byte of the statement has been consumed.
pub(crate) fn finish(cursor: Cursor<'_>, ctx: Context<'_>) -> Result<()> {
    if cursor.is_empty() {
        Ok(())
    } else {
        Err(ParseError::malformed(format!(
            "unexpected `{}`",
            ctx.literals.restore(cursor.as_str())
        )))
    }
}
