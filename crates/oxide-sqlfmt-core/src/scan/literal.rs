//! Placeholder substitution for quoted text and removal of comments.

use serde::Serialize;

use crate::parser::{ParseError, Result};

/// Prefix used for placeholders unless the input already contains it.
const DEFAULT_PREFIX: &str = "__sqlfmt_lit_";

/// Quoted literals and identifiers lifted out of a statement.
///
/// Each entry maps a placeholder of the form `<prefix><index>__` to the quoted
/// text it replaced, quotes included. Placeholders consist only of ASCII
/// letters, digits and underscores, so boundary scanning treats them as plain
/// identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiteralTable {
    #[serde(skip)]
    prefix: String,
    entries: Vec<(String, String)>,
}

impl LiteralTable {
    /// Replaces every quoted span of `text` with a placeholder and drops SQL
    /// comments.
    ///
    /// Single quotes delimit string literals; double quotes and backticks
    /// delimit identifiers. Both are protected the same way. `--` comments run
    /// to the end of the line and `/* */` comments to their terminator; each is
    /// replaced by one space. Doubled quotes (`'it''s'`) are not treated as
    /// escapes, they simply produce two adjacent placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedStatement`] for an unterminated quote or
    /// block comment.
    pub fn protect(text: &str) -> Result<(String, Self)> {
        let mut table = Self {
            prefix: unused_prefix(text),
            entries: Vec::new(),
        };
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(c) = text[pos..].chars().next() {
            let rest = &text[pos..];
            match c {
                '\'' | '"' | '`' => {
                    let close = rest[1..].find(c).ok_or_else(|| {
                        ParseError::malformed(format!("unterminated quoted text starting at {pos}"))
                    })?;
                    let end = close + 2;
                    out.push_str(&table.push(&rest[..end]));
                    pos += end;
                }
                '-' if rest.starts_with("--") => {
                    out.push(' ');
                    pos += rest.find('\n').unwrap_or(rest.len());
                }
                '/' if rest.starts_with("/*") => {
                    let close = rest[2..].find("*/").ok_or_else(|| {
                        ParseError::malformed(format!("unterminated comment starting at {pos}"))
                    })?;
                    out.push(' ');
                    pos += close + 4;
                }
                _ => {
                    out.push(c);
                    pos += c.len_utf8();
                }
            }
        }

        Ok((out, table))
    }

    fn push(&mut self, literal: &str) -> String {
        let placeholder = format!("{}{}__", self.prefix, self.entries.len());
        self.entries.push((placeholder.clone(), literal.to_owned()));
        placeholder
    }

    /// Substitutes every placeholder in `text` with its original quoted text.
    ///
    /// `text` is scanned once from the left, so input that happens to follow
    /// a placeholder (`'h'sqlfmt_lit_2__`) is never read as another one.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        if self.entries.is_empty() || !text.contains(&self.prefix) {
            return text.to_owned();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(&self.prefix) {
            out.push_str(&rest[..start]);
            let after = &rest[start + self.prefix.len()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let literal = after[digits..]
                .starts_with("__")
                .then(|| after[..digits].parse::<usize>().ok())
                .flatten()
                .and_then(|idx| self.entries.get(idx));
            match literal {
                Some((_, literal)) => {
                    out.push_str(literal);
                    rest = &after[digits + 2..];
                }
                None => {
                    out.push_str(&self.prefix);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Returns the number of protected spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(placeholder, literal)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, l)| (p.as_str(), l.as_str()))
    }
}

/// Picks a placeholder prefix that does not occur anywhere in `text`.
fn unused_prefix(text: &str) -> String {
    let mut prefix = String::from(DEFAULT_PREFIX);
    while text.contains(&prefix) {
        prefix.insert(0, 'x');
    }
    prefix
}
