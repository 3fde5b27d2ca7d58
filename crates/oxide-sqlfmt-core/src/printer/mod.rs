//! Aligned SQL rendering.
//!
//! Clause keywords are right-aligned in a fixed-width column so that the
//! clause bodies start on the same column:
//!
//! ```text
//! select a,
//!        b
//!   from t1 x
//!   left join t2 y
//!     on x.id = y.id
//!  where x.v = 1
//!    and y.w = 2
//! ```

use crate::ast::{Condition, Field, Join, Statement, Table};
use crate::options::FormatOptions;

/// Width of the keyword column; `select` and `having` fill it exactly.
const KEYWORD_WIDTH: usize = 6;

/// Indentation added per subquery level: the keyword column, a space and `(`.
const NEST_INDENT: usize = KEYWORD_WIDTH + 2;

/// Renders statements according to a set of [`FormatOptions`].
pub(crate) struct Printer<'o> {
    options: &'o FormatOptions,
    root_depth: usize,
}

impl<'o> Printer<'o> {
    /// Creates a printer whose output starts at `root_depth`.
    pub(crate) const fn new(options: &'o FormatOptions, root_depth: usize) -> Self {
        Self {
            options,
            root_depth,
        }
    }

    /// Renders `statement` and restores its protected literals.
    pub(crate) fn print(&self, statement: &Statement) -> String {
        let mut lines = Vec::new();
        self.statement(statement, &mut lines);
        statement.restore(&lines.join("\n"))
    }

    fn keyword(&self, keyword: &str) -> String {
        self.options.keyword_case.apply(keyword)
    }

    fn base(&self, statement: &Statement) -> String {
        let level = statement.nesting_depth.saturating_sub(self.root_depth);
        " ".repeat(level * NEST_INDENT)
    }

    /// `base` followed by `keyword` right-aligned in the keyword column.
    fn head(&self, base: &str, keyword: &str) -> String {
        format!(
            "{base}{:>width$}",
            self.keyword(keyword),
            width = KEYWORD_WIDTH
        )
    }

    fn statement(&self, statement: &Statement, lines: &mut Vec<String>) {
        let base = self.base(statement);
        self.select(statement, &base, lines);
        self.table(
            &statement.from,
            &format!("{} ", self.head(&base, "from")),
            lines,
        );
        for join in &statement.joins {
            self.join(join, &base, lines);
        }
        self.conditions(&base, "where", &statement.where_clause, lines);
        self.list(statement, &base, "group", &statement.group_by, lines);
        self.conditions(&base, "having", &statement.having, lines);
        self.list(statement, &base, "order", &statement.order_by, lines);
        // A standalone OFFSET only parses back as one when it precedes LIMIT.
        if let Some(offset) = &statement.offset {
            lines.push(format!("{} {offset}", self.head(&base, "offset")));
        }
        if let Some(limit) = &statement.limit {
            lines.push(format!("{} {limit}", self.head(&base, "limit")));
        }
    }

    fn field(&self, field: &Field) -> String {
        match &field.alias {
            Some(alias) => format!("{} {} {alias}", field.expression, self.keyword("as")),
            None => field.expression.clone(),
        }
    }

    /// One line when at most one field is aliased, otherwise one field per
    /// line with the aliases aligned.
    fn select(&self, statement: &Statement, base: &str, lines: &mut Vec<String>) {
        let mut head = self.head(base, "select");
        if statement.distinct {
            head.push(' ');
            head.push_str(&self.keyword("distinct"));
        }

        let aliased = statement
            .fields
            .iter()
            .filter(|field| field.alias.is_some())
            .map(|field| field.expression.chars().count());
        if aliased.clone().count() <= 1 {
            let list = statement
                .fields
                .iter()
                .map(|field| self.field(field))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("{head} {list}"));
            return;
        }

        let width = aliased.max().unwrap_or_default();
        let indent = " ".repeat(head.chars().count() + 1);
        let as_keyword = self.keyword("as");
        let count = statement.fields.len();
        for (idx, field) in statement.fields.iter().enumerate() {
            let text = match &field.alias {
                Some(alias) => format!("{:<width$} {as_keyword} {alias}", field.expression),
                None => field.expression.clone(),
            };
            let prefix = if idx == 0 {
                format!("{head} ")
            } else {
                indent.clone()
            };
            let comma = if idx + 1 == count { "" } else { "," };
            lines.push(format!("{prefix}{text}{comma}"));
        }
    }

    /// Renders `table` after `prefix`, which already holds the clause keyword.
    fn table(&self, table: &Table, prefix: &str, lines: &mut Vec<String>) {
        let alias = |alias: Option<&str>| alias.map_or_else(String::new, |a| format!(" {a}"));
        match table {
            Table::Named { name, alias: a } => {
                lines.push(format!("{prefix}{name}{}", alias(a.as_deref())));
            }
            Table::Subquery { query, alias: a } => {
                let mut inner = Vec::new();
                self.statement(query, &mut inner);
                let mut inner = inner.into_iter();
                let first = inner.next().unwrap_or_default();
                lines.push(format!("{prefix}({}", first.trim_start()));
                lines.extend(inner);
                if let Some(last) = lines.last_mut() {
                    last.push(')');
                    last.push_str(&alias(a.as_deref()));
                }
            }
        }
    }

    fn join(&self, join: &Join, base: &str, lines: &mut Vec<String>) {
        let words = self.keyword(join.kind.as_str());
        let (first, rest) = words.split_once(' ').unwrap_or((words.as_str(), ""));
        let mut head = format!("{base}{first:>width$}", width = KEYWORD_WIDTH);
        if !rest.is_empty() {
            head.push(' ');
            head.push_str(rest);
        }

        match &join.table {
            Table::Named { .. } => self.table(&join.table, &format!("{head} "), lines),
            Table::Subquery { .. } => {
                lines.push(head);
                let prefix = format!("{base}{}", " ".repeat(NEST_INDENT - 1));
                self.table(&join.table, &prefix, lines);
            }
        }

        if let Some(predicate) = &join.on_predicate {
            lines.push(format!("{} {predicate}", self.head(base, "on")));
        }
        if !join.using.is_empty() {
            lines.push(format!(
                "{} ({})",
                self.head(base, "using"),
                join.using.join(", ")
            ));
        }
    }

    fn conditions(
        &self,
        base: &str,
        keyword: &str,
        conditions: &[Condition],
        lines: &mut Vec<String>,
    ) {
        for (idx, condition) in conditions.iter().enumerate() {
            let keyword = if idx == 0 {
                keyword
            } else {
                condition.combinator.as_str()
            };
            lines.push(format!(
                "{} {}",
                self.head(base, keyword),
                condition.predicate
            ));
        }
    }

    /// `group by` / `order by` lists, wrapped at `max_line_width`.
    fn list(
        &self,
        statement: &Statement,
        base: &str,
        keyword: &str,
        items: &[String],
        lines: &mut Vec<String>,
    ) {
        if items.is_empty() {
            return;
        }
        let mut line = format!("{} {} ", self.head(base, keyword), self.keyword("by"));
        let indent = " ".repeat(line.chars().count());
        let mut width = indent.len();
        let measure = |item: &str| statement.restore(item).chars().count();

        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                if width + 2 + measure(item) > self.options.max_line_width {
                    line.push(',');
                    lines.push(std::mem::replace(&mut line, indent.clone()));
                    width = indent.len();
                } else {
                    line.push_str(", ");
                    width += 2;
                }
            }
            line.push_str(item);
            width += measure(item);
        }
        lines.push(line);
    }
}
