//! SQL statement AST types.
//!
//! Expressions and predicates are kept as opaque text. Any placeholder left
//! in them by literal protection is resolved through [`Statement::literals`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::options::FormatOptions;
use crate::printer::Printer;
use crate::scan::LiteralTable;

/// How a condition attaches to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    /// `AND` (default).
    #[default]
    And,
    /// `OR`.
    Or,
}

impl Combinator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// One predicate of a WHERE or HAVING clause.
///
/// The combinator of the first condition in a clause is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// How this condition joins the previous one.
    pub combinator: Combinator,
    /// The predicate text.
    pub predicate: String,
}

impl Condition {
    /// Creates an AND-combined condition.
    #[must_use]
    pub fn and(predicate: impl Into<String>) -> Self {
        Self {
            combinator: Combinator::And,
            predicate: predicate.into(),
        }
    }

    /// Creates an OR-combined condition.
    #[must_use]
    pub fn or(predicate: impl Into<String>) -> Self {
        Self {
            combinator: Combinator::Or,
            predicate: predicate.into(),
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    /// Bare `JOIN`.
    #[default]
    Plain,
    /// `LEFT [OUTER] JOIN`.
    Left,
    /// `RIGHT [OUTER] JOIN`.
    Right,
    /// `INNER JOIN`.
    Inner,
    /// Bare `OUTER JOIN`.
    Outer,
    /// `FULL [OUTER] JOIN`.
    Full,
    /// `CROSS JOIN`, also used for comma-separated FROM items.
    Cross,
}

impl JoinKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "join",
            Self::Left => "left join",
            Self::Right => "right join",
            Self::Inner => "inner join",
            Self::Outer => "outer join",
            Self::Full => "full join",
            Self::Cross => "cross join",
        }
    }
}

/// A table reference in a FROM or JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    /// A table, view or table-valued function call.
    Named {
        /// Table name, possibly schema-qualified.
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// A parenthesised SELECT.
    Subquery {
        /// The subquery.
        query: Box<Statement>,
        /// Alias.
        alias: Option<String>,
    },
}

impl Table {
    /// Creates a named table reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            alias: None,
        }
    }

    /// Creates a subquery table reference.
    #[must_use]
    pub fn subquery(query: Statement) -> Self {
        Self::Subquery {
            query: Box::new(query),
            alias: None,
        }
    }

    /// Sets the alias of this table reference.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        let alias = Some(alias.into());
        match self {
            Self::Named { name, .. } => Self::Named { name, alias },
            Self::Subquery { query, .. } => Self::Subquery { query, alias },
        }
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias_name(&self) -> Option<&str> {
        match self {
            Self::Named { alias, .. } | Self::Subquery { alias, .. } => alias.as_deref(),
        }
    }

    /// Returns the table name for named references.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Subquery { .. } => None,
        }
    }

    /// Returns the nested statement for subquery references.
    #[must_use]
    pub fn query(&self) -> Option<&Statement> {
        match self {
            Self::Named { .. } => None,
            Self::Subquery { query, .. } => Some(query),
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    /// The type of join.
    pub kind: JoinKind,
    /// The joined table.
    pub table: Table,
    /// The ON predicate.
    pub on_predicate: Option<String>,
    /// USING columns (alternative to ON).
    pub using: Vec<String>,
}

impl Join {
    /// Creates a join with no constraint.
    #[must_use]
    pub const fn new(kind: JoinKind, table: Table) -> Self {
        Self {
            kind,
            table,
            on_predicate: None,
            using: Vec::new(),
        }
    }

    /// Sets the ON predicate.
    #[must_use]
    pub fn on(mut self, predicate: impl Into<String>) -> Self {
        self.on_predicate = Some(predicate.into());
        self
    }
}

/// A column in the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// The expression, verbatim.
    pub expression: String,
    /// Column alias.
    pub alias: Option<String>,
}

impl Field {
    /// Creates a field without alias.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    /// Creates a field with an alias.
    #[must_use]
    pub fn with_alias(expression: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: Some(alias.into()),
        }
    }
}

/// A parsed SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The SELECT list.
    pub fields: Vec<Field>,
    /// The FROM clause.
    pub from: Table,
    /// JOIN clauses in source order.
    pub joins: Vec<Join>,
    /// WHERE conditions.
    pub where_clause: Vec<Condition>,
    /// GROUP BY expressions.
    pub group_by: Vec<String>,
    /// HAVING conditions.
    pub having: Vec<Condition>,
    /// ORDER BY expressions, direction included.
    pub order_by: Vec<String>,
    /// LIMIT expression, including any OFFSET that follows it.
    pub limit: Option<String>,
    /// OFFSET expression when it is not part of `limit`.
    pub offset: Option<String>,
    /// Quoted text lifted out before parsing, shared by every nested
    /// statement of one parse.
    pub literals: Arc<LiteralTable>,
    /// 0 for the outermost statement, parent + 1 for subqueries.
    pub nesting_depth: usize,
}

impl Statement {
    /// Creates a statement selecting `fields` from `from`.
    #[must_use]
    pub fn new(fields: Vec<Field>, from: Table) -> Self {
        Self {
            distinct: false,
            fields,
            from,
            joins: Vec::new(),
            where_clause: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            literals: Arc::default(),
            nesting_depth: 0,
        }
    }

    /// Substitutes literal placeholders in `text` with their original text.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        self.literals.restore(text)
    }

    /// Renders the statement with the default [`FormatOptions`].
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&FormatOptions::default())
    }

    /// Renders the statement as aligned SQL text.
    #[must_use]
    pub fn render_with(&self, options: &FormatOptions) -> String {
        Printer::new(options, self.nesting_depth).print(self)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
