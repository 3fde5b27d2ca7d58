//! Structured representation of a parsed SELECT statement.

mod statement;

pub use statement::{Combinator, Condition, Field, Join, JoinKind, Statement, Table};
