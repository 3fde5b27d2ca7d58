//! SQL Parser
//!
//! A tokenizer-free clause extractor. The statement text is cut into clauses
//! by a fixed pipeline of stages, each of which consumes a structurally bounded
//! span from a shrinking cursor.

mod cursor;
mod error;
mod parser;
mod stages;

pub use cursor::Cursor;
pub use error::{ParseError, Result};
pub use parser::{Parser, MAX_NESTING_DEPTH};
