//! Raw-text scanning primitives.
//!
//! The parser works directly on the character stream instead of a token
//! stream. These helpers provide the three things that make that workable:
//! quoted text is swapped for opaque placeholders, keywords are only matched on
//! word boundaries, and splitting ignores separators nested in parentheses.

mod keyword;
mod literal;
mod split;

pub use keyword::{find, find_top_level, leading, Keyword, GROUP_BY, ORDER_BY};
pub use literal::LiteralTable;
pub use split::{
    is_balanced, matching_close, normalize_whitespace, split, token_end, top_level_char, Split,
};

pub(crate) use keyword::{count_top_level, first_boundary};
pub(crate) use split::split_ranges;
