//! Keyword set and whole-word keyword lookup.

/// `order by`, matched as one phrase on whitespace-normalized text.
pub const ORDER_BY: &str = "order by";

/// `group by`, matched as one phrase on whitespace-normalized text.
pub const GROUP_BY: &str = "group by";

/// SQL keywords recognised for boundary detection and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Query clauses
    Select,
    From,
    Where,
    Group,
    Order,
    By,
    Having,
    Limit,
    Offset,
    Distinct,
    As,

    // Joins
    Join,
    Left,
    Right,
    Inner,
    Outer,
    Full,
    Cross,
    On,
    Using,

    // Predicates
    And,
    Or,
    Not,
    In,
    Like,
    Between,
    Is,
    Null,

    // Expressions
    Case,
    When,
    Then,
    End,
    Partition,
    Over,

    // Ordering
    Asc,
    Desc,

    // Statement kinds
    Set,
    Update,
    Insert,
    Delete,
    Create,
}

impl Keyword {
    /// Attempts to parse a keyword from a word (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Some(Self::Select),
            "from" => Some(Self::From),
            "where" => Some(Self::Where),
            "group" => Some(Self::Group),
            "order" => Some(Self::Order),
            "by" => Some(Self::By),
            "having" => Some(Self::Having),
            "limit" => Some(Self::Limit),
            "offset" => Some(Self::Offset),
            "distinct" => Some(Self::Distinct),
            "as" => Some(Self::As),
            "join" => Some(Self::Join),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "inner" => Some(Self::Inner),
            "outer" => Some(Self::Outer),
            "full" => Some(Self::Full),
            "cross" => Some(Self::Cross),
            "on" => Some(Self::On),
            "using" => Some(Self::Using),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            "in" => Some(Self::In),
            "like" => Some(Self::Like),
            "between" => Some(Self::Between),
            "is" => Some(Self::Is),
            "null" => Some(Self::Null),
            "case" => Some(Self::Case),
            "when" => Some(Self::When),
            "then" => Some(Self::Then),
            "end" => Some(Self::End),
            "partition" => Some(Self::Partition),
            "over" => Some(Self::Over),
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            "set" => Some(Self::Set),
            "update" => Some(Self::Update),
            "insert" => Some(Self::Insert),
            "delete" => Some(Self::Delete),
            "create" => Some(Self::Create),
            _ => None,
        }
    }

    /// Returns the keyword as it is searched for and rendered by default.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::From => "from",
            Self::Where => "where",
            Self::Group => "group",
            Self::Order => "order",
            Self::By => "by",
            Self::Having => "having",
            Self::Limit => "limit",
            Self::Offset => "offset",
            Self::Distinct => "distinct",
            Self::As => "as",
            Self::Join => "join",
            Self::Left => "left",
            Self::Right => "right",
            Self::Inner => "inner",
            Self::Outer => "outer",
            Self::Full => "full",
            Self::Cross => "cross",
            Self::On => "on",
            Self::Using => "using",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::In => "in",
            Self::Like => "like",
            Self::Between => "between",
            Self::Is => "is",
            Self::Null => "null",
            Self::Case => "case",
            Self::When => "when",
            Self::Then => "then",
            Self::End => "end",
            Self::Partition => "partition",
            Self::Over => "over",
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::Set => "set",
            Self::Update => "update",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Create => "create",
        }
    }

    /// Returns true for the words that may precede `join`.
    #[must_use]
    pub const fn is_join_modifier(&self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::Inner | Self::Outer | Self::Full | Self::Cross
        )
    }

    /// Returns true for the leading words of statements other than SELECT.
    #[must_use]
    pub const fn is_statement_kind(&self) -> bool {
        matches!(
            self,
            Self::Update | Self::Insert | Self::Delete | Self::Create
        )
    }
}

/// Bytes that may sit directly before or after a keyword.
const fn is_boundary(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'(' || byte == b')'
}

/// Byte offsets of every whole-word occurrence of `needle`, in source order.
///
/// Matching is ASCII case-insensitive, so offsets are valid in `text` itself.
pub(crate) fn matches(text: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack = text.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    let bytes = haystack.as_bytes();

    haystack
        .match_indices(needle.as_str())
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let end = idx + needle.len();
            let before = idx == 0 || is_boundary(bytes[idx - 1]);
            let after = end == bytes.len() || is_boundary(bytes[end]);
            before && after
        })
        .collect()
}

/// Like [`matches`], restricted to occurrences outside any parentheses.
fn top_level_matches(text: &str, needle: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0_i32;
    let mut pos = 0;

    matches(text, needle)
        .into_iter()
        .filter(|&idx| {
            while pos < idx {
                match bytes[pos] {
                    b'(' => depth += 1,
                    b')' => depth -= 1,
                    _ => {}
                }
                pos += 1;
            }
            depth == 0
        })
        .collect()
}

fn select_occurrence(found: &[usize], occurrence: isize) -> Option<usize> {
    match occurrence {
        0 => None,
        n if n > 0 => found.get(n.unsigned_abs() - 1).copied(),
        n => found
            .len()
            .checked_sub(n.unsigned_abs())
            .and_then(|idx| found.get(idx).copied()),
    }
}

/// Finds the `occurrence`-th whole-word match of `keyword` in `text`.
///
/// A positive `occurrence` counts from the start (`1` is the first match), a
/// negative one from the end (`-1` is the last match). Zero never matches.
#[must_use]
pub fn find(text: &str, keyword: &str, occurrence: isize) -> Option<usize> {
    select_occurrence(&matches(text, keyword), occurrence)
}

/// Like [`find`], ignoring matches nested inside parentheses.
#[must_use]
pub fn find_top_level(text: &str, keyword: &str, occurrence: isize) -> Option<usize> {
    select_occurrence(&top_level_matches(text, keyword), occurrence)
}

/// If `text` starts with `keyword` as a whole word, returns the offset just
/// past it.
#[must_use]
pub fn leading(text: &str, keyword: &str) -> Option<usize> {
    let len = keyword.len();
    let head = text.get(..len)?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    match text.as_bytes().get(len) {
        None => Some(len),
        Some(&b) if is_boundary(b) => Some(len),
        Some(_) => None,
    }
}

/// Offset of the earliest top-level occurrence of any of `keywords`.
pub(crate) fn first_boundary(text: &str, keywords: &[&str]) -> Option<usize> {
    keywords
        .iter()
        .filter_map(|kw| find_top_level(text, kw, 1))
        .min()
}

/// Number of whole-word occurrences of `keyword` outside any parentheses.
pub(crate) fn count_top_level(text: &str, keyword: &str) -> usize {
    top_level_matches(text, keyword).len()
}
