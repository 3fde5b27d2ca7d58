//! Formatting options.

/// Letter case used for the keywords the printer emits.
///
/// Expressions and predicates are always reproduced as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordCase {
    /// `select`, `from`, ... (default).
    #[default]
    Lower,
    /// `SELECT`, `FROM`, ...
    Upper,
}

impl KeywordCase {
    /// Applies this case to a keyword.
    #[must_use]
    pub fn apply(self, keyword: &str) -> String {
        match self {
            Self::Lower => keyword.to_ascii_lowercase(),
            Self::Upper => keyword.to_ascii_uppercase(),
        }
    }
}

/// Configuration for how a statement is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Case of emitted keywords.
    pub keyword_case: KeywordCase,
    /// Column at which GROUP BY and ORDER BY lists wrap.
    pub max_line_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            keyword_case: KeywordCase::Lower,
            max_line_width: 80,
        }
    }
}

impl FormatOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword case.
    #[must_use]
    pub const fn keyword_case(mut self, case: KeywordCase) -> Self {
        self.keyword_case = case;
        self
    }

    /// Sets the wrapping column for GROUP BY and ORDER BY lists.
    #[must_use]
    pub const fn max_line_width(mut self, width: usize) -> Self {
        self.max_line_width = width;
        self
    }
}
