//! The shrinking view of a statement that extraction stages consume.

/// The unconsumed part of a statement.
///
/// A cursor can only be narrowed: [`Cursor::advance`] drops a prefix and
/// [`Cursor::truncate`] drops a suffix. The text is kept trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    text: &'a str,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text: text.trim() }
    }

    /// Returns the remaining text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// Returns the length of the remaining text in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true once everything has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Drops the first `offset` bytes.
    #[must_use]
    pub fn advance(self, offset: usize) -> Self {
        Self::new(&self.text[offset.min(self.text.len())..])
    }

    /// Keeps only the first `offset` bytes.
    #[must_use]
    pub fn truncate(self, offset: usize) -> Self {
        Self::new(&self.text[..offset.min(self.text.len())])
    }

    /// Drops a leading `,` if there is one.
    #[must_use]
    pub fn strip_comma(self) -> Option<Self> {
        self.text.strip_prefix(',').map(Self::new)
    }
}
