//! Bracket-depth-aware splitting and related text helpers.

use std::ops::Range;

/// The result of [`split`].
///
/// `segments` holds every piece that ends at a separator; `tail` is whatever
/// follows the last separator (the whole input when none was found). All
/// pieces are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// Pieces terminated by a separator.
    pub segments: Vec<&'a str>,
    /// Text after the final separator.
    pub tail: &'a str,
}

impl<'a> Split<'a> {
    /// Returns every piece, the tail included.
    #[must_use]
    pub fn pieces(self) -> Vec<&'a str> {
        let mut pieces = self.segments;
        pieces.push(self.tail);
        pieces
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn is_keyword_boundary(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'(' || byte == b')'
}

/// Byte ranges of the pieces between top-level `separator` occurrences,
/// untrimmed, always ending with the tail.
///
/// Word-like separators (`and`, `join`) must sit on keyword boundaries and
/// match ASCII case-insensitively; punctuation separators match anywhere at
/// depth zero.
pub(crate) fn split_ranges(text: &str, separator: &str) -> Vec<Range<usize>> {
    let sep = separator.to_ascii_lowercase();
    let sep = sep.as_bytes();
    let bytes = text.as_bytes();
    let word_like = sep.first().is_some_and(|&b| is_word_byte(b))
        || sep.last().is_some_and(|&b| is_word_byte(b));

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut depth = 0_i32;
    let mut pos = 0;

    while pos < bytes.len() {
        if depth == 0 && !sep.is_empty() && bytes[pos..].len() >= sep.len() {
            let candidate = &bytes[pos..pos + sep.len()];
            let end = pos + sep.len();
            let matched = candidate.eq_ignore_ascii_case(sep)
                && (!word_like
                    || ((pos == 0 || is_keyword_boundary(bytes[pos - 1]))
                        && (end == bytes.len() || is_keyword_boundary(bytes[end]))));
            if matched {
                ranges.push(start..pos);
                start = end;
                pos = end;
                continue;
            }
        }
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }

    ranges.push(start..bytes.len());
    ranges
}

/// Splits `text` on `separator`, skipping separators nested in parentheses.
#[must_use]
pub fn split<'a>(text: &'a str, separator: &str) -> Split<'a> {
    let mut pieces: Vec<&str> = split_ranges(text, separator)
        .into_iter()
        .map(|range| text[range].trim())
        .collect();
    let tail = pieces.pop().unwrap_or_default();
    Split {
        segments: pieces,
        tail,
    }
}

/// Returns true if every `(` has a matching `)` and no `)` comes first.
#[must_use]
pub fn is_balanced(text: &str) -> bool {
    let mut depth = 0_i32;
    for byte in text.bytes() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Offset of the `)` closing the `(` at `open`.
#[must_use]
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0_usize;
    for (idx, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Offset of the first top-level occurrence of `needle`.
#[must_use]
pub fn top_level_char(text: &str, needle: u8) -> Option<usize> {
    let mut depth = 0_i32;
    for (idx, &byte) in text.as_bytes().iter().enumerate() {
        if depth == 0 && byte == needle {
            return Some(idx);
        }
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// End offset of the leading token: the first top-level space or comma.
///
/// Parenthesised spans are part of the token, so `f(a, b) x` yields `f(a, b)`.
#[must_use]
pub fn token_end(text: &str) -> usize {
    let mut depth = 0_i32;
    for (idx, &byte) in text.as_bytes().iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b' ' | b',' if depth == 0 => return idx,
            _ => {}
        }
    }
    text.len()
}

/// Collapses whitespace runs to one space, trims, and drops one trailing `;`.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.strip_suffix(';') {
        Some(stripped) => stripped.trim_end().to_owned(),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_comma() {
        let split = split("a, b ,c", ",");
        assert_eq!(split.segments, vec!["a", "b"]);
        assert_eq!(split.tail, "c");
    }

    #[test]
    fn test_split_skips_nested_commas() {
        let pieces = split("a, max(x, y), (select b, c from t) d", ",").pieces();
        assert_eq!(pieces, vec!["a", "max(x, y)", "(select b, c from t) d"]);
    }

    #[test]
    fn test_split_without_separator() {
        let split = split("a = 1", "and");
        assert!(split.segments.is_empty());
        assert_eq!(split.tail, "a = 1");
    }

    #[test]
    fn test_split_keyword_needs_boundaries() {
        let pieces = split("brand = 1 AND (x and y) and band = 2", "and").pieces();
        assert_eq!(pieces, vec!["brand = 1", "(x and y)", "band = 2"]);
    }

    #[test]
    fn test_split_ranges_cover_input() {
        let text = "t1 join t2 on a = b join t3";
        let ranges = split_ranges(text, "join");
        assert_eq!(ranges, vec![0..3, 7..20, 24..27]);
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("f(a, (b))"));
        assert!(is_balanced("no brackets"));
        assert!(!is_balanced("f(a"));
        assert!(!is_balanced(")("));
    }

    #[test]
    fn test_matching_close() {
        let text = "(select max(x) from t) y";
        assert_eq!(matching_close(text, 0), Some(21));
        assert_eq!(matching_close(text, 1), None);
        assert_eq!(matching_close("(a", 0), None);
    }

    #[test]
    fn test_top_level_char() {
        assert_eq!(top_level_char("f(a, b), c", b','), Some(7));
        assert_eq!(top_level_char("f(a, b)", b','), None);
    }

    #[test]
    fn test_token_end() {
        assert_eq!(token_end("users u where"), 5);
        assert_eq!(token_end("a, b"), 1);
        assert_eq!(token_end("generate_series(1, 3) g"), 21);
        assert_eq!(token_end("t"), 1);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  select a,\n\t b\r\nfrom  t ;  "),
            "select a, b from t"
        );
        assert_eq!(normalize_whitespace(" \n "), "");
    }
}
