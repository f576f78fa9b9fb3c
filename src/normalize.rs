//! Whitespace collapsing.
//!
//! Each normalizer replaces every maximal run matched by its pattern with a
//! fixed replacement:
//!
//! | Preset | Collapses | Into |
//! |--------|-----------|------|
//! | [`line_breaks`](WhitespaceNormalizer::line_breaks) | runs of LF, CR, U+2028 | `" "` |
//! | [`wrapped_lines`](WhitespaceNormalizer::wrapped_lines) | runs holding a break | `" "` |
//! | [`visible_whitespace`](WhitespaceNormalizer::visible_whitespace) | any run | `"-"` |
//!
//! Every preset is idempotent: the replacement can't start a new run that
//! the pattern would match differently.

use std::borrow::Cow;

use crate::{Pattern, Result};

/// Runs of the characters `mdline` unwraps.
pub const LINE_BREAK_RUN: &str = "[\n\r\u{2028}]+";

/// A whitespace run containing at least one mandatory line break.
pub const WRAPPED_LINE_RUN: &str = r"\s*[\n\x0B\x0C\r\u{85}\u{2028}]\s*";

/// Any whitespace run.
pub const WHITESPACE_RUN: &str = r"\s+";

/// Collapses runs of whitespace into a single replacement.
///
/// ## Example
///
/// ```rust
/// use semline::WhitespaceNormalizer;
///
/// let unwrap = WhitespaceNormalizer::line_breaks().unwrap();
/// assert_eq!(unwrap.collapse("one\r\ntwo\n\nthree").unwrap(), "one two three");
/// ```
#[derive(Debug, Clone)]
pub struct WhitespaceNormalizer {
    pattern: Pattern,
    replacement: &'static str,
}

impl WhitespaceNormalizer {
    /// Build a normalizer from a pattern and its replacement.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PatternCompile`] if `pattern` is malformed.
    pub fn new(pattern: &str, replacement: &'static str) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::compile(pattern)?,
            replacement,
        })
    }

    /// LF, CR, and U+2028 runs become one space.
    ///
    /// # Errors
    ///
    /// Only if the built-in pattern fails to compile.
    pub fn line_breaks() -> Result<Self> {
        Self::new(LINE_BREAK_RUN, " ")
    }

    /// Whitespace runs spanning a line break become one space; runs within
    /// a line are left alone.
    ///
    /// # Errors
    ///
    /// Only if the built-in pattern fails to compile.
    pub fn wrapped_lines() -> Result<Self> {
        Self::new(WRAPPED_LINE_RUN, " ")
    }

    /// Any whitespace run becomes one hyphen.
    ///
    /// # Errors
    ///
    /// Only if the built-in pattern fails to compile.
    pub fn visible_whitespace() -> Result<Self> {
        Self::new(WHITESPACE_RUN, "-")
    }

    /// The pattern whose matches are collapsed.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Collapse every run in `text`.
    ///
    /// Borrows `text` unchanged when there is nothing to collapse.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Allocation`] if the output cannot be allocated.
    pub fn collapse<'t>(&self, text: &'t str) -> Result<Cow<'t, str>> {
        self.pattern.replace_all(text, self.replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_only_touches_breaks() {
        let n = WhitespaceNormalizer::line_breaks().unwrap();
        assert_eq!(n.collapse("a\tb  c\u{2028}\u{2028}d").unwrap(), "a\tb  c d");
        // U+2029 is a paragraph mark, not a line break
        assert_eq!(n.collapse("a\u{2029}b").unwrap(), "a\u{2029}b");
    }

    #[test]
    fn test_no_match_is_borrowed() {
        let n = WhitespaceNormalizer::line_breaks().unwrap();
        assert!(matches!(n.collapse("flat text").unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wrapped_lines_keeps_inline_spacing() {
        let n = WhitespaceNormalizer::wrapped_lines().unwrap();
        assert_eq!(
            n.collapse("One.  Two\n   three \r\n four.").unwrap(),
            "One.  Two three four."
        );
    }

    #[test]
    fn test_visible_whitespace() {
        let n = WhitespaceNormalizer::visible_whitespace().unwrap();
        assert_eq!(n.collapse("a \t b\nc").unwrap(), "a-b-c");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        for n in [
            WhitespaceNormalizer::line_breaks().unwrap(),
            WhitespaceNormalizer::wrapped_lines().unwrap(),
            WhitespaceNormalizer::visible_whitespace().unwrap(),
        ] {
            let text = " a\n\n b \r\n\tc\u{2028} ";
            let once = n.collapse(text).unwrap().into_owned();
            let twice = n.collapse(&once).unwrap().into_owned();
            assert_eq!(once, twice, "pattern {}", n.pattern().as_str());
        }
    }
}
