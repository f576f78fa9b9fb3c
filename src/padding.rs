//! Leading and trailing padding of a span.
//!
//! ```text
//! "\n  Hello world.  \u{2029}"
//!  ^^^^            ^^^^^^^^
//!  leading         trailing
//!  len 3           len 5 (U+2029 is 3 bytes), para_sep
//!  breaks 1
//! ```
//!
//! Stats are computed over a borrowed slice: the span itself is never
//! mutated, and paragraph-separator detection looks at the matched run only.

use crate::{Pattern, Result, Segmenter, Span};

/// Whitespace at the start of a span.
pub const LEADING_PADDING: &str = r"^\s*";

/// Whitespace at the end of a span.
pub const TRAILING_PADDING: &str = r"\s*$";

/// Hard breaks at which a whitespace run becomes a paragraph break.
pub const PARAGRAPH_BREAKS: usize = 2;

/// U+2029 PARAGRAPH SEPARATOR.
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Summary of a whitespace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    /// Matched length in bytes.
    pub len: usize,
    /// Hard line breaks in the run, saturating at [`PARAGRAPH_BREAKS`].
    pub breaks: usize,
    /// Whether the run contains U+2029.
    pub para_sep: bool,
}

impl MatchStats {
    /// Stats of the whole of `run`.
    ///
    /// Breaks are counted with `line`, which should be a
    /// [`SegmentKind::Line`](crate::SegmentKind::Line) segmenter.
    pub fn of_run(run: &str, line: &Segmenter) -> Self {
        if run.is_empty() {
            return Self::default();
        }
        Self {
            len: run.len(),
            breaks: line.count_hard_breaks(run, PARAGRAPH_BREAKS),
            para_sep: run.contains(PARAGRAPH_SEPARATOR),
        }
    }

    /// Whether the run separates paragraphs.
    pub fn is_paragraph_break(&self) -> bool {
        self.para_sep || self.breaks >= PARAGRAPH_BREAKS
    }
}

/// Measures padding so callers can exclude it from emitted text.
///
/// ## Example
///
/// ```rust
/// use semline::{Locale, PaddingStripper, SegmentKind, Segmenter, Span};
///
/// let line = Segmenter::new(SegmentKind::Line, &Locale::posix());
/// let padding = PaddingStripper::new().unwrap();
///
/// let text = "  Hello world.  ";
/// let inner = padding.strip(text, Span::new(0, text.len())).unwrap();
/// assert_eq!(inner.slice(text), "Hello world.");
/// assert_eq!(padding.leading(text, &line).len, 2);
/// ```
#[derive(Debug, Clone)]
pub struct PaddingStripper {
    leading: Pattern,
    trailing: Pattern,
}

impl PaddingStripper {
    /// Compile the padding patterns.
    ///
    /// # Errors
    ///
    /// Only if a built-in pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            leading: Pattern::compile(LEADING_PADDING)?,
            trailing: Pattern::compile(TRAILING_PADDING)?,
        })
    }

    /// Stats of the first match of `pattern` in `text`.
    ///
    /// A missing or zero-width match reports all zeros.
    pub fn match_stats(pattern: &Pattern, text: &str, line: &Segmenter) -> MatchStats {
        match pattern.find_first(text, 0) {
            Some(m) if !m.is_empty() => MatchStats::of_run(m.slice(text), line),
            _ => MatchStats::default(),
        }
    }

    /// Stats of the whitespace at the start of `text`.
    pub fn leading(&self, text: &str, line: &Segmenter) -> MatchStats {
        Self::match_stats(&self.leading, text, line)
    }

    /// Stats of the whitespace at the end of `text`.
    pub fn trailing(&self, text: &str, line: &Segmenter) -> MatchStats {
        Self::match_stats(&self.trailing, text, line)
    }

    /// `span` without its padding, or `None` if it is all padding.
    ///
    /// Only match lengths are needed here, so no breaks are counted.
    pub fn strip(&self, text: &str, span: Span) -> Option<Span> {
        let slice = span.slice(text);
        let leading = match_len(&self.leading, slice);
        let trailing = match_len(&self.trailing, slice);
        (span.len() > leading + trailing)
            .then(|| Span::new(span.start + leading, span.end - trailing))
    }
}

fn match_len(pattern: &Pattern, text: &str) -> usize {
    pattern.find_first(text, 0).map_or(0, |m| m.len())
}
