//! The Span type: a half-open byte range into a text buffer.

/// A `start..end` byte range into a text buffer.
///
/// Spans never own text. They stay valid only as long as the buffer they
/// index into is not resized, which the borrow checker enforces wherever a
/// span is resolved with [`Span::slice`].
///
/// ## Byte Offsets
///
/// `start` and `end` are byte offsets, not character indices, and always
/// fall on `char` boundaries:
///
/// ```rust
/// use semline::Span;
///
/// let text = "Hello, world!";
/// let span = Span::new(7, 12);
///
/// assert_eq!(span.slice(text), "world");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset where the span starts.
    pub start: usize,
    /// Byte offset where the span ends (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {start} exceeds end {end}");
        Self { start, end }
    }

    /// The length of this span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a range, for slicing.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Shift both ends by `offset`.
    #[must_use]
    pub fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Resolve the span against `text`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds or not on `char` boundaries.
    #[must_use]
    pub fn slice(self, text: &str) -> &str {
        &text[self.range()]
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Self {
            start: m.start(),
            end: m.end(),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
