//! Boundary iteration with rule-status tags.
//!
//! ## Two Kinds of Boundary
//!
//! ```text
//! LINE:      "a \n\nb"        positions 3 (hard), 4 (hard), 5 (soft)
//! SENTENCE:  "Hi. Bye"        positions 4 (term), 7 (none)
//! ```
//!
//! Line boundaries come from UAX #14 via `icu_segmenter`; sentence
//! boundaries from UAX #29 via `unicode-segmentation`, filtered through the
//! locale's suppression table. Either way a [`Segmenter`] is built once and
//! rebound to new text per call. The engine's only job is to read the
//! classifications, never to second-guess them.
//!
//! Position 0 is the implicit first boundary and is never yielded.

use icu_segmenter::{LineBreakIteratorUtf8, LineSegmenter};
use unicode_segmentation::{USentenceBoundIndices, UnicodeSegmentation};

use crate::suppression::SuppressionTable;
use crate::Locale;

/// Which boundaries a [`Segmenter`] finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Line-break opportunities (UAX #14).
    Line,
    /// Sentence boundaries (UAX #29).
    Sentence,
}

/// Why a boundary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleStatus {
    /// No classification (e.g. end of text without a terminator).
    #[default]
    None,
    /// A permissible wrap point.
    LineSoft,
    /// A mandatory break: the preceding character ends a line.
    LineHard,
    /// After a sentence terminator such as `.`, `?` or `!`.
    SentenceTerm,
    /// After a line or paragraph separator with no terminator.
    SentenceSep,
}

/// A boundary position and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    /// Byte offset of the boundary.
    pub position: usize,
    /// Why the boundary exists.
    pub status: RuleStatus,
}

/// A reusable boundary finder for one kind and locale.
///
/// ## Example
///
/// ```rust
/// use semline::{Locale, RuleStatus, SegmentKind, Segmenter};
///
/// let sentences = Segmenter::new(SegmentKind::Sentence, &Locale::posix());
/// let found: Vec<_> = sentences.boundaries("Mr. Smith left. Bye").collect();
///
/// // "Mr." does not end a sentence under standard suppression
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].position, 16);
/// assert_eq!(found[0].status, RuleStatus::SentenceTerm);
/// ```
#[derive(Debug)]
pub struct Segmenter {
    kind: SegmentKind,
    locale: Locale,
    backend: Backend,
}

enum Backend {
    Line(LineSegmenter),
    Sentence(Option<SuppressionTable>),
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line(_) => f.write_str("Line(LineSegmenter)"),
            Self::Sentence(table) => f.debug_tuple("Sentence").field(table).finish(),
        }
    }
}

impl Segmenter {
    /// Build a segmenter. Construction loads rule data; reuse the result.
    #[must_use]
    pub fn new(kind: SegmentKind, locale: &Locale) -> Self {
        let backend = match kind {
            SegmentKind::Line => Backend::Line(LineSegmenter::new_dictionary()),
            SegmentKind::Sentence => Backend::Sentence(SuppressionTable::for_locale(locale)),
        };
        tracing::debug!(?kind, locale = %locale, "segmenter ready");
        Self {
            kind,
            locale: locale.clone(),
            backend,
        }
    }

    /// The kind of boundary this segmenter finds.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The locale this segmenter was built for.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Bind `text` and iterate its boundaries lazily.
    pub fn boundaries<'t>(&'t self, text: &'t str) -> Boundaries<'t> {
        Boundaries {
            segmenter: self,
            text,
            inner: self.open(text),
            status: RuleStatus::None,
        }
    }

    /// Count hard line breaks in `text`, stopping once `cap` are seen.
    ///
    /// Only meaningful for [`SegmentKind::Line`]; other kinds report 0.
    pub fn count_hard_breaks(&self, text: &str, cap: usize) -> usize {
        if self.kind != SegmentKind::Line {
            return 0;
        }
        let mut count = 0;
        let mut boundaries = self.boundaries(text);
        while count < cap {
            match boundaries.next() {
                Some(b) if b.status == RuleStatus::LineHard => count += 1,
                Some(_) => {}
                None => break,
            }
        }
        count
    }

    fn open<'t>(&'t self, text: &'t str) -> Inner<'t> {
        match &self.backend {
            Backend::Line(line) => Inner::Line(line.segment_str(text)),
            Backend::Sentence(table) => Inner::Sentence {
                bounds: text.split_sentence_bound_indices(),
                table: *table,
                start: 0,
            },
        }
    }
}

/// Lazy boundaries of one bound text.
///
/// Borrowing the segmenter and the text for the iterator's lifetime means a
/// text can't be rebound while its boundaries are still being consumed.
pub struct Boundaries<'t> {
    segmenter: &'t Segmenter,
    text: &'t str,
    inner: Inner<'t>,
    status: RuleStatus,
}

enum Inner<'t> {
    Line(LineBreakIteratorUtf8<'t, 't>),
    Sentence {
        bounds: USentenceBoundIndices<'t>,
        table: Option<SuppressionTable>,
        start: usize,
    },
}

impl std::fmt::Debug for Boundaries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boundaries")
            .field("kind", &self.segmenter.kind)
            .field("len", &self.text.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Boundaries<'_> {
    /// Rewind to the start of the text and return the first boundary (0).
    pub fn first(&mut self) -> usize {
        self.inner = self.segmenter.open(self.text);
        self.status = RuleStatus::None;
        0
    }

    /// Status of the most recently yielded boundary.
    pub fn rule_status(&self) -> RuleStatus {
        self.status
    }
}

impl Iterator for Boundaries<'_> {
    type Item = Boundary;

    fn next(&mut self) -> Option<Boundary> {
        let text = self.text;
        let boundary = match &mut self.inner {
            Inner::Line(iter) => {
                let position = iter.find(|&p| p > 0)?;
                let status = if text[..position].ends_with(is_mandatory_break) {
                    RuleStatus::LineHard
                } else {
                    RuleStatus::LineSoft
                };
                Boundary { position, status }
            }
            Inner::Sentence { bounds, table, start } => {
                let position = bounds
                    .map(|(offset, piece)| offset + piece.len())
                    .find(|&end| {
                        end == text.len()
                            || !table.is_some_and(|t| t.suppresses(&text[*start..end]))
                    })?;
                let status = classify_sentence(&text[*start..position]);
                *start = position;
                Boundary { position, status }
            }
        };

        self.status = boundary.status;
        tracing::trace!(position = boundary.position, status = ?boundary.status, "boundary");
        Some(boundary)
    }
}

/// BK, CR, LF and NL classes: a break after these is mandatory.
fn is_mandatory_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_paragraph_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn is_sentence_terminator(c: char) -> bool {
    matches!(
        c,
        '.' | '!'
            | '?'
            | '\u{0589}'
            | '\u{061F}'
            | '\u{06D4}'
            | '\u{0964}'
            | '\u{0965}'
            | '\u{203C}'
            | '\u{203D}'
            | '\u{2047}'..='\u{2049}'
            | '\u{3002}'
            | '\u{FF01}'
            | '\u{FF0E}'
            | '\u{FF1F}'
            | '\u{FF61}'
    )
}

fn is_close(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | ')'
            | ']'
            | '}'
            | '\u{00BB}'
            | '\u{2019}'
            | '\u{201D}'
            | '\u{300D}'
            | '\u{300F}'
            | '\u{FF09}'
    )
}

fn classify_sentence(segment: &str) -> RuleStatus {
    let body = segment.trim_end_matches(|c: char| c.is_whitespace() || is_close(c));
    if body.ends_with(is_sentence_terminator) {
        RuleStatus::SentenceTerm
    } else if segment
        .trim_end_matches(|c: char| c.is_whitespace() && !is_paragraph_separator(c))
        .ends_with(is_paragraph_separator)
    {
        RuleStatus::SentenceSep
    } else {
        RuleStatus::None
    }
}
