//! Paragraph grouping.
//!
//! A paragraph ends at one of:
//!
//! 1. a run holding U+2029 PARAGRAPH SEPARATOR,
//! 2. two or more hard line breaks, with only spaces or tabs between them,
//! 3. the end of input.
//!
//! ```text
//! "A.\n\nB.\u{2029}C."
//!  ^^----^^-------^^
//!  A.    B.       C.     3 paragraphs
//!
//! "A.\nB."               1 paragraph, 2 sentences
//! ```
//!
//! The pattern finds the next whitespace run holding a line break. Whether
//! that run ends the paragraph is decided by its [`MatchStats`]: the line
//! segmenter counts its hard breaks, so CRLF counts once and a lone soft
//! break is skipped over. Paragraphs are maximal non-overlapping spans that
//! exclude their terminator.
//!
//! ## Streaming
//!
//! A paragraph whose only terminator is the end of the current buffer may
//! continue in the next chunk. Unless the buffer is final, iteration stops
//! in front of it and [`Paragraphs::consumed`] tells the caller how much of
//! the buffer is done with.

use crate::{MatchStats, Pattern, Result, Segmenter, Span};

/// Shortest body, then a candidate terminator: a whitespace run holding a
/// line or paragraph break, or the end of input.
pub const PARAGRAPH_PATTERN: &str = r"(?s)(.*?)(\s*[\n\x0B\x0C\r\u{85}\u{2028}\u{2029}]\s*|\z)";

/// How a paragraph ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphEnd {
    /// An explicit U+2029 separator.
    Separator,
    /// Two or more hard line breaks.
    BlankLines,
    /// End of input.
    EndOfInput,
}

/// Where a paragraph and its terminator sit in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphSpan {
    /// The paragraph text, terminator excluded.
    pub body: Span,
    /// The terminating run. Empty at end of input.
    pub terminator: Span,
    /// How the paragraph ended.
    pub end: ParagraphEnd,
}

/// A segmented paragraph, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
    sentences: Vec<Span>,
    end: ParagraphEnd,
}

impl Paragraph {
    pub(crate) fn new(text: String, sentences: Vec<Span>, end: ParagraphEnd) -> Self {
        Self {
            text,
            sentences,
            end,
        }
    }

    /// The normalized paragraph text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sentence spans into [`Paragraph::text`], padding excluded.
    pub fn sentence_spans(&self) -> &[Span] {
        &self.sentences
    }

    /// The sentences, in order.
    pub fn sentences(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentences.iter().map(|span| span.slice(&self.text))
    }

    /// How the paragraph ended.
    pub fn end(&self) -> ParagraphEnd {
        self.end
    }

    /// Whether the paragraph has no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Splits text into paragraphs.
///
/// ## Example
///
/// ```rust
/// use semline::{Locale, ParagraphGrouper, SegmentKind, Segmenter};
///
/// let line = Segmenter::new(SegmentKind::Line, &Locale::posix());
/// let grouper = ParagraphGrouper::new().unwrap();
/// let text = "A.\n\nB.\u{2029}C.";
/// let bodies: Vec<&str> = grouper
///     .split(text, true, &line)
///     .map(|p| p.body.slice(text))
///     .collect();
///
/// assert_eq!(bodies, vec!["A.", "B.", "C."]);
/// ```
#[derive(Debug, Clone)]
pub struct ParagraphGrouper {
    pattern: Pattern,
}

impl ParagraphGrouper {
    /// Compile the paragraph pattern.
    ///
    /// # Errors
    ///
    /// Only if the built-in pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Pattern::compile(PARAGRAPH_PATTERN)?,
        })
    }

    /// Lazily split `text`, counting breaks with the `line` segmenter.
    ///
    /// Pass `is_final = false` while more input may follow; the trailing
    /// open paragraph is then held back.
    pub fn split<'a>(
        &'a self,
        text: &'a str,
        is_final: bool,
        line: &'a Segmenter,
    ) -> Paragraphs<'a> {
        self.split_from(text, 0, is_final, line)
    }

    /// Like [`ParagraphGrouper::split`], but the first paragraph is only
    /// searched for a terminator from byte `resume` on.
    ///
    /// `text[..resume]` must hold no paragraph break, which is what
    /// [`Paragraphs::resume`] reports for a held-back buffer that has since
    /// grown.
    pub fn split_from<'a>(
        &'a self,
        text: &'a str,
        resume: usize,
        is_final: bool,
        line: &'a Segmenter,
    ) -> Paragraphs<'a> {
        Paragraphs {
            pattern: &self.pattern,
            line,
            text,
            is_final,
            pos: 0,
            resume,
            done: false,
        }
    }
}

/// Paragraphs of one buffer, in order.
#[derive(Debug)]
pub struct Paragraphs<'a> {
    pattern: &'a Pattern,
    line: &'a Segmenter,
    text: &'a str,
    is_final: bool,
    pos: usize,
    resume: usize,
    done: bool,
}

impl Paragraphs<'_> {
    /// Bytes of the buffer covered by paragraphs yielded so far.
    ///
    /// Everything from here on must be kept and re-split once more input
    /// arrives.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Where scanning can pick up once more input is appended.
    ///
    /// Soft breaks before this offset have been classified already. Only
    /// meaningful after the iterator is exhausted; never less than
    /// [`Paragraphs::consumed`].
    pub fn resume(&self) -> usize {
        self.resume.max(self.pos)
    }

    fn hold(&mut self, resume: usize) -> Option<ParagraphSpan> {
        self.done = true;
        self.resume = resume;
        None
    }
}

impl Iterator for Paragraphs<'_> {
    type Item = ParagraphSpan;

    fn next(&mut self) -> Option<ParagraphSpan> {
        if self.done {
            return None;
        }

        let start = self.pos;
        let mut from = start.max(self.resume);
        loop {
            let caps = self.pattern.captures_at(self.text, from)?;
            let Some(terminator) = caps[2] else {
                self.done = true;
                return None;
            };
            let body = Span::new(start, terminator.start);

            // Only `\z` matches empty
            if terminator.is_empty() {
                if !self.is_final {
                    // Trailing whitespace may grow into a break run
                    let tail = &self.text[from..];
                    return self.hold(from + tail.trim_end().len());
                }
                self.done = true;
                if body.is_empty() {
                    return None;
                }
                self.pos = terminator.end;
                return Some(ParagraphSpan {
                    body,
                    terminator,
                    end: ParagraphEnd::EndOfInput,
                });
            }

            // A run touching the end may still grow into a paragraph break
            let open = !self.is_final && terminator.end == self.text.len();

            let stats = MatchStats::of_run(terminator.slice(self.text), self.line);
            if stats.is_paragraph_break() {
                self.pos = terminator.end;
                let end = if stats.para_sep {
                    ParagraphEnd::Separator
                } else {
                    ParagraphEnd::BlankLines
                };
                return Some(ParagraphSpan {
                    body,
                    terminator,
                    end,
                });
            }
            if open {
                return self.hold(terminator.start);
            }

            // A soft break: the paragraph goes on
            from = terminator.end;
        }
    }
}
