//! The pipeline context.
//!
//! Every compiled pattern and segmenter is built once, here, and borrowed by
//! the filters for the whole stream:
//!
//! ```text
//! FilterConfig ──► Engine::new ──┬── line segmenter      (break counting)
//!                                ├── sentence segmenter  (locale rules)
//!                                ├── paragraph grouper
//!                                ├── padding stripper
//!                                └── normalizers
//!
//! semln, per paragraph body:
//!
//!   "Hi there.\n  How are\nyou?  "
//!        │ wrapped_lines
//!        ▼
//!   "Hi there. How are you?  "
//!        │ sentence boundaries 10, 24
//!        ▼
//!   [0..10) "Hi there. "   [10..24) "How are you?  "
//!        │ strip padding
//!        ▼
//!   "Hi there."            "How are you?"
//! ```

use crate::{
    Locale, PaddingStripper, Paragraph, ParagraphEnd, ParagraphGrouper, Paragraphs, Result,
    SegmentKind, Segmenter, Span, WhitespaceNormalizer, DEFAULT_CHUNK_CAPACITY,
};

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Locale for sentence rules.
    pub locale: Locale,
    /// Chunk capacity in bytes.
    pub capacity: usize,
    /// Render whitespace inside emitted sentences as `-`.
    pub show_whitespace: bool,
}

impl FilterConfig {
    /// Defaults for `locale`.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            capacity: DEFAULT_CHUNK_CAPACITY,
            show_whitespace: false,
        }
    }

    /// Set the chunk capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Toggle whitespace visualization.
    #[must_use]
    pub fn with_show_whitespace(mut self, show: bool) -> Self {
        self.show_whitespace = show;
        self
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(Locale::posix())
    }
}

/// Owns everything the filters compile or load.
///
/// ## Example
///
/// ```rust
/// use semline::{Engine, FilterConfig, ParagraphEnd};
///
/// let engine = Engine::new(FilterConfig::default()).unwrap();
/// let paragraph = engine
///     .build_paragraph("  Hello world.\nBye.  ", ParagraphEnd::EndOfInput)
///     .unwrap();
///
/// let sentences: Vec<&str> = paragraph.sentences().collect();
/// assert_eq!(sentences, vec!["Hello world.", "Bye."]);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: FilterConfig,
    line: Segmenter,
    sentence: Segmenter,
    grouper: ParagraphGrouper,
    padding: PaddingStripper,
    line_breaks: WhitespaceNormalizer,
    wrapped_lines: WhitespaceNormalizer,
    visible_whitespace: WhitespaceNormalizer,
}

impl Engine {
    /// Compile patterns and load segmentation rules.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PatternCompile`] if a built-in pattern is
    /// rejected.
    pub fn new(config: FilterConfig) -> Result<Self> {
        let engine = Self {
            line: Segmenter::new(SegmentKind::Line, &config.locale),
            sentence: Segmenter::new(SegmentKind::Sentence, &config.locale),
            grouper: ParagraphGrouper::new()?,
            padding: PaddingStripper::new()?,
            line_breaks: WhitespaceNormalizer::line_breaks()?,
            wrapped_lines: WhitespaceNormalizer::wrapped_lines()?,
            visible_whitespace: WhitespaceNormalizer::visible_whitespace()?,
            config,
        };
        tracing::info!(
            locale = %engine.config.locale,
            capacity = engine.config.capacity,
            "engine ready"
        );
        Ok(engine)
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// The line-break segmenter.
    pub fn line_segmenter(&self) -> &Segmenter {
        &self.line
    }

    /// The sentence segmenter.
    pub fn sentence_segmenter(&self) -> &Segmenter {
        &self.sentence
    }

    /// The padding stripper.
    pub fn padding(&self) -> &PaddingStripper {
        &self.padding
    }

    /// Collapses LF, CR and U+2028 runs (mdline).
    pub fn line_breaks(&self) -> &WhitespaceNormalizer {
        &self.line_breaks
    }

    /// Collapses whitespace runs holding a line break (paragraph interiors).
    pub fn wrapped_lines(&self) -> &WhitespaceNormalizer {
        &self.wrapped_lines
    }

    /// Turns whitespace runs into `-`.
    pub fn visible_whitespace(&self) -> &WhitespaceNormalizer {
        &self.visible_whitespace
    }

    /// Split `text` into paragraphs. See [`ParagraphGrouper::split`].
    pub fn paragraphs<'a>(&'a self, text: &'a str, is_final: bool) -> Paragraphs<'a> {
        self.grouper.split(text, is_final, &self.line)
    }

    /// Split `text`, scanning from `resume`. See [`ParagraphGrouper::split_from`].
    pub fn paragraphs_from<'a>(
        &'a self,
        text: &'a str,
        resume: usize,
        is_final: bool,
    ) -> Paragraphs<'a> {
        self.grouper.split_from(text, resume, is_final, &self.line)
    }

    /// Normalize a paragraph body and cut it into padding-free sentences.
    ///
    /// Whitespace-only sentences are dropped, so a blank body gives an empty
    /// paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Allocation`] if normalization cannot allocate.
    pub fn build_paragraph(&self, body: &str, end: ParagraphEnd) -> Result<Paragraph> {
        let text = self.wrapped_lines.collapse(body)?.into_owned();

        let mut sentences = Vec::new();
        let mut from = 0;
        for boundary in self.sentence.boundaries(&text) {
            let span = Span::new(from, boundary.position);
            if let Some(inner) = self.padding.strip(&text, span) {
                sentences.push(inner);
            }
            from = boundary.position;
        }

        tracing::debug!(
            len = text.len(),
            sentences = sentences.len(),
            ?end,
            "paragraph"
        );
        Ok(Paragraph::new(text, sentences, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(FilterConfig::default()).unwrap()
    }

    fn sentences(engine: &Engine, body: &str) -> Vec<String> {
        engine
            .build_paragraph(body, ParagraphEnd::EndOfInput)
            .unwrap()
            .sentences()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_trims_padding() {
        assert_eq!(sentences(&engine(), "  Hello world.  "), vec!["Hello world."]);
    }

    #[test]
    fn test_unwraps_interior_breaks() {
        let engine = engine();
        assert_eq!(
            sentences(&engine, "One sentence\nwrapped. And\r\n   another."),
            vec!["One sentence wrapped.", "And another."]
        );
    }

    #[test]
    fn test_blank_body_is_empty() {
        let engine = engine();
        let paragraph = engine.build_paragraph(" \t ", ParagraphEnd::BlankLines).unwrap();
        assert!(paragraph.is_empty());
        assert_eq!(paragraph.end(), ParagraphEnd::BlankLines);
    }

    #[test]
    fn test_spans_point_into_normalized_text() {
        let engine = engine();
        let paragraph = engine
            .build_paragraph("A b.\nC d.", ParagraphEnd::EndOfInput)
            .unwrap();
        assert_eq!(paragraph.text(), "A b. C d.");
        assert_eq!(paragraph.sentence_spans(), &[Span::new(0, 4), Span::new(5, 9)]);
    }

    #[test]
    fn test_config_builders() {
        let config = FilterConfig::default()
            .with_capacity(64)
            .with_show_whitespace(true);
        assert_eq!(config.capacity, 64);
        assert!(config.show_whitespace);
        assert_eq!(config.locale, Locale::posix());
    }
}
