//! # semline
//!
//! Streaming prose reformatters.
//!
//! ## The Problem
//!
//! Prose in version control is usually hard-wrapped at some column. Change
//! one word and the whole paragraph reflows, so the diff shows every line.
//! Two normal forms fix this:
//!
//! - **unwrapped** (`mdline`): each soft line break becomes a space
//! - **semantic lines** (`semln`): one sentence per line, paragraphs
//!   separated by a blank line
//!
//! Both must work on unbounded input read in fixed-size chunks, and the
//! output must not depend on where the chunks were cut.
//!
//! ## Pipeline
//!
//! ```text
//! mdline:  ChunkReader ──► WhitespaceNormalizer ──► out
//!
//! semln:   ChunkReader ──► ParagraphGrouper ──► WhitespaceNormalizer
//!                              │                        │
//!                        (break counts via         (paragraph
//!                         line Segmenter)           interior)
//!                                                       ▼
//!                          out ◄── PaddingStripper ◄── sentence Segmenter
//! ```
//!
//! ## The Hard Part: Chunk Boundaries
//!
//! A fixed-size read can end anywhere:
//!
//! ```text
//! "... café\r\n\r\nNext ..."
//!        ^^   ^^
//!        |    a CRLF pair, or a paragraph break, can straddle a chunk
//!        a multi-byte character can straddle a chunk
//! ```
//!
//! [`ChunkReader`] never splits a character (nor, in [`ReadMode::Lines`], a
//! CRLF pair). [`Semln`] keeps an open paragraph until a blank line, a
//! U+2029, or the end of input closes it. [`Mdline`] remembers whether the
//! last chunk ended inside a run of breaks.
//!
//! ## Quick Start
//!
//! ```rust
//! use semline::{run, Engine, FilterConfig, Semln};
//!
//! let engine = Engine::new(FilterConfig::default()).unwrap();
//! let input = "Wrapped text is\nhard to diff. Sentences\nare not.\n\nNew paragraph.";
//!
//! let mut output = Vec::new();
//! run(&mut Semln::new(&engine), input.as_bytes(), &mut output, 64).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "Wrapped text is hard to diff.\nSentences are not.\n\nNew paragraph.\n"
//! );
//! ```
//!
//! ## Locale
//!
//! Sentence rules depend on the language: "Mr." ends no English sentence,
//! "z.B." ends no German one. See [`Locale`] for resolution from
//! `LC_ALL`/`LC_CTYPE`/`LANG` and the `ss` suppression keyword.

mod engine;
mod error;
mod filter;
mod locale;
mod mdline;
mod normalize;
mod padding;
mod paragraph;
mod pattern;
mod reader;
mod segment;
mod semln;
mod span;
mod suppression;

pub mod cli;

pub use engine::{Engine, FilterConfig};
pub use error::{Error, Result};
pub use filter::{run, Filter};
pub use locale::{Locale, Suppression, LOCALE_ENV_VARS};
pub use mdline::Mdline;
pub use normalize::{WhitespaceNormalizer, LINE_BREAK_RUN, WHITESPACE_RUN, WRAPPED_LINE_RUN};
pub use padding::{
    MatchStats, PaddingStripper, LEADING_PADDING, PARAGRAPH_BREAKS, PARAGRAPH_SEPARATOR,
    TRAILING_PADDING,
};
pub use paragraph::{
    Paragraph, ParagraphEnd, ParagraphGrouper, ParagraphSpan, Paragraphs, PARAGRAPH_PATTERN,
};
pub use pattern::Pattern;
pub use reader::{Chunk, ChunkReader, ReadMode, DEFAULT_CHUNK_CAPACITY, MIN_CHUNK_CAPACITY};
pub use segment::{Boundaries, Boundary, RuleStatus, SegmentKind, Segmenter};
pub use semln::Semln;
pub use span::Span;
