//! Error types for semline.
//!
//! Every variant renders as `<component>: <cause>` so the binaries can print
//! it verbatim to stderr.

use std::collections::TryReserveError;
use std::io;

/// Errors that can occur while reading, segmenting, or writing text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The locale could not be resolved or canonicalized.
    #[error("locale: cannot resolve {value:?}: {reason}")]
    LocaleResolution {
        /// The raw value that failed to resolve.
        value: String,
        /// Why it failed.
        reason: String,
    },

    /// A built-in pattern failed to compile.
    #[error("pattern: cannot compile {pattern:?}: {source}")]
    PatternCompile {
        /// The pattern source.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The input stream could not be opened.
    #[error("input: cannot open stream: {0}")]
    StreamOpen(#[source] io::Error),

    /// Reading from the input stream failed, or the input is not UTF-8.
    #[error("reader: {0}")]
    StreamRead(#[source] io::Error),

    /// Writing to the output stream failed.
    #[error("writer: {0}")]
    StreamWrite(#[source] io::Error),

    /// Chunk capacity too small to guarantee progress.
    #[error("reader: invalid chunk capacity {capacity} (must be >= {min})")]
    InvalidCapacity {
        /// The requested capacity.
        capacity: usize,
        /// The smallest accepted capacity.
        min: usize,
    },

    /// A buffer could not grow.
    #[error("buffer: allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Result type for semline operations.
pub type Result<T> = std::result::Result<T, Error>;
