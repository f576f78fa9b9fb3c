//! Chunked, encoding-safe reading.
//!
//! Filters never see a whole stream at once. They see fixed-size chunks, and
//! every chunk must be valid text on its own:
//!
//! ```text
//! capacity = 8
//!
//! Stream:  "abc\r\nd日本"      (日 and 本 are 3 bytes each)
//!
//! Chunk 0: "abc"               <- "\r" pushed back (Lines mode)
//! Chunk 1: "\r\nd日"           <- partial 本 pushed back
//! Chunk 2: "本"   (final)
//! ```
//!
//! A character is never split, and in [`ReadMode::Lines`] a CRLF pair is
//! never split either. Pushed-back bytes are prepended to the next chunk.

use std::io::{self, Read};

use crate::{Error, Result};

/// Default chunk capacity in bytes.
pub const DEFAULT_CHUNK_CAPACITY: usize = 8192;

/// Smallest accepted chunk capacity.
///
/// At most 4 bytes are pushed back per chunk (3 for a truncated character,
/// 1 for a carriage return), so 8 always leaves something to emit.
pub const MIN_CHUNK_CAPACITY: usize = 8;

/// What the reader must avoid splitting at a chunk end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Never split a character.
    #[default]
    Text,
    /// Never split a character or a CRLF pair.
    Lines,
}

/// One chunk of decoded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text. Ends on a complete character.
    pub text: String,
    /// Whether the stream is exhausted after this chunk.
    pub is_final: bool,
}

/// Reads fixed-size UTF-8 chunks from a byte stream.
///
/// ## Example
///
/// ```rust
/// use semline::{ChunkReader, ReadMode};
///
/// let input = "héllo".as_bytes();
/// let mut reader = ChunkReader::new(input, 8, ReadMode::Text).unwrap();
///
/// let chunk = reader.read_chunk().unwrap();
/// assert_eq!(chunk.text, "héllo");
/// assert!(chunk.is_final);
/// ```
#[derive(Debug)]
pub struct ChunkReader<R> {
    inner: R,
    capacity: usize,
    mode: ReadMode,
    pushback: Vec<u8>,
    exhausted: bool,
    consumed: u64,
}

impl<R: Read> ChunkReader<R> {
    /// Create a reader producing chunks of at most `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity < MIN_CHUNK_CAPACITY`.
    pub fn new(inner: R, capacity: usize, mode: ReadMode) -> Result<Self> {
        if capacity < MIN_CHUNK_CAPACITY {
            return Err(Error::InvalidCapacity {
                capacity,
                min: MIN_CHUNK_CAPACITY,
            });
        }
        Ok(Self {
            inner,
            capacity,
            mode,
            pushback: Vec::new(),
            exhausted: false,
            consumed: 0,
        })
    }

    /// The read mode this reader was built with.
    pub fn mode(&self) -> ReadMode {
        self.mode
    }

    /// Bytes handed out in chunks so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Read the next chunk.
    ///
    /// At end of stream with no data left, returns an empty chunk with
    /// `is_final` set.
    ///
    /// # Errors
    ///
    /// - [`Error::StreamRead`] on an I/O failure or invalid UTF-8.
    /// - [`Error::Allocation`] if the chunk buffer cannot be allocated.
    pub fn read_chunk(&mut self) -> Result<Chunk> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(self.capacity)?;
        buf.append(&mut self.pushback);
        self.fill(&mut buf)?;

        let keep = self.complete_prefix(&buf)?;
        self.pushback.extend_from_slice(&buf[keep..]);
        buf.truncate(keep);
        self.consumed += keep as u64;

        let is_final = self.exhausted && self.pushback.is_empty();
        // complete_prefix validated buf[..keep]
        let text = String::from_utf8(buf)
            .map_err(|e| Error::StreamRead(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        tracing::trace!(
            len = text.len(),
            pushed_back = self.pushback.len(),
            is_final,
            "read chunk"
        );
        Ok(Chunk { text, is_final })
    }

    /// Top `buf` up to capacity, or until the stream ends.
    fn fill(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        if self.exhausted {
            return Ok(());
        }

        let mut filled = buf.len();
        buf.resize(self.capacity, 0);
        while filled < self.capacity {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.exhausted = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::StreamRead(e)),
            }
        }
        buf.truncate(filled);
        Ok(())
    }

    /// Length of the prefix of `buf` that may be emitted now.
    fn complete_prefix(&self, buf: &[u8]) -> Result<usize> {
        let mut end = match std::str::from_utf8(buf) {
            Ok(_) => buf.len(),
            // Truncated sequence at the very end: finish it next time.
            Err(e) if e.error_len().is_none() && !self.exhausted => e.valid_up_to(),
            Err(e) => {
                let offset = self.consumed + e.valid_up_to() as u64;
                return Err(Error::StreamRead(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid UTF-8 at byte {offset}"),
                )));
            }
        };

        if self.mode == ReadMode::Lines && !self.exhausted && end > 0 && buf[end - 1] == b'\r' {
            end -= 1;
        }
        Ok(end)
    }
}
