//! The filter interface and its stream driver.
//!
//! ```text
//! input ──► ChunkReader ──► Filter::feed ──► output
//!            (read_mode)     (per chunk)      flushed once at the end
//! ```
//!
//! A filter may hold text back between calls; it must write everything it
//! still holds when `is_final` is set.

use std::io::{Read, Write};

use crate::{ChunkReader, Error, ReadMode, Result};

/// A streaming text filter.
///
/// ```rust
/// use semline::{run, Engine, FilterConfig, Mdline};
///
/// let engine = Engine::new(FilterConfig::default()).unwrap();
/// let mut output = Vec::new();
/// run(&mut Mdline::new(&engine), "soft\nwrapped".as_bytes(), &mut output, 8).unwrap();
///
/// assert_eq!(output, b"soft wrapped");
/// ```
pub trait Filter {
    /// What the chunk reader must never split for this filter.
    fn read_mode(&self) -> ReadMode;

    /// Process one chunk, writing whatever output is complete.
    ///
    /// # Errors
    ///
    /// [`Error::StreamWrite`] if `out` fails, or any error from the
    /// underlying stages.
    fn feed(&mut self, chunk: &str, is_final: bool, out: &mut dyn Write) -> Result<()>;
}

/// Pump `input` through `filter` into `output` in chunks of `capacity` bytes.
///
/// Returns the number of input bytes processed.
///
/// # Errors
///
/// The first error from reading, filtering or writing. Output already
/// written stays written.
pub fn run<F, R, W>(filter: &mut F, input: R, mut output: W, capacity: usize) -> Result<u64>
where
    F: Filter + ?Sized,
    R: Read,
    W: Write,
{
    let mut reader = ChunkReader::new(input, capacity, filter.read_mode())?;
    let mut chunks = 0usize;
    loop {
        let chunk = reader.read_chunk()?;
        filter.feed(&chunk.text, chunk.is_final, &mut output)?;
        chunks += 1;
        if chunk.is_final {
            break;
        }
    }
    output.flush().map_err(Error::StreamWrite)?;

    tracing::info!(bytes = reader.consumed(), chunks, "stream done");
    Ok(reader.consumed())
}

pub(crate) fn write_str(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).map_err(Error::StreamWrite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Echoes chunks, recording the flags it saw.
    struct Echo {
        finals: Vec<bool>,
    }

    impl Filter for Echo {
        fn read_mode(&self) -> ReadMode {
            ReadMode::Text
        }

        fn feed(&mut self, chunk: &str, is_final: bool, out: &mut dyn Write) -> Result<()> {
            self.finals.push(is_final);
            write_str(out, chunk)
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_reaches_final_chunk_once() {
        let mut echo = Echo { finals: Vec::new() };
        let mut output = Vec::new();
        let bytes = run(&mut echo, "0123456789abcdef!".as_bytes(), &mut output, 8).unwrap();

        assert_eq!(bytes, 17);
        assert_eq!(output, b"0123456789abcdef!");
        assert_eq!(echo.finals.last(), Some(&true));
        assert_eq!(echo.finals.iter().filter(|f| **f).count(), 1);
    }

    #[test]
    fn test_empty_input() {
        let mut echo = Echo { finals: Vec::new() };
        let mut output = Vec::new();
        assert_eq!(run(&mut echo, io::empty(), &mut output, 8).unwrap(), 0);
        assert!(output.is_empty());
        assert_eq!(echo.finals, vec![true]);
    }

    #[test]
    fn test_write_failure_is_stream_write() {
        let mut echo = Echo { finals: Vec::new() };
        let err = run(&mut echo, "data".as_bytes(), Broken, 8).unwrap_err();
        assert!(matches!(err, Error::StreamWrite(_)));
        assert!(err.to_string().starts_with("writer: "));
    }

    #[test]
    fn test_capacity_is_checked() {
        let mut echo = Echo { finals: Vec::new() };
        let err = run(&mut echo, io::empty(), Vec::new(), 2).unwrap_err();
        assert!(matches!(err, Error::InvalidCapacity { capacity: 2, .. }));
    }
}
