//! Unwrapping soft line breaks.
//!
//! ```text
//! "one\ntwo\r\n\nthree\u{2028}four"  ->  "one two three four"
//! ```
//!
//! Every run of LF, CR and U+2028 becomes a single space, paragraph breaks
//! included. Other whitespace, U+2029 among it, passes through untouched.
//! A run cut by a chunk boundary still collapses to one space: when a chunk
//! ends inside a run, the continuation at the start of the next chunk is
//! dropped.

use std::io::Write;

use crate::filter::write_str;
use crate::{Engine, Filter, ReadMode, Result};

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}')
}

/// The `mdline` filter.
#[derive(Debug)]
pub struct Mdline<'e> {
    engine: &'e Engine,
    in_run: bool,
}

impl<'e> Mdline<'e> {
    /// A filter using `engine`'s normalizers.
    pub fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            in_run: false,
        }
    }
}

impl Filter for Mdline<'_> {
    fn read_mode(&self) -> ReadMode {
        ReadMode::Text
    }

    fn feed(&mut self, chunk: &str, _is_final: bool, out: &mut dyn Write) -> Result<()> {
        let text = if self.in_run {
            chunk.trim_start_matches(is_line_break)
        } else {
            chunk
        };
        if text.is_empty() {
            return Ok(());
        }

        let collapsed = self.engine.line_breaks().collapse(text)?;
        write_str(out, &collapsed)?;
        self.in_run = text.ends_with(is_line_break);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{run, FilterConfig};

    fn mdline(input: &str, capacity: usize) -> String {
        let engine = Engine::new(FilterConfig::default()).unwrap();
        let mut output = Vec::new();
        run(&mut Mdline::new(&engine), input.as_bytes(), &mut output, capacity).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_unwraps_lines() {
        assert_eq!(mdline("one\ntwo\r\n\nthree", 64), "one two three");
        assert_eq!(mdline("a\u{2028}b", 64), "a b");
    }

    #[test]
    fn test_keeps_other_whitespace() {
        assert_eq!(mdline("a\t b\u{2029}c", 64), "a\t b\u{2029}c");
    }

    #[test]
    fn test_trailing_newline_becomes_space() {
        assert_eq!(mdline("last line\n", 64), "last line ");
    }

    #[test]
    fn test_run_across_chunks() {
        let input = "abcdef\n\n\n\n\n\n\n\n\n\n\n\nghij";
        assert_eq!(mdline(input, 8), "abcdef ghij");
        assert_eq!(mdline(input, 8), mdline(input, 1024));
    }

    #[test]
    fn test_empty() {
        assert_eq!(mdline("", 8), "");
    }
}
