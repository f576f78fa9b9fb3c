//! One sentence per line.
//!
//! ```text
//! input:                         output:
//!
//! "Call me Ishmael. Some        "Call me Ishmael.
//!  years ago, never mind         Some years ago, never mind how long.
//!  how long.                     
//!                                It was cold."
//!  It was cold."
//! ```
//!
//! Text accumulates until a paragraph is closed by a blank line or U+2029
//! (or the input ends), so output never depends on where chunks were cut.
//! Soft breaks already seen in the held text are not scanned again, so a
//! long paragraph costs time linear in its length.
//! Non-empty paragraphs are separated by one empty line; blank ones vanish.

use std::borrow::Cow;
use std::io::Write;

use crate::filter::write_str;
use crate::{Engine, Filter, Paragraph, ReadMode, Result};

/// The `semln` filter.
#[derive(Debug)]
pub struct Semln<'e> {
    engine: &'e Engine,
    pending: String,
    resume: usize,
    emitted: bool,
}

impl<'e> Semln<'e> {
    /// A filter using `engine`'s segmenters.
    pub fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            pending: String::new(),
            resume: 0,
            emitted: false,
        }
    }
}

impl Filter for Semln<'_> {
    fn read_mode(&self) -> ReadMode {
        ReadMode::Lines
    }

    fn feed(&mut self, chunk: &str, is_final: bool, out: &mut dyn Write) -> Result<()> {
        let engine = self.engine;
        self.pending.try_reserve(chunk.len())?;
        self.pending.push_str(chunk);

        let pending = self.pending.as_str();
        let mut paragraphs = engine.paragraphs_from(pending, self.resume, is_final);
        for span in paragraphs.by_ref() {
            let paragraph = engine.build_paragraph(span.body.slice(pending), span.end)?;
            write_paragraph(engine, &paragraph, &mut self.emitted, out)?;
        }
        let consumed = paragraphs.consumed();
        let resume = paragraphs.resume();

        self.pending.drain(..consumed);
        self.resume = resume - consumed;
        if is_final {
            self.pending.clear();
            self.resume = 0;
        }
        tracing::debug!(
            consumed,
            held = self.pending.len(),
            resume = self.resume,
            "semln chunk"
        );
        Ok(())
    }
}

fn write_paragraph(
    engine: &Engine,
    paragraph: &Paragraph,
    emitted: &mut bool,
    out: &mut dyn Write,
) -> Result<()> {
    if paragraph.is_empty() {
        return Ok(());
    }
    if *emitted {
        write_str(out, "\n")?;
    }
    for sentence in paragraph.sentences() {
        let sentence = if engine.config().show_whitespace {
            engine.visible_whitespace().collapse(sentence)?
        } else {
            Cow::Borrowed(sentence)
        };
        write_str(out, &sentence)?;
        write_str(out, "\n")?;
    }
    *emitted = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{run, FilterConfig};

    fn semln_with(config: FilterConfig, input: &str) -> String {
        let capacity = config.capacity;
        let engine = Engine::new(config).unwrap();
        let mut output = Vec::new();
        run(&mut Semln::new(&engine), input.as_bytes(), &mut output, capacity).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn semln(input: &str) -> String {
        semln_with(FilterConfig::default(), input)
    }

    #[test]
    fn test_one_sentence_per_line() {
        assert_eq!(
            semln("Call me Ishmael. Some\nyears ago, never mind\nhow long.\n\nIt was cold.\n"),
            "Call me Ishmael.\nSome years ago, never mind how long.\n\nIt was cold.\n"
        );
    }

    #[test]
    fn test_blank_paragraphs_vanish() {
        assert_eq!(semln("\n\n\nA.\n\n \n\n\u{2029}B.\n\n"), "A.\n\nB.\n");
        assert_eq!(semln(" \n\n\t"), "");
    }

    #[test]
    fn test_small_chunks_match_large() {
        let input = "First one. Second\r\none.\r\n\r\nThird, café. Fourth.\u{2029}Fifth";
        let small = semln_with(FilterConfig::default().with_capacity(8), input);
        assert_eq!(small, semln(input));
        assert_eq!(small, "First one.\nSecond one.\n\nThird, café.\nFourth.\n\nFifth\n");
    }

    #[test]
    fn test_held_text_is_not_rescanned() {
        let engine = Engine::new(FilterConfig::default()).unwrap();
        let mut semln = Semln::new(&engine);
        let mut output = Vec::new();

        semln.feed("one line\nand another\nand ", false, &mut output).unwrap();
        assert!(output.is_empty());
        assert_eq!(semln.resume, 24);

        semln.feed("more.\n", false, &mut output).unwrap();
        assert_eq!(semln.resume, 30);

        semln.feed("\nNext.", true, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "one line and another and more.\n\nNext.\n"
        );
        assert!(semln.pending.is_empty());
        assert_eq!(semln.resume, 0);
    }

    #[test]
    fn test_long_paragraph_single_pass() {
        let line = "a sentence wrapped at a narrow column, then more words\n";
        let input = format!("{}The end.", line.repeat(5_000));
        let output = semln_with(FilterConfig::default().with_capacity(8192), &input);

        assert_eq!(output.lines().count(), 1);
        assert!(output.ends_with("more words The end.\n"));
        assert_eq!(output.len(), input.len() + 1);
    }

    #[test]
    fn test_show_whitespace() {
        let config = FilterConfig::default().with_show_whitespace(true);
        assert_eq!(semln_with(config, "Hello  big\nworld. Bye."), "Hello-big-world.\nBye.\n");
    }
}
