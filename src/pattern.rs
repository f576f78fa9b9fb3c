//! Compiled pattern handles.
//!
//! A [`Pattern`] is compiled once and then bound to a new subject text on
//! every call. Binding is just passing a `&str`, so a result borrowed from
//! one call can't outlive the text it points into.

use std::borrow::Cow;

use regex::Regex;

use crate::{Error, Result, Span};

/// A compiled pattern.
///
/// ## Example
///
/// ```rust
/// use semline::{Pattern, Span};
///
/// let spaces = Pattern::compile(r"\s+").unwrap();
/// assert_eq!(spaces.find_first("a  b", 0), Some(Span::new(1, 3)));
/// assert_eq!(spaces.replace_all("a  b\nc", "-").unwrap(), "a-b-c");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternCompile`] if `source` is malformed.
    pub fn compile(source: &str) -> Result<Self> {
        let regex = Regex::new(source).map_err(|source_err| Error::PatternCompile {
            pattern: source.to_string(),
            source: source_err,
        })?;
        Ok(Self { regex })
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// First match in `text` starting at or after byte `from`.
    ///
    /// Returned spans are relative to the start of `text`, not to `from`.
    pub fn find_first(&self, text: &str, from: usize) -> Option<Span> {
        self.regex.find_at(text, from).map(Span::from)
    }

    /// Successive non-overlapping matches in `text`, leftmost first.
    pub fn find_iter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Span> + 'a {
        self.regex.find_iter(text).map(Span::from)
    }

    /// First match at or after byte `from`, with its capture groups.
    ///
    /// Index 0 is the whole match, then one entry per group; a group that
    /// did not take part in the match is `None`. Calling again from the end
    /// of the previous match continues the iteration.
    pub fn captures_at(&self, text: &str, from: usize) -> Option<Vec<Option<Span>>> {
        self.regex
            .captures_at(text, from)
            .map(|caps| caps.iter().map(|m| m.map(Span::from)).collect())
    }

    /// Replace every match with `replacement`, taken literally.
    ///
    /// Returns the input unchanged (borrowed) when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the output buffer cannot grow.
    pub fn replace_all<'t>(&self, text: &'t str, replacement: &str) -> Result<Cow<'t, str>> {
        let mut matches = self.regex.find_iter(text).peekable();
        if matches.peek().is_none() {
            return Ok(Cow::Borrowed(text));
        }

        // Grows if replacements outweigh what they replace.
        let mut out = String::new();
        out.try_reserve(text.len())?;

        let mut last = 0;
        let mut removed = 0;
        let mut count = 0;
        for m in matches {
            out.try_reserve(m.start() - last + replacement.len())?;
            out.push_str(&text[last..m.start()]);
            out.push_str(replacement);
            removed += m.len();
            count += 1;
            last = m.end();
        }
        out.push_str(&text[last..]);

        debug_assert_eq!(
            out.len(),
            text.len() - removed + count * replacement.len(),
            "replacement output length"
        );
        Ok(Cow::Owned(out))
    }
}
