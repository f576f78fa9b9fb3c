//! Locale resolution.
//!
//! Sentence boundaries are locale-specific, so the language is taken from the
//! environment the way POSIX tools do it: `LC_ALL`, then `LC_CTYPE`, then
//! `LANG`, first non-empty value wins. Unset everywhere means `C`.
//!
//! Both POSIX and BCP-47 spellings are accepted and canonicalized:
//!
//! ```text
//! en_US.UTF-8        -> en-US-u-ss-standard
//! de_DE@euro         -> de-DE-u-ss-standard
//! fr-CA-u-ss-none    -> fr-CA-u-ss-none
//! C, POSIX           -> en-US-posix-u-ss-standard
//! ```
//!
//! The `ss` keyword selects segmentation suppression. It defaults to
//! `standard`, which keeps sentences together after abbreviations like
//! "Mr." in English.

use std::ffi::OsString;

use crate::{Error, Result};

/// Environment variables consulted, in priority order.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Segmentation suppression option (`ss` keyword).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Suppression {
    /// Suppress breaks after the locale's known abbreviations.
    #[default]
    Standard,
    /// Break wherever the base rules allow.
    None,
}

impl Suppression {
    fn keyword(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::None => "none",
        }
    }
}

/// A canonical locale descriptor.
///
/// Resolved once at startup and passed by value into segmenter construction.
///
/// ## Example
///
/// ```rust
/// use semline::{Locale, Suppression};
///
/// let locale = Locale::parse("en_GB.UTF-8").unwrap();
/// assert_eq!(locale.language(), "en");
/// assert_eq!(locale.region(), Some("GB"));
/// assert_eq!(locale.suppression(), Suppression::Standard);
/// assert_eq!(locale.to_string(), "en-GB-u-ss-standard");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
    variants: Vec<String>,
    suppression: Suppression,
}

impl Locale {
    /// The POSIX `C` locale.
    #[must_use]
    pub fn posix() -> Self {
        Self {
            language: "en".to_string(),
            script: None,
            region: Some("US".to_string()),
            variants: vec!["posix".to_string()],
            suppression: Suppression::Standard,
        }
    }

    /// Parse and canonicalize a POSIX or BCP-47 locale name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LocaleResolution`] if `raw` is empty or malformed.
    pub fn parse(raw: &str) -> Result<Self> {
        let fail = |reason: &str| Error::LocaleResolution {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(fail("empty locale name"));
        }

        // language[_territory][.codeset][@modifier]
        let (name, modifier) = match trimmed.split_once('@') {
            Some((name, modifier)) => (name, Some(modifier)),
            None => (trimmed, None),
        };
        let name = name.split_once('.').map_or(name, |(name, _codeset)| name);

        let mut locale = if name == "C" || name == "POSIX" {
            Self::posix()
        } else {
            Self::parse_subtags(name).map_err(fail)?
        };

        if let Some(modifier) = modifier {
            // "ss=none"; other modifiers ("euro", "latin") don't affect segmentation
            if let Some(value) = modifier.strip_prefix("ss=") {
                locale.suppression =
                    parse_suppression(value).ok_or_else(|| fail("unknown ss value"))?;
            }
        }

        Ok(locale)
    }

    fn parse_subtags(name: &str) -> std::result::Result<Self, &'static str> {
        let mut subtags = name.split(['_', '-']);

        let language = subtags.next().unwrap_or_default();
        if !(2..=3).contains(&language.len())
            || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err("language must be 2-3 letters");
        }

        let mut locale = Self {
            language: language.to_ascii_lowercase(),
            script: None,
            region: None,
            variants: Vec::new(),
            suppression: Suppression::Standard,
        };

        while let Some(subtag) = subtags.next() {
            let len = subtag.len();
            let alpha = subtag.bytes().all(|b| b.is_ascii_alphabetic());
            let digit = subtag.bytes().all(|b| b.is_ascii_digit());

            if subtag.eq_ignore_ascii_case("u") {
                locale.apply_unicode_extension(&mut subtags)?;
                break;
            } else if len == 4 && alpha && locale.script.is_none() && locale.region.is_none() {
                let mut script = subtag.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                locale.script = Some(script);
            } else if ((len == 2 && alpha) || (len == 3 && digit)) && locale.region.is_none() {
                locale.region = Some(subtag.to_ascii_uppercase());
            } else if (4..=8).contains(&len) && subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                locale.variants.push(subtag.to_ascii_lowercase());
            } else {
                return Err("malformed subtag");
            }
        }

        Ok(locale)
    }

    fn apply_unicode_extension<'a>(
        &mut self,
        subtags: &mut impl Iterator<Item = &'a str>,
    ) -> std::result::Result<(), &'static str> {
        while let Some(key) = subtags.next() {
            if key.len() != 2 {
                return Err("malformed unicode extension");
            }
            let value = subtags.next().ok_or("unicode extension key without value")?;
            if key.eq_ignore_ascii_case("ss") {
                self.suppression = parse_suppression(value).ok_or("unknown ss value")?;
            }
        }
        Ok(())
    }

    /// Resolve the locale from an explicit name or the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LocaleResolution`] if the chosen value is malformed
    /// or not valid Unicode.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        Self::resolve_with(explicit, |name| std::env::var_os(name))
    }

    /// [`Locale::resolve`] against an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Locale::resolve`].
    pub fn resolve_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(name) = explicit {
            return Self::parse(name);
        }

        for var in LOCALE_ENV_VARS {
            let Some(value) = lookup(var) else { continue };
            let value = value.into_string().map_err(|raw| Error::LocaleResolution {
                value: raw.to_string_lossy().into_owned(),
                reason: format!("{var} is not valid Unicode"),
            })?;
            if value.is_empty() {
                continue;
            }
            tracing::debug!(var, value = %value, "locale from environment");
            return Self::parse(&value);
        }

        tracing::debug!("no locale in environment, using C");
        Ok(Self::posix())
    }

    /// Lowercase language subtag, e.g. `"en"`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region subtag, e.g. `"US"`.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The segmentation suppression option.
    pub fn suppression(&self) -> Suppression {
        self.suppression
    }

    /// Replace the segmentation suppression option.
    #[must_use]
    pub fn with_suppression(mut self, suppression: Suppression) -> Self {
        self.suppression = suppression;
        self
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::posix()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        for variant in &self.variants {
            write!(f, "-{variant}")?;
        }
        write!(f, "-u-ss-{}", self.suppression.keyword())
    }
}

fn parse_suppression(value: &str) -> Option<Suppression> {
    match value.to_ascii_lowercase().as_str() {
        "standard" => Some(Suppression::Standard),
        "none" => Some(Suppression::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let pairs: Vec<(String, OsString)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), OsString::from(*v)))
            .collect();
        move |name| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_posix_spellings() {
        assert_eq!(Locale::parse("de_DE.UTF-8@euro").unwrap().to_string(), "de-DE-u-ss-standard");
        assert_eq!(Locale::parse("C.UTF-8").unwrap(), Locale::posix());
        assert_eq!(Locale::parse("POSIX").unwrap().to_string(), "en-US-posix-u-ss-standard");
        assert_eq!(
            Locale::parse("en_US@ss=none").unwrap().suppression(),
            Suppression::None
        );
    }

    #[test]
    fn test_bcp47_spellings() {
        let locale = Locale::parse("zh-hant-tw").unwrap();
        assert_eq!(locale.to_string(), "zh-Hant-TW-u-ss-standard");

        let locale = Locale::parse("fr-CA-u-ss-none").unwrap();
        assert_eq!(locale.language(), "fr");
        assert_eq!(locale.suppression(), Suppression::None);

        assert_eq!(Locale::parse("es-419").unwrap().region(), Some("419"));
    }

    #[test]
    fn test_malformed() {
        for raw in ["", "  ", "english", "e", "en_US_x!", "en-u-ss", "en@ss=loud"] {
            let err = Locale::parse(raw).unwrap_err();
            assert!(
                matches!(err, Error::LocaleResolution { .. }),
                "{raw:?} should fail"
            );
        }
    }

    #[test]
    fn test_env_priority() {
        let lookup = env(&[("LANG", "fr_FR.UTF-8"), ("LC_CTYPE", "de_DE"), ("LC_ALL", "")]);
        let locale = Locale::resolve_with(None, lookup).unwrap();
        assert_eq!(locale.language(), "de");
    }

    #[test]
    fn test_explicit_wins() {
        let lookup = env(&[("LC_ALL", "de_DE")]);
        let locale = Locale::resolve_with(Some("ja_JP"), lookup).unwrap();
        assert_eq!(locale.language(), "ja");
    }

    #[test]
    fn test_unset_is_posix() {
        let locale = Locale::resolve_with(None, env(&[])).unwrap();
        assert_eq!(locale, Locale::posix());
    }

    #[test]
    fn test_bad_env_value_is_fatal() {
        let lookup = env(&[("LC_ALL", "not a locale")]);
        assert!(Locale::resolve_with(None, lookup).is_err());
    }
}
