//! Abbreviation tables for segmentation suppression.
//!
//! UAX #29 breaks after "Mr. " whenever the next word is capitalized. With
//! `ss=standard`, a sentence boundary directly after one of the locale's
//! listed abbreviations is dropped instead.

use crate::{Locale, Suppression};

const ENGLISH: &[&str] = &[
    "Adm", "Apr", "Aug", "Ave", "Capt", "Co", "Col", "Corp", "Dec", "Dept", "Dr", "Est", "Feb",
    "Fig", "Gen", "Gov", "Inc", "Jan", "Jr", "Jul", "Jun", "Lt", "Ltd", "Mar", "Messrs", "Mr",
    "Mrs", "Ms", "Mt", "No", "Nov", "Oct", "Prof", "Rep", "Rev", "Sen", "Sep", "Sept", "Sgt",
    "Sr", "St", "U.K", "U.S", "Vol", "a.m", "e.g", "etc", "i.e", "p.m", "vs",
];

const GERMAN: &[&str] = &[
    "Abs", "Abt", "Dr", "Fr", "Hr", "Hrsg", "Nr", "Prof", "St", "Str", "bzw", "ca", "d.h",
    "evtl", "ggf", "inkl", "u.a", "usw", "vgl", "z.B", "z.T",
];

const FRENCH: &[&str] = &[
    "Dr", "M", "MM", "Me", "Mgr", "Mlle", "Mme", "Pr", "St", "av", "bd", "cf", "env", "etc",
    "p.ex", "vol",
];

const SPANISH: &[&str] = &[
    "Avda", "Dr", "Dra", "EE.UU", "Ilmo", "Lic", "Sr", "Sra", "Srta", "Ud", "Uds", "etc", "p.ej",
    "pág", "vol",
];

/// Abbreviations after which a sentence boundary is suppressed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SuppressionTable {
    abbreviations: &'static [&'static str],
}

impl SuppressionTable {
    /// The table for `locale`, or `None` when suppression is off or the
    /// language has no table.
    pub(crate) fn for_locale(locale: &Locale) -> Option<Self> {
        if locale.suppression() == Suppression::None {
            return None;
        }
        let abbreviations = match locale.language() {
            "en" => ENGLISH,
            "de" => GERMAN,
            "fr" => FRENCH,
            "es" => SPANISH,
            _ => return None,
        };
        Some(Self { abbreviations })
    }

    /// Whether a boundary at the end of `segment` should be dropped.
    pub(crate) fn suppresses(&self, segment: &str) -> bool {
        let Some(stem) = segment.trim_end().strip_suffix('.') else {
            return false;
        };
        let word = stem
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '(' | '[' | '"' | '\u{201C}'))
            .next()
            .unwrap_or(stem);
        self.abbreviations.contains(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> SuppressionTable {
        SuppressionTable::for_locale(&Locale::parse("en_US").unwrap()).unwrap()
    }

    #[test]
    fn test_suppresses_listed_abbreviation() {
        let table = english();
        assert!(table.suppresses("Hello Mr. "));
        assert!(table.suppresses("(e.g. "));
        assert!(table.suppresses("Dr."));
    }

    #[test]
    fn test_ignores_ordinary_words() {
        let table = english();
        assert!(!table.suppresses("It was Mr "));
        assert!(!table.suppresses("The end. "));
        assert!(!table.suppresses("What? "));
    }

    #[test]
    fn test_table_selection() {
        assert!(SuppressionTable::for_locale(&Locale::parse("ja_JP").unwrap()).is_none());
        assert!(SuppressionTable::for_locale(&Locale::parse("en_US@ss=none").unwrap()).is_none());
        let german = SuppressionTable::for_locale(&Locale::parse("de_AT").unwrap()).unwrap();
        assert!(german.suppresses("z.B. "));
    }
}
