// The fixed language set offered by the UI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the service can translate between.
///
/// Serialized as its ISO-639-1 code, so config files and query strings
/// round-trip through the same representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
    ];

    /// ISO-639-1 code used on the wire and in config files.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
        }
    }

    /// Display label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "Inglês",
            Language::Spanish => "Espanhol",
            Language::French => "Francês",
            Language::German => "Alemão",
            Language::Italian => "Italiano",
            Language::Portuguese => "Português",
        }
    }

    /// Next language in the selector, wrapping around.
    pub fn next(self) -> Language {
        let index = Language::ALL
            .iter()
            .position(|lang| *lang == self)
            .unwrap_or(0);
        Language::ALL[(index + 1) % Language::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// An ordered source/target pair describing a translation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    pub fn new(source: Language, target: Language) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for LanguagePair {
    /// The `langpair` wire format, e.g. `pt|en`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source.code(), self.target.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        let err = "xx".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "unknown language code: xx");
    }

    #[test]
    fn pair_formats_for_the_wire() {
        let pair = LanguagePair::new(Language::Portuguese, Language::English);
        assert_eq!(pair.to_string(), "pt|en");
    }

    #[test]
    fn next_cycles_through_all_options() {
        let mut lang = Language::English;
        for _ in 0..Language::ALL.len() {
            lang = lang.next();
        }
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Language::Portuguese).unwrap();
        assert_eq!(json, "\"pt\"");
        let back: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(back, Language::German);
    }
}
