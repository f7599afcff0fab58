//! Shortcut descriptions and language selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language used when a description has no text in the preferred language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Secondary language tried when the preferred language is English.
pub const SECONDARY_LANGUAGE: &str = "zh";

/// Human-readable text shown for a shortcut.
///
/// Either a single string used for every language, or a map from language
/// code (`en`, `zh`, ...) to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl Description {
    /// Build a localized description from `(language, text)` pairs.
    pub fn localized<I, L, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        Description::Localized(
            entries
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        )
    }

    /// Pick the text to display for `preferred` language.
    ///
    /// Plain descriptions ignore the language. Localized descriptions try the
    /// preferred language, then the fallback language, then the
    /// lexicographically smallest language code present. Returns `None` only for
    /// an empty language map.
    pub fn text(&self, preferred: &str) -> Option<&str> {
        match self {
            Description::Plain(text) => Some(text),
            Description::Localized(map) => map
                .get(preferred)
                .or_else(|| map.get(fallback_language(preferred)))
                .or_else(|| map.values().next())
                .map(String::as_str),
        }
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Plain(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description::Plain(text)
    }
}

/// The language tried after `preferred`: `zh` for English, English otherwise.
pub fn fallback_language(preferred: &str) -> &'static str {
    if preferred == DEFAULT_LANGUAGE {
        SECONDARY_LANGUAGE
    } else {
        DEFAULT_LANGUAGE
    }
}

/// Reduce a UI locale such as `en_US` or `zh-CN` to its lower-case base code.
///
/// An empty locale maps to [`DEFAULT_LANGUAGE`].
pub fn language_code(locale: &str) -> String {
    let base = locale
        .trim()
        .split(['_', '-', '.'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if base.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        base
    }
}
