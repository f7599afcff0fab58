//! User preferences consumed by the shortcut core.
//!
//! Only the UI language matters here. Everything else in the settings file
//! (theme, opacity, window geometry) belongs to the presentation layer and is
//! carried through untouched.

use crate::description::language_code;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Locale used when the settings file does not name one.
pub const DEFAULT_LOCALE: &str = "en_US";

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Contents of `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// UI locale, e.g. `en_US` or `zh_CN`.
    #[serde(default = "default_locale")]
    pub language: String,

    /// Preferences owned by other components, preserved on save.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_locale(),
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Base language code used to pick shortcut descriptions (`en_US` → `en`).
    pub fn language_code(&self) -> String {
        language_code(&self.language)
    }
}
