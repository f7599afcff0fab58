//! Modifier sets and their canonical combo labels.
//!
//! A combo label is the string key under which an application's shortcuts are
//! grouped in the shortcut file, e.g. `"Ctrl+Shift"` or `"NoModifier"`.
//! Labels are always derived from a [`ModifierSet`], never stored as free text,
//! so two orderings of the same modifiers can never produce two groups.

use crate::error::ComboLabelError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Label used for shortcuts that apply when no modifier is held.
pub const NO_MODIFIER: &str = "NoModifier";

/// A tracked modifier key. Declaration order is the canonical label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Win,
}

impl Modifier {
    /// All modifiers in canonical order.
    pub const ALL: [Modifier; 4] = [Modifier::Ctrl, Modifier::Shift, Modifier::Alt, Modifier::Win];

    /// Canonical token used in combo labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Shift => "Shift",
            Modifier::Alt => "Alt",
            Modifier::Win => "Win",
        }
    }

    /// Parse a single label token, accepting common aliases.
    ///
    /// Matching is case-insensitive: `ctrl`, `Control`, `option`, `Cmd`,
    /// `Super`, `Meta` and `Windows` are all recognized.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "shift" => Some(Modifier::Shift),
            "alt" | "option" => Some(Modifier::Alt),
            "win" | "windows" | "super" | "meta" | "cmd" | "command" => Some(Modifier::Win),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Modifier::Ctrl => 0b0001,
            Modifier::Shift => 0b0010,
            Modifier::Alt => 0b0100,
            Modifier::Win => 0b1000,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of held modifiers.
///
/// Ordered by size first, then by canonical modifier order, so that a
/// serialized table lists `NoModifier`, then single modifiers, then chords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub win: bool,
}

impl ModifierSet {
    /// The empty set (`NoModifier`).
    pub const NONE: ModifierSet = ModifierSet {
        ctrl: false,
        shift: false,
        alt: false,
        win: false,
    };

    /// Build a set from any iterator of modifiers. Repeats are harmless.
    pub fn from_modifiers<I: IntoIterator<Item = Modifier>>(modifiers: I) -> Self {
        let mut set = Self::NONE;
        for modifier in modifiers {
            set.insert(modifier);
        }
        set
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Alt => self.alt,
            Modifier::Win => self.win,
        }
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.set(modifier, true);
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.set(modifier, false);
    }

    fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Ctrl => self.ctrl = held,
            Modifier::Shift => self.shift = held,
            Modifier::Alt => self.alt = held,
            Modifier::Win => self.win = held,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.win)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Held modifiers in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }

    fn bits(&self) -> u8 {
        self.iter().fold(0, |acc, m| acc | m.bit())
    }

    /// Canonical combo label: `NoModifier`, or modifiers joined with `+` in
    /// the order Ctrl, Shift, Alt, Win.
    pub fn label(&self) -> String {
        if self.is_empty() {
            return NO_MODIFIER.to_string();
        }
        self.iter()
            .map(Modifier::as_str)
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Parse a combo label as found in a shortcut file.
    ///
    /// Tokens may appear in any order and any case; the result is the same set
    /// regardless, which is what lets a file with `"Shift+Ctrl"` heal into
    /// `"Ctrl+Shift"` on load.
    pub fn parse_label(label: &str) -> Result<Self, ComboLabelError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ComboLabelError::Empty);
        }
        if trimmed.eq_ignore_ascii_case(NO_MODIFIER) {
            return Ok(Self::NONE);
        }

        let mut set = Self::NONE;
        for token in trimmed.split('+') {
            let token = token.trim();
            if token.is_empty() {
                return Err(ComboLabelError::EmptyToken);
            }
            let modifier = Modifier::from_token(token)
                .ok_or_else(|| ComboLabelError::UnknownModifier(token.to_string()))?;
            if set.contains(modifier) {
                return Err(ComboLabelError::RepeatedModifier(modifier.as_str()));
            }
            set.insert(modifier);
        }
        Ok(set)
    }
}

impl Ord for ModifierSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.bits().cmp(&other.bits()))
    }
}

impl PartialOrd for ModifierSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for ModifierSet {
    type Err = ComboLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

impl Serialize for ModifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for ModifierSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse_label(&label).map_err(serde::de::Error::custom)
    }
}
