//! Key normalizer.
//!
//! Turns raw key identifiers as delivered by keyboard hook libraries
//! (`"left ctrl"`, `"a"`, `"page up"`, `"print screen"`, `"KeyA"`, ...) into
//! the canonical key names used in the shortcut table (`"A"`, `"PAGEUP"`,
//! `"PRTSC"`, ...). Modifier keys are recognized separately so they can be
//! routed to the [`ModifierTracker`](crate::ModifierTracker).

use shortcut_overlay_config::Modifier;
use std::fmt;
use thiserror::Error;

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Release,
}

impl fmt::Display for KeyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEventKind::Press => f.write_str("press"),
            KeyEventKind::Release => f.write_str("release"),
        }
    }
}

/// One key event as delivered by the input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub kind: KeyEventKind,
    /// Key identifier exactly as the input layer reported it.
    pub raw: String,
    /// The input layer flagged this key as a modifier.
    ///
    /// Modifiers are still recognized by name when the flag is not set.
    pub is_modifier: bool,
}

impl RawKeyEvent {
    pub fn press(raw: impl Into<String>) -> Self {
        Self {
            kind: KeyEventKind::Press,
            raw: raw.into(),
            is_modifier: false,
        }
    }

    pub fn release(raw: impl Into<String>) -> Self {
        Self {
            kind: KeyEventKind::Release,
            raw: raw.into(),
            is_modifier: false,
        }
    }

    /// Mark the event as a modifier key, as reported by the input layer.
    pub fn modifier(mut self) -> Self {
        self.is_modifier = true;
        self
    }
}

/// Which physical copy of a modifier key was used.
///
/// `Either` is used when the input layer does not say (`"ctrl"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
    Either,
}

/// A physical modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModifierKey {
    pub modifier: Modifier,
    pub side: Side,
}

impl ModifierKey {
    pub fn new(modifier: Modifier, side: Side) -> Self {
        Self { modifier, side }
    }

    /// A modifier key whose side is unknown.
    pub fn either(modifier: Modifier) -> Self {
        Self::new(modifier, Side::Either)
    }
}

/// Result of normalizing a raw key identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedKey {
    /// A modifier key, for the modifier tracker.
    Modifier(ModifierKey),
    /// A canonical key name, for shortcut lookup.
    Key(String),
}

/// Error type for key normalization failures.
///
/// Neither variant is fatal: the event is simply dropped from resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("empty key identifier")]
    Empty,

    #[error("unrecognized key '{0}'")]
    UnrecognizedKey(String),

    #[error("unrecognized modifier key '{0}'")]
    UnrecognizedModifier(String),
}

/// Normalize a raw key identifier.
///
/// Rules:
/// - Modifiers: `ctrl`, `left ctrl`, `right shift`, `alt gr`, `left windows`,
///   `cmd`, `meta`, `ControlLeft`, `lshift`, ...
/// - Letters: single uppercase letter (`a` → `A`, also `KeyA` → `A`)
/// - Digits: `0`-`9` (also `Digit1`, `numpad 1`)
/// - Function keys: `F1`-`F24`
/// - Named keys: `ESC`, `ENTER`, `SPACE`, `TAB`, `DELETE`, `HOME`, `END`,
///   `PAGEUP`, `PAGEDOWN`, `LEFT`, `RIGHT`, `UP`, `DOWN`, `PRTSC`, `PAUSE`,
///   `BACKSPACE`, `INSERT`, `CAPSLOCK`, `SCROLLLOCK`, `MENU`
/// - Symbols: the literal character, also from word names (`comma` → `,`)
pub fn normalize_key(raw: &str) -> Result<NormalizedKey, NormalizeError> {
    if raw == " " {
        return Ok(NormalizedKey::Key("SPACE".to_string()));
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return single_char_key(c)
            .map(NormalizedKey::Key)
            .ok_or_else(|| NormalizeError::UnrecognizedKey(raw.to_string()));
    }

    let name = canonical_spelling(trimmed);

    if let Some(modifier) = parse_modifier(&name) {
        return Ok(NormalizedKey::Modifier(modifier));
    }

    parse_function_key(&name)
        .or_else(|| parse_key_code(&name))
        .or_else(|| parse_named_key(&name).map(str::to_string))
        .or_else(|| parse_symbol_name(&name).map(str::to_string))
        .map(NormalizedKey::Key)
        .ok_or_else(|| NormalizeError::UnrecognizedKey(raw.to_string()))
}

/// Normalize a raw event, honouring its modifier flag.
///
/// A flagged event whose name is not a known modifier is dropped rather than
/// looked up as an ordinary key, so it can never resolve a shortcut.
pub fn normalize_event(event: &RawKeyEvent) -> Result<NormalizedKey, NormalizeError> {
    match normalize_key(&event.raw) {
        Ok(NormalizedKey::Key(_)) | Err(NormalizeError::UnrecognizedKey(_))
            if event.is_modifier =>
        {
            Err(NormalizeError::UnrecognizedModifier(event.raw.clone()))
        }
        result => result,
    }
}

/// Lower-case, `_` as space, runs of whitespace collapsed.
fn canonical_spelling(name: &str) -> String {
    name.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn single_char_key(c: char) -> Option<String> {
    if c.is_alphabetic() {
        Some(c.to_uppercase().collect())
    } else if c.is_control() || c.is_whitespace() {
        None
    } else {
        Some(c.to_string())
    }
}

/// Parse a modifier key name, with an optional side.
fn parse_modifier(name: &str) -> Option<ModifierKey> {
    if name == "alt gr" || name == "altgr" {
        return Some(ModifierKey::new(Modifier::Alt, Side::Right));
    }
    if let Some(modifier) = Modifier::from_token(name) {
        return Some(ModifierKey::either(modifier));
    }

    const PREFIXES: [(&str, Side); 4] = [
        ("left ", Side::Left),
        ("right ", Side::Right),
        ("l", Side::Left),
        ("r", Side::Right),
    ];
    const SUFFIXES: [(&str, Side); 4] = [
        (" left", Side::Left),
        (" right", Side::Right),
        ("left", Side::Left),
        ("right", Side::Right),
    ];

    for (prefix, side) in PREFIXES {
        if let Some(modifier) = name.strip_prefix(prefix).and_then(Modifier::from_token) {
            return Some(ModifierKey::new(modifier, side));
        }
    }
    for (suffix, side) in SUFFIXES {
        if let Some(modifier) = name.strip_suffix(suffix).and_then(Modifier::from_token) {
            return Some(ModifierKey::new(modifier, side));
        }
    }
    None
}

/// `f1`..`f24`.
fn parse_function_key(name: &str) -> Option<String> {
    let digits = name.strip_prefix('f')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let number: u8 = digits.parse().ok()?;
    (1..=24).contains(&number).then(|| format!("F{number}"))
}

/// Position-style key codes: `keya`, `digit1`, `numpad1`, `numpad 1`.
fn parse_key_code(name: &str) -> Option<String> {
    let single = |rest: &str, accept: fn(&char) -> bool| {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if accept(&c) => Some(c.to_ascii_uppercase().to_string()),
            _ => None,
        }
    };

    if let Some(rest) = name.strip_prefix("key") {
        return single(rest, char::is_ascii_alphabetic);
    }
    if let Some(rest) = name.strip_prefix("digit") {
        return single(rest, char::is_ascii_digit);
    }
    if let Some(rest) = name.strip_prefix("numpad") {
        return single(rest.trim_start(), char::is_ascii_digit);
    }
    None
}

/// Parse a named key into its canonical name.
fn parse_named_key(name: &str) -> Option<&'static str> {
    match name {
        "esc" | "escape" => Some("ESC"),
        "enter" | "return" | "numpad enter" | "numpadenter" => Some("ENTER"),
        "space" | "spacebar" | "space bar" => Some("SPACE"),
        "tab" => Some("TAB"),
        "delete" | "del" => Some("DELETE"),
        "home" => Some("HOME"),
        "end" => Some("END"),
        "page up" | "pageup" | "pgup" | "prior" => Some("PAGEUP"),
        "page down" | "pagedown" | "pgdn" | "next" => Some("PAGEDOWN"),

        // Arrow keys
        "left" | "arrowleft" | "arrow left" | "left arrow" => Some("LEFT"),
        "right" | "arrowright" | "arrow right" | "right arrow" => Some("RIGHT"),
        "up" | "arrowup" | "arrow up" | "up arrow" => Some("UP"),
        "down" | "arrowdown" | "arrow down" | "down arrow" => Some("DOWN"),

        "print screen" | "printscreen" | "print scrn" | "printscr" | "prtsc" | "prtscn"
        | "snapshot" => Some("PRTSC"),
        "pause" | "pause break" | "break" => Some("PAUSE"),
        "backspace" | "back space" => Some("BACKSPACE"),
        "insert" | "ins" => Some("INSERT"),
        "caps lock" | "capslock" | "caps" => Some("CAPSLOCK"),
        "scroll lock" | "scrolllock" | "scrlk" => Some("SCROLLLOCK"),
        "menu" | "apps" | "application" | "context menu" | "contextmenu" => Some("MENU"),

        _ => None,
    }
}

/// Parse a word-named symbol key into the symbol itself.
fn parse_symbol_name(name: &str) -> Option<&'static str> {
    match name {
        "semicolon" => Some(";"),
        "colon" => Some(":"),
        "equals" | "equal" => Some("="),
        "comma" | "separator" => Some(","),
        "minus" | "subtract" | "hyphen" | "numpad minus" | "numpadsubtract" => Some("-"),
        "period" | "dot" | "decimal" | "numpad decimal" | "numpaddecimal" => Some("."),
        "slash" | "forward slash" | "divide" | "numpad divide" | "numpaddivide" => Some("/"),
        "backtick" | "grave" | "grave accent" | "backquote" => Some("`"),
        "open bracket" | "left bracket" | "bracketleft" => Some("["),
        "close bracket" | "right bracket" | "bracketright" => Some("]"),
        "backslash" | "back slash" => Some("\\"),
        "apostrophe" | "single quote" | "quote" => Some("'"),
        "multiply" | "asterisk" | "numpad multiply" | "numpadmultiply" => Some("*"),
        "add" | "plus" | "numpad plus" | "numpadadd" => Some("+"),
        _ => None,
    }
}
