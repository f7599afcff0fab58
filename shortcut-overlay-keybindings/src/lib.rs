//! Shortcut resolution core for shortcut-overlay.
//!
//! Turns a stream of raw key events into canonical key names and modifier
//! state, and resolves which shortcut description applies to the current
//! foreground application.
//!
//! Features:
//! - Key normalization from hook-library key names (`left ctrl`, `page up`, `KeyA`)
//! - Modifier tracking with left/right awareness and canonical combo labels
//! - Resolution with app-over-DEFAULT precedence and language fallback
//! - A lock-free shared table that is replaced atomically on edit or import

mod modifiers;
pub mod normalizer;
pub mod resolver;
mod store;

pub use modifiers::ModifierTracker;
pub use normalizer::{
    KeyEventKind, ModifierKey, NormalizeError, NormalizedKey, RawKeyEvent, Side, normalize_event,
    normalize_key,
};
pub use resolver::{
    KeyGroupView, effective_group, lookup_description, resolve, resolve_with, visible_shortcuts,
};
pub use store::ShortcutStore;
