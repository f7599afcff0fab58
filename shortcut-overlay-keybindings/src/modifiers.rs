//! Modifier state tracking.
//!
//! The tracker is an owned state object mutated only by the input event
//! stream. It records which physical modifier keys are held, so that letting
//! go of left Ctrl while right Ctrl is still down keeps Ctrl active, and
//! derives the canonical [`ModifierSet`] from them.

use crate::normalizer::{KeyEventKind, ModifierKey, Side};
use shortcut_overlay_config::{Modifier, ModifierSet};
use std::collections::BTreeSet;

/// Set of currently held modifier keys.
#[derive(Debug, Clone, Default)]
pub struct ModifierTracker {
    held: BTreeSet<ModifierKey>,
}

impl ModifierTracker {
    /// Create a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a press or release. Returns `true` if the derived modifier set changed.
    pub fn apply(&mut self, kind: KeyEventKind, key: ModifierKey) -> bool {
        match kind {
            KeyEventKind::Press => self.press(key),
            KeyEventKind::Release => self.release(key),
        }
    }

    /// Record a modifier key going down.
    ///
    /// Auto-repeat presses of a held key are no-ops.
    pub fn press(&mut self, key: ModifierKey) -> bool {
        let before = self.modifiers();
        self.held.insert(key);
        before != self.modifiers()
    }

    /// Record a modifier key going up.
    ///
    /// A release without a side releases both sides. A sided release also
    /// ends a press whose side was unknown. Releasing a key that is not held
    /// is ignored.
    pub fn release(&mut self, key: ModifierKey) -> bool {
        let before = self.modifiers();
        let removed = match key.side {
            Side::Either => {
                let count = self.held.len();
                self.held.retain(|held| held.modifier != key.modifier);
                count != self.held.len()
            }
            Side::Left | Side::Right => {
                let sided = self.held.remove(&key);
                let unsided = self.held.remove(&ModifierKey::either(key.modifier));
                sided || unsided
            }
        };
        if !removed {
            log::trace!("Ignoring release of {:?}, which is not held", key);
        }
        before != self.modifiers()
    }

    /// Forget everything held, e.g. when the listener loses focus or restarts.
    pub fn clear(&mut self) -> bool {
        let changed = !self.held.is_empty();
        self.held.clear();
        changed
    }

    /// The logical modifiers currently held.
    pub fn modifiers(&self) -> ModifierSet {
        ModifierSet::from_modifiers(self.held.iter().map(|key| key.modifier))
    }

    /// Canonical combo label of [`Self::modifiers`], `NoModifier` when empty.
    pub fn combo_label(&self) -> String {
        self.modifiers().label()
    }

    pub fn is_held(&self, modifier: Modifier) -> bool {
        self.held.iter().any(|key| key.modifier == modifier)
    }
}
