//! Shared shortcut table with atomic replacement.
//!
//! Readers take a snapshot (`Arc<ShortcutTable>`) and resolve against it
//! without locking. Replacing the table is a single pointer swap, so a
//! reader sees either the old table or the new one in full.
//!
//! Replacement only happens on explicit request (editor save, import);
//! nothing watches the shortcut file.

use crate::resolver;
use arc_swap::ArcSwap;
use serde_json::Value;
use shortcut_overlay_config::{ShortcutTable, ValidationIssue};
use std::sync::Arc;

/// The active shortcut table.
#[derive(Debug)]
pub struct ShortcutStore {
    table: ArcSwap<ShortcutTable>,
}

impl Default for ShortcutStore {
    fn default() -> Self {
        Self::new(ShortcutTable::default())
    }
}

impl ShortcutStore {
    pub fn new(table: ShortcutTable) -> Self {
        Self {
            table: ArcSwap::from_pointee(table),
        }
    }

    /// The current table. Stays valid (and unchanged) after later replacements.
    pub fn snapshot(&self) -> Arc<ShortcutTable> {
        self.table.load_full()
    }

    /// Swap in an already validated table.
    pub fn replace(&self, table: ShortcutTable) -> Arc<ShortcutTable> {
        let table = Arc::new(table);
        self.table.store(Arc::clone(&table));
        log::info!(
            "Shortcut table replaced ({} applications, {} shortcuts)",
            table.len(),
            table.shortcut_count()
        );
        table
    }

    /// Validate an edited or imported document and swap it in.
    ///
    /// On any validation issue the current table stays active and every
    /// issue is returned.
    pub fn replace_from_json(
        &self,
        value: Value,
    ) -> Result<Arc<ShortcutTable>, Vec<ValidationIssue>> {
        match ShortcutTable::from_json_value(value) {
            Ok(table) => Ok(self.replace(table)),
            Err(issues) => {
                log::warn!(
                    "Rejected shortcut table replacement with {} issue(s)",
                    issues.len()
                );
                Err(issues)
            }
        }
    }

    /// Apply an edit to a copy of the current table and swap it in if the
    /// edit succeeds.
    ///
    /// Edits come from a single editor, so concurrent edits are not merged:
    /// the last one to finish wins.
    pub fn edit<F, T>(&self, edit: F) -> Result<T, ValidationIssue>
    where
        F: FnOnce(&mut ShortcutTable) -> Result<T, ValidationIssue>,
    {
        let mut table = ShortcutTable::clone(&self.table.load());
        let result = edit(&mut table)?;
        self.replace(table);
        Ok(result)
    }

    /// Resolve against the current table. See [`resolver::resolve`].
    pub fn resolve(
        &self,
        app: &str,
        combo_label: &str,
        key: &str,
        language: &str,
    ) -> Option<String> {
        let table = self.table.load();
        resolver::resolve(&table, app, combo_label, key, language).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shortcut_overlay_config::Description;
    use std::thread;

    fn notepad() -> ShortcutTable {
        ShortcutTable::from_json_value(json!({
            "NOTEPAD.EXE": { "Ctrl": { "S": "Save" } }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_through_store() {
        let store = ShortcutStore::new(notepad());
        assert_eq!(
            store.resolve("notepad.exe", "Ctrl", "S", "en").as_deref(),
            Some("Save")
        );
        assert_eq!(store.resolve("notepad.exe", "Ctrl", "Q", "en"), None);
    }

    #[test]
    fn test_replace_from_json_rejects_and_keeps_prior() {
        let store = ShortcutStore::new(notepad());
        let issues = store
            .replace_from_json(json!({ "NOTEPAD.EXE": { "Ctrl+Nope": {} } }))
            .unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(*store.snapshot(), notepad());
    }

    #[test]
    fn test_replace_from_json_swaps() {
        let store = ShortcutStore::new(notepad());
        store
            .replace_from_json(json!({ "DEFAULT": { "NoModifier": { "F1": "Help" } } }))
            .unwrap();
        assert_eq!(store.resolve("notepad.exe", "Ctrl", "S", "en"), None);
        assert_eq!(
            store.resolve("notepad.exe", "NoModifier", "F1", "en").as_deref(),
            Some("Help")
        );
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let store = ShortcutStore::new(notepad());
        let before = store.snapshot();
        store.replace(ShortcutTable::new());
        assert_eq!(*before, notepad());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_edit_success_and_failure() {
        let store = ShortcutStore::new(notepad());
        store
            .edit(|table| {
                table.set_shortcut("NOTEPAD.EXE", "Ctrl", "O", Description::from("Open"))
            })
            .unwrap();
        assert_eq!(
            store.resolve("NOTEPAD.EXE", "Ctrl", "O", "en").as_deref(),
            Some("Open")
        );

        let before = store.snapshot();
        let err = store
            .edit(|table| {
                table.remove_shortcut("NOTEPAD.EXE", "Ctrl", "O")?;
                table.remove_app("MISSING.EXE")
            })
            .unwrap_err();
        assert_eq!(err, ValidationIssue::UnknownApp("MISSING.EXE".to_string()));
        // The partial edit was discarded.
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn test_readers_never_see_partial_tables() {
        let table_with = |text: &str| {
            let mut table = ShortcutTable::new();
            for n in 1..=24 {
                table
                    .set_shortcut("APP.EXE", "Ctrl", &format!("F{n}"), Description::from(text))
                    .unwrap();
            }
            table
        };
        let store = Arc::new(ShortcutStore::new(table_with("old")));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let snapshot = store.snapshot();
                        let texts: std::collections::BTreeSet<String> = (1..=24)
                            .filter_map(|n| {
                                resolver::resolve(&snapshot, "APP.EXE", "Ctrl", &format!("F{n}"), "en")
                                    .map(str::to_string)
                            })
                            .collect();
                        assert_eq!(texts.len(), 1, "mixed table observed: {texts:?}");
                    }
                })
            })
            .collect();

        for i in 0..200 {
            store.replace(table_with(if i % 2 == 0 { "new" } else { "old" }));
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
