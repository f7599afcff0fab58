//! Application context: files on disk plus the shared shortcut table.

use super::OverlaySession;
use shortcut_overlay_config::persistence::{self, settings_path, shortcuts_path};
use shortcut_overlay_config::{
    ConfigError, ImportMode, LoadWarning, Settings, ShortcutTable, ValidationIssue,
};
use shortcut_overlay_keybindings::ShortcutStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loaded settings and shortcut table for one configuration directory.
///
/// Every change to the table goes through here so that what is on disk and
/// what sessions resolve against never disagree: the new table is saved
/// first and only swapped in once the save succeeded.
#[derive(Debug)]
pub struct ShortcutOverlay {
    config_dir: PathBuf,
    settings: Settings,
    store: Arc<ShortcutStore>,
    load_warning: Option<LoadWarning>,
}

impl ShortcutOverlay {
    /// Load settings and shortcuts from `config_dir`.
    ///
    /// Never fails: missing files are created with defaults and a malformed
    /// shortcut file is replaced in memory by the seed table (see
    /// [`Self::load_warning`]).
    pub fn load(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        log::info!("Using config directory {:?}", config_dir);

        let settings = persistence::load_settings(&settings_path(&config_dir));
        let loaded = persistence::load_table(&shortcuts_path(&config_dir));
        if let Some(warning) = &loaded.warning {
            log::warn!("{}", warning);
        }

        Self {
            config_dir,
            settings,
            store: Arc::new(ShortcutStore::new(loaded.table)),
            load_warning: loaded.warning,
        }
    }

    /// Load from the platform config directory.
    pub fn load_default() -> Self {
        Self::load(persistence::config_dir())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn shortcuts_path(&self) -> PathBuf {
        shortcuts_path(&self.config_dir)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<ShortcutStore> {
        &self.store
    }

    /// Why the shortcut file on disk was not used as-is, if it wasn't.
    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.load_warning.as_ref()
    }

    /// Start a session for one input stream, in the configured language.
    pub fn session(&self) -> OverlaySession {
        OverlaySession::new(Arc::clone(&self.store), &self.settings)
    }

    /// Persist `table` and make it the active table.
    ///
    /// If saving fails the previous table stays active.
    pub fn apply_table(&self, table: ShortcutTable) -> Result<Arc<ShortcutTable>, ConfigError> {
        persistence::save_table(&self.shortcuts_path(), &table)?;
        Ok(self.store.replace(table))
    }

    /// Validate an edited document and apply it.
    pub fn apply_json(&self, value: Value) -> Result<Arc<ShortcutTable>, ConfigError> {
        let table = ShortcutTable::from_json_value(value)?;
        self.apply_table(table)
    }

    /// Apply an editor operation to a copy of the active table, then persist
    /// and activate the result.
    pub fn edit<F, T>(&self, edit: F) -> Result<T, ConfigError>
    where
        F: FnOnce(&mut ShortcutTable) -> Result<T, ValidationIssue>,
    {
        let mut table = ShortcutTable::clone(&self.store.snapshot());
        let result = edit(&mut table).map_err(|issue| ConfigError::Validation(vec![issue]))?;
        self.apply_table(table)?;
        Ok(result)
    }

    /// Import a shortcut file, merging into or replacing the active table.
    ///
    /// The file must be a valid table; on any error nothing changes.
    pub fn import_file(
        &self,
        path: &Path,
        mode: ImportMode,
    ) -> Result<Arc<ShortcutTable>, ConfigError> {
        let imported = persistence::read_table_file(path)?;
        log::info!(
            "Importing {} shortcuts from {:?} ({:?})",
            imported.shortcut_count(),
            path,
            mode
        );
        let mut table = ShortcutTable::clone(&self.store.snapshot());
        table.import(imported, mode);
        self.apply_table(table)
    }

    /// Change the UI language and save the settings file.
    pub fn set_language(&mut self, locale: &str) -> Result<(), ConfigError> {
        self.settings.language = locale.to_string();
        persistence::save_settings(&settings_path(&self.config_dir), &self.settings)
    }
}
