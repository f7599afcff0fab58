//! Shortcut and settings files on disk.
//!
//! Covers:
//! - path helpers (`config_dir`, `shortcuts_path`, `settings_path`)
//! - `load_table`, which never fails and substitutes the seed table
//! - strict `read_table_file` for explicit imports
//! - atomic `save_table` / `save_settings`

use crate::defaults::seed_table;
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::table::ShortcutTable;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "shortcut-overlay";

/// File name of the shortcut table.
pub const SHORTCUTS_FILE: &str = "shortcuts.json";

/// File name of the user settings.
pub const SETTINGS_FILE: &str = "settings.json";

/// Get the configuration directory.
///
/// `%APPDATA%\shortcut-overlay` on Windows, `~/.config/shortcut-overlay`
/// elsewhere. Falls back to a relative directory when no home is known.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join(APP_DIR_NAME)
        } else {
            PathBuf::from(APP_DIR_NAME)
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join(APP_DIR_NAME)
        } else {
            PathBuf::from(APP_DIR_NAME)
        }
    }
}

/// Path of the shortcut table inside `dir`.
pub fn shortcuts_path(dir: &Path) -> PathBuf {
    dir.join(SHORTCUTS_FILE)
}

/// Path of the settings file inside `dir`.
pub fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

/// Recoverable condition reported by [`load_table`].
#[derive(Debug, Error)]
pub enum LoadWarning {
    /// No shortcut file existed; the seed table was used (and written out if possible).
    #[error("shortcut file {} not found, using built-in shortcuts", .0.display())]
    Missing(PathBuf),

    /// The shortcut file could not be read, parsed or validated; the seed
    /// table was used and the file was left untouched.
    #[error("shortcut file {} is unusable, using built-in shortcuts: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Result of [`load_table`]: always a usable table, plus any warning.
#[derive(Debug)]
pub struct TableLoad {
    pub table: ShortcutTable,
    pub warning: Option<LoadWarning>,
}

/// Load the shortcut table, substituting the seed table on any failure.
///
/// Nothing here propagates an error: a missing file is created from the seed
/// table, and a malformed one is reported through [`TableLoad::warning`].
pub fn load_table(path: &Path) -> TableLoad {
    log::info!("Shortcut table path: {:?}", path);

    if !path.exists() {
        log::info!("Shortcut file not found, creating default at {:?}", path);
        let table = seed_table();
        if let Err(e) = save_table(path, &table) {
            log::error!("Failed to save default shortcut table: {}", e);
        }
        return TableLoad {
            table,
            warning: Some(LoadWarning::Missing(path.to_path_buf())),
        };
    }

    match read_table_file(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} shortcuts for {} applications from {:?}",
                table.shortcut_count(),
                table.len(),
                path
            );
            TableLoad {
                table,
                warning: None,
            }
        }
        Err(source) => {
            let warning = LoadWarning::Malformed {
                path: path.to_path_buf(),
                source,
            };
            log::warn!("{}", warning);
            TableLoad {
                table: seed_table(),
                warning: Some(warning),
            }
        }
    }
}

/// Read and validate a shortcut file, failing on any problem.
pub fn read_table_file(path: &Path) -> Result<ShortcutTable, ConfigError> {
    let contents = fs::read_to_string(path)?;
    ShortcutTable::from_json_str(&contents)
}

/// Save the shortcut table in canonical form.
pub fn save_table(path: &Path, table: &ShortcutTable) -> Result<(), ConfigError> {
    let json = table.to_json_string_pretty()?;
    write_atomic(path, &json)
}

/// Load settings, falling back to defaults on any error.
///
/// A missing file is created with the defaults.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        let settings = Settings::default();
        if let Err(e) = save_settings(path, &settings) {
            log::error!("Failed to save default settings: {}", e);
        }
        return settings;
    }

    let parsed = fs::read_to_string(path)
        .map_err(ConfigError::from)
        .and_then(|contents| serde_json::from_str::<Settings>(&contents).map_err(ConfigError::from));
    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!(
                "Error loading settings from {:?}: {}. Using default settings.",
                path,
                e
            );
            Settings::default()
        }
    }
}

/// Save settings.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(settings)?;
    write_atomic(path, &json)
}

/// Write to a temp file then rename over the target so a crash never leaves
/// a half-written file behind.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
