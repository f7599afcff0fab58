//! Configuration system for shortcut-overlay.
//!
//! This crate owns the persisted data the shortcut core works from:
//!
//! - Combo labels and modifier sets
//! - Shortcut descriptions and language selection
//! - The validated shortcut table, its editing and import operations
//! - The built-in seed table
//! - User settings (UI language)
//! - Loading and saving both files

pub mod combo;
pub mod defaults;
pub mod description;
pub mod error;
pub mod persistence;
pub mod settings;
pub mod table;

// Re-export main types for convenience
pub use combo::{Modifier, ModifierSet, NO_MODIFIER};
pub use defaults::seed_table;
pub use description::{Description, fallback_language, language_code};
pub use error::{ComboLabelError, ConfigError, ValidationIssue};
pub use persistence::{
    LoadWarning, TableLoad, load_settings, load_table, read_table_file, save_settings, save_table,
};
pub use settings::Settings;
pub use table::{AppEntry, DEFAULT_APP, ImportMode, KeyGroup, ShortcutTable};
