// Library exports for testing and potential library use
//
// The shortcut core lives in the member crates:
//   - `shortcut-overlay-config`: shortcut table, descriptions, settings, files on disk
//   - `shortcut-overlay-keybindings`: key normalizer, modifier tracker, resolver
//
// This crate glues them into an overlay session and a command line.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;

pub use shortcut_overlay_config as config;
pub use shortcut_overlay_keybindings as keybindings;
