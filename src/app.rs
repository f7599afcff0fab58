//! Overlay application state.
//!
//! [`ShortcutOverlay`] owns the loaded settings and the shared shortcut
//! table; [`OverlaySession`] follows one input stream and answers what the
//! overlay should show for it. Platform concerns (which window has focus,
//! which language the UI uses) come in through the collaborator traits below
//! so the session can be driven by tests or the CLI just as well as by real
//! hooks.

mod overlay;
mod session;

pub use overlay::ShortcutOverlay;
pub use session::{OverlaySession, SessionEvent};

use shortcut_overlay_config::Settings;

/// Reports the executable name of the foreground application.
pub trait ForegroundAppSource {
    /// File name of the foreground executable (`notepad.exe`), or `None`
    /// when it cannot be determined.
    fn current_executable(&mut self) -> Option<String>;
}

/// Reports the language descriptions should be shown in.
pub trait LanguageSource {
    /// Base language code, e.g. `en`.
    fn preferred_language(&self) -> String;
}

impl LanguageSource for Settings {
    fn preferred_language(&self) -> String {
        self.language_code()
    }
}

/// A foreground source that always reports the same executable.
#[derive(Debug, Clone, Default)]
pub struct FixedForegroundApp(pub Option<String>);

impl ForegroundAppSource for FixedForegroundApp {
    fn current_executable(&mut self) -> Option<String> {
        self.0.clone()
    }
}
