//! Per-input-stream overlay state.

use super::{ForegroundAppSource, LanguageSource};
use shortcut_overlay_config::language_code;
use shortcut_overlay_config::table::normalize_app_name;
use shortcut_overlay_keybindings::{
    KeyEventKind, ModifierTracker, NormalizeError, NormalizedKey, RawKeyEvent, ShortcutStore,
    normalize_event, resolve_with, visible_shortcuts,
};
use std::sync::Arc;

/// What a raw key event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A modifier went down or up and the combo changed to this label.
    ModifiersChanged(String),
    /// A non-modifier key, by canonical name.
    Key { name: String, kind: KeyEventKind },
    /// A modifier event that left the combo as it was (auto-repeat, stray release).
    Ignored,
    /// The key could not be normalized; nothing changed.
    Dropped(NormalizeError),
}

/// Modifier state, foreground application and language for one input stream.
///
/// The session only reads the shared table; every lookup takes a fresh
/// snapshot, so a table replaced mid-session is picked up on the next key.
#[derive(Debug)]
pub struct OverlaySession {
    store: Arc<ShortcutStore>,
    tracker: ModifierTracker,
    /// Normalized executable name, `None` when unknown.
    active_app: Option<String>,
    language: String,
}

impl OverlaySession {
    pub fn new(store: Arc<ShortcutStore>, languages: &dyn LanguageSource) -> Self {
        Self {
            store,
            tracker: ModifierTracker::new(),
            active_app: None,
            language: language_code(&languages.preferred_language()),
        }
    }

    /// Feed one key event from the input layer.
    pub fn handle_event(&mut self, event: &RawKeyEvent) -> SessionEvent {
        match normalize_event(event) {
            Ok(NormalizedKey::Modifier(key)) => {
                if self.tracker.apply(event.kind, key) {
                    let label = self.tracker.combo_label();
                    log::debug!("Combo is now {}", label);
                    SessionEvent::ModifiersChanged(label)
                } else {
                    SessionEvent::Ignored
                }
            }
            Ok(NormalizedKey::Key(name)) => SessionEvent::Key {
                name,
                kind: event.kind,
            },
            Err(e) => {
                log::debug!("Dropping {} of '{}': {}", event.kind, event.raw, e);
                SessionEvent::Dropped(e)
            }
        }
    }

    /// Ask `source` for the foreground application. Returns `true` if it changed.
    pub fn poll_foreground(&mut self, source: &mut dyn ForegroundAppSource) -> bool {
        let executable = source.current_executable();
        self.set_foreground_app(executable.as_deref())
    }

    /// Set the foreground application directly. Returns `true` if it changed.
    ///
    /// An unknown or blank name resolves against `DEFAULT` only.
    pub fn set_foreground_app(&mut self, executable: Option<&str>) -> bool {
        let app = executable
            .map(normalize_app_name)
            .filter(|name| !name.is_empty());
        if app == self.active_app {
            return false;
        }
        log::info!(
            "Foreground application: {}",
            app.as_deref().unwrap_or("<unknown>")
        );
        self.active_app = app;
        true
    }

    /// The input listener lost focus or restarted: forget held modifiers.
    ///
    /// The foreground application and language are kept.
    pub fn focus_lost(&mut self) -> bool {
        let changed = self.tracker.clear();
        if changed {
            log::debug!("Focus lost, modifier state cleared");
        }
        changed
    }

    /// Switch language. Accepts a locale (`zh_CN`) or a bare code (`zh`).
    pub fn set_language(&mut self, locale: &str) {
        self.language = language_code(locale);
    }

    /// Re-read the language from `source`.
    pub fn refresh_language(&mut self, source: &dyn LanguageSource) {
        self.set_language(&source.preferred_language());
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn active_app(&self) -> Option<&str> {
        self.active_app.as_deref()
    }

    pub fn current_combo_label(&self) -> String {
        self.tracker.combo_label()
    }

    pub fn tracker(&self) -> &ModifierTracker {
        &self.tracker
    }

    /// Description of `key` under the current combo, if any.
    pub fn resolve_key(&self, key: &str) -> Option<String> {
        let table = self.store.snapshot();
        resolve_with(
            &table,
            self.app_name(),
            self.tracker.modifiers(),
            key,
            &self.language,
        )
        .map(str::to_string)
    }

    /// Every `(key, text)` pair in effect for the current combo, sorted by key.
    pub fn visible_shortcuts(&self) -> Vec<(String, String)> {
        let table = self.store.snapshot();
        visible_shortcuts(
            &table,
            self.app_name(),
            self.tracker.modifiers(),
            &self.language,
        )
        .into_iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect()
    }

    fn app_name(&self) -> &str {
        self.active_app.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FixedForegroundApp;
    use shortcut_overlay_config::{Settings, ShortcutTable};

    fn store() -> Arc<ShortcutStore> {
        let table = ShortcutTable::from_json_str(
            r#"{
                "NOTEPAD.EXE": { "Ctrl": { "S": { "en": "Save", "zh": "保存" } } },
                "DEFAULT": { "NoModifier": { "F1": "Help" }, "Ctrl": { "C": "Copy" } }
            }"#,
        )
        .unwrap();
        Arc::new(ShortcutStore::new(table))
    }

    fn session() -> OverlaySession {
        OverlaySession::new(store(), &Settings::default())
    }

    /// Reports a scripted sequence of foreground applications.
    struct Scripted(Vec<Option<&'static str>>);

    impl ForegroundAppSource for Scripted {
        fn current_executable(&mut self) -> Option<String> {
            if self.0.is_empty() {
                None
            } else {
                self.0.remove(0).map(str::to_string)
            }
        }
    }

    #[test]
    fn test_modifier_events() {
        let mut session = session();
        assert_eq!(
            session.handle_event(&RawKeyEvent::press("left ctrl")),
            SessionEvent::ModifiersChanged("Ctrl".to_string())
        );
        // Auto-repeat.
        assert_eq!(
            session.handle_event(&RawKeyEvent::press("left ctrl")),
            SessionEvent::Ignored
        );
        assert_eq!(
            session.handle_event(&RawKeyEvent::press("shift")),
            SessionEvent::ModifiersChanged("Ctrl+Shift".to_string())
        );
        assert_eq!(
            session.handle_event(&RawKeyEvent::release("right alt")),
            SessionEvent::Ignored
        );
    }

    #[test]
    fn test_key_events() {
        let mut session = session();
        assert_eq!(
            session.handle_event(&RawKeyEvent::release("page up")),
            SessionEvent::Key {
                name: "PAGEUP".to_string(),
                kind: KeyEventKind::Release
            }
        );
        assert!(matches!(
            session.handle_event(&RawKeyEvent::press("")),
            SessionEvent::Dropped(NormalizeError::Empty)
        ));
        // A key the input layer flags as a modifier is never resolved as a key.
        assert_eq!(
            session.handle_event(&RawKeyEvent::press("fn").modifier()),
            SessionEvent::Dropped(NormalizeError::UnrecognizedModifier("fn".to_string()))
        );
        assert_eq!(
            session.handle_event(&RawKeyEvent::press("left shift").modifier()),
            SessionEvent::ModifiersChanged("Shift".to_string())
        );
    }

    #[test]
    fn test_resolution_follows_foreground_app() {
        let mut session = session();
        session.handle_event(&RawKeyEvent::press("ctrl"));
        assert_eq!(session.resolve_key("s"), None);

        assert!(session.set_foreground_app(Some("notepad.exe")));
        assert!(!session.set_foreground_app(Some("NOTEPAD.EXE")));
        assert_eq!(session.active_app(), Some("NOTEPAD.EXE"));
        assert_eq!(session.resolve_key("s").as_deref(), Some("Save"));
        assert_eq!(session.resolve_key("c").as_deref(), Some("Copy"));
    }

    #[test]
    fn test_poll_foreground() {
        let mut session = session();
        let mut source = Scripted(vec![Some("notepad.exe"), Some("notepad.exe"), None]);
        assert!(session.poll_foreground(&mut source));
        assert!(!session.poll_foreground(&mut source));
        assert!(session.poll_foreground(&mut source));
        assert_eq!(session.active_app(), None);

        let mut fixed = FixedForegroundApp(Some("  ".to_string()));
        assert!(!session.poll_foreground(&mut fixed));
    }

    #[test]
    fn test_focus_lost_keeps_app() {
        let mut session = session();
        session.set_foreground_app(Some("notepad.exe"));
        session.handle_event(&RawKeyEvent::press("ctrl"));
        assert!(session.focus_lost());
        assert!(!session.focus_lost());
        assert_eq!(session.current_combo_label(), "NoModifier");
        assert_eq!(session.active_app(), Some("NOTEPAD.EXE"));
        assert_eq!(session.resolve_key("f1").as_deref(), Some("Help"));
    }

    #[test]
    fn test_language_switch() {
        let mut session = session();
        assert_eq!(session.language(), "en");
        session.set_foreground_app(Some("notepad.exe"));
        session.handle_event(&RawKeyEvent::press("ctrl"));
        session.set_language("zh_CN");
        assert_eq!(session.language(), "zh");
        assert_eq!(session.resolve_key("S").as_deref(), Some("保存"));

        let settings = Settings {
            language: "en_GB".to_string(),
            ..Settings::default()
        };
        session.refresh_language(&settings);
        assert_eq!(session.resolve_key("S").as_deref(), Some("Save"));
    }

    #[test]
    fn test_visible_shortcuts() {
        let mut session = session();
        session.set_foreground_app(Some("notepad.exe"));
        session.handle_event(&RawKeyEvent::press("right ctrl"));
        assert_eq!(
            session.visible_shortcuts(),
            vec![
                ("C".to_string(), "Copy".to_string()),
                ("S".to_string(), "Save".to_string())
            ]
        );
    }

    #[test]
    fn test_sees_replaced_table() {
        let store = store();
        let mut session = OverlaySession::new(Arc::clone(&store), &Settings::default());
        assert_eq!(session.resolve_key("F1").as_deref(), Some("Help"));
        store.replace(ShortcutTable::new());
        assert_eq!(session.resolve_key("F1"), None);
        session.handle_event(&RawKeyEvent::press("ctrl"));
        assert!(session.visible_shortcuts().is_empty());
    }
}
