//! Shortcut resolution.
//!
//! Given the foreground application, the current combo and a key, finds the
//! description to display. The effective shortcuts for an application are
//! its own entry layered over `DEFAULT`, group by group and key by key, with
//! the application winning on any collision. There is no fallback from a
//! combo to `NoModifier`: each combo only sees its own group.
//!
//! Resolution is a pure function of the table and its inputs. `None` means
//! "no shortcut here", which is a normal outcome rather than an error.

use shortcut_overlay_config::table::{normalize_app_name, normalize_key_name};
use shortcut_overlay_config::{DEFAULT_APP, Description, KeyGroup, ModifierSet, ShortcutTable};
use std::collections::BTreeMap;

/// The merged `DEFAULT` + application group for one combo, keyed by key name.
pub type KeyGroupView<'t> = BTreeMap<&'t str, &'t Description>;

/// Resolve a shortcut description from a combo label string.
///
/// An unparsable combo label resolves to `None`.
pub fn resolve<'t>(
    table: &'t ShortcutTable,
    app: &str,
    combo_label: &str,
    key: &str,
    language: &str,
) -> Option<&'t str> {
    match ModifierSet::parse_label(combo_label) {
        Ok(combo) => resolve_with(table, app, combo, key, language),
        Err(e) => {
            log::debug!("Cannot resolve with combo label '{}': {}", combo_label, e);
            None
        }
    }
}

/// Resolve a shortcut description for a modifier set.
pub fn resolve_with<'t>(
    table: &'t ShortcutTable,
    app: &str,
    combo: ModifierSet,
    key: &str,
    language: &str,
) -> Option<&'t str> {
    lookup_description(table, app, combo, key)?.text(language)
}

/// Find the description that applies to `(app, combo, key)`, before any
/// language selection.
pub fn lookup_description<'t>(
    table: &'t ShortcutTable,
    app: &str,
    combo: ModifierSet,
    key: &str,
) -> Option<&'t Description> {
    let key = normalize_key_name(key);
    let (specific, default) = layered_groups(table, app, combo);
    specific
        .and_then(|group| group.get(&key))
        .or_else(|| default.and_then(|group| group.get(&key)))
}

/// Every shortcut in effect for `(app, combo)`: `DEFAULT` overlaid with the
/// application's own group.
pub fn effective_group<'t>(
    table: &'t ShortcutTable,
    app: &str,
    combo: ModifierSet,
) -> KeyGroupView<'t> {
    let (specific, default) = layered_groups(table, app, combo);
    let mut merged = KeyGroupView::new();
    for group in [default, specific].into_iter().flatten() {
        merged.extend(group.iter().map(|(key, desc)| (key.as_str(), desc)));
    }
    merged
}

/// `(key, text)` pairs to display for `(app, combo)` in `language`, sorted by key.
pub fn visible_shortcuts<'t>(
    table: &'t ShortcutTable,
    app: &str,
    combo: ModifierSet,
    language: &str,
) -> Vec<(&'t str, &'t str)> {
    effective_group(table, app, combo)
        .into_iter()
        .filter_map(|(key, desc)| desc.text(language).map(|text| (key, text)))
        .collect()
}

/// The application's group and the `DEFAULT` group for `combo`.
///
/// An empty application name, or `DEFAULT` itself, has no specific layer.
fn layered_groups<'t>(
    table: &'t ShortcutTable,
    app: &str,
    combo: ModifierSet,
) -> (Option<&'t KeyGroup>, Option<&'t KeyGroup>) {
    let app = normalize_app_name(app);
    let specific = if app.is_empty() || app == DEFAULT_APP {
        None
    } else {
        table.app(&app).and_then(|entry| entry.group(combo))
    };
    let default = table.default_entry().and_then(|entry| entry.group(combo));
    (specific, default)
}
