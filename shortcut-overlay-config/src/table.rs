//! The validated, in-memory shortcut table.
//!
//! On disk the table is a three-level JSON object:
//! application → combo label → key name → description. In memory the combo
//! level is keyed by [`ModifierSet`], so labels are canonical by construction.
//! Every way of building a table (loading, editing, importing) goes through
//! the same normalization of application names, combo labels and key names.

use crate::combo::ModifierSet;
use crate::description::Description;
use crate::error::ValidationIssue;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Application key for shortcuts that apply to every foreground application.
pub const DEFAULT_APP: &str = "DEFAULT";

/// Shortcuts for one modifier combination, keyed by canonical key name.
pub type KeyGroup = BTreeMap<String, Description>;

/// Normalize an executable name to its table key (trimmed, upper-case).
pub fn normalize_app_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Normalize a key name as written in a shortcut file.
///
/// Canonical key names are upper-case (`S`, `F4`, `ESC`, `PAGEUP`), and
/// symbols are unaffected by case, so upper-casing the trimmed name is enough
/// for `s`, `Esc` and `f4` to land on the names the key normalizer produces.
pub fn normalize_key_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// The shortcut sub-table for one executable or for [`DEFAULT_APP`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppEntry {
    groups: BTreeMap<ModifierSet, KeyGroup>,
}

impl AppEntry {
    pub fn group(&self, combo: ModifierSet) -> Option<&KeyGroup> {
        self.groups.get(&combo)
    }

    /// Groups in canonical combo order.
    pub fn groups(&self) -> impl Iterator<Item = (ModifierSet, &KeyGroup)> {
        self.groups.iter().map(|(combo, group)| (*combo, group))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of shortcuts across all groups.
    pub fn shortcut_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }
}

/// How [`ShortcutTable::import`] combines an imported table with this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Deep-update: imported shortcuts are added, and win on any
    /// (application, combo, key) collision.
    #[default]
    Merge,
    /// The imported table replaces this one entirely.
    Replace,
}

/// Application name → [`AppEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShortcutTable {
    apps: BTreeMap<String, AppEntry>,
}

impl ShortcutTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a parsed JSON document, validating all of it.
    ///
    /// Combo labels are re-normalized into canonical order and application
    /// and key names are upper-cased, so differently spelled duplicates are
    /// merged. Duplicates that disagree on the description are reported as
    /// [`ValidationIssue::ConflictingKey`]. Every issue in the document is
    /// returned, not just the first.
    pub fn from_json_value(value: Value) -> Result<Self, Vec<ValidationIssue>> {
        let Value::Object(apps) = value else {
            return Err(vec![ValidationIssue::NotAnObject {
                path: "<root>".to_string(),
            }]);
        };

        let mut table = ShortcutTable::new();
        let mut issues = Vec::new();

        for (raw_app, raw_entry) in apps {
            let app = normalize_app_name(&raw_app);
            if app.is_empty() {
                issues.push(ValidationIssue::EmptyAppName);
                continue;
            }
            let Value::Object(groups) = raw_entry else {
                issues.push(ValidationIssue::NotAnObject { path: raw_app });
                continue;
            };
            table.apps.entry(app.clone()).or_default();

            for (raw_label, raw_group) in groups {
                let combo = match ModifierSet::parse_label(&raw_label) {
                    Ok(combo) => combo,
                    Err(reason) => {
                        issues.push(ValidationIssue::InvalidComboLabel {
                            app: app.clone(),
                            label: raw_label,
                            reason,
                        });
                        continue;
                    }
                };
                if raw_label != combo.label() {
                    log::debug!(
                        "Normalized combo label '{}' to '{}' for {}",
                        raw_label,
                        combo,
                        app
                    );
                }
                let Value::Object(keys) = raw_group else {
                    issues.push(ValidationIssue::NotAnObject {
                        path: format!("{app} / {raw_label}"),
                    });
                    continue;
                };
                table.group_mut(&app, combo);

                for (raw_key, raw_description) in keys {
                    let key = normalize_key_name(&raw_key);
                    if key.is_empty() {
                        issues.push(ValidationIssue::EmptyKeyName {
                            app: app.clone(),
                            combo: combo.label(),
                        });
                        continue;
                    }
                    let description: Description = match serde_json::from_value(raw_description)
                    {
                        Ok(description) => description,
                        Err(_) => {
                            issues.push(ValidationIssue::InvalidDescription {
                                path: format!("{app} / {combo} / {key}"),
                            });
                            continue;
                        }
                    };
                    let description = match canonical_description(&app, combo, &key, description)
                    {
                        Ok(description) => description,
                        Err(issue) => {
                            issues.push(issue);
                            continue;
                        }
                    };

                    let group = table.group_mut(&app, combo);
                    match group.get(&key) {
                        Some(existing) if *existing != description => {
                            issues.push(ValidationIssue::ConflictingKey {
                                app: app.clone(),
                                combo: combo.label(),
                                key,
                            });
                        }
                        Some(_) => {}
                        None => {
                            group.insert(key, description);
                        }
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(table)
        } else {
            Err(issues)
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, crate::ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_json_value(value)?)
    }

    /// Canonical JSON form of the table.
    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Canonical, pretty-printed JSON (two-space indent, UTF-8 text kept as is).
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up an application entry; the probe name is upper-cased first.
    pub fn app(&self, name: &str) -> Option<&AppEntry> {
        self.apps.get(&normalize_app_name(name))
    }

    /// The [`DEFAULT_APP`] entry, if any.
    pub fn default_entry(&self) -> Option<&AppEntry> {
        self.apps.get(DEFAULT_APP)
    }

    /// Entries in application-name order.
    pub fn apps(&self) -> impl Iterator<Item = (&str, &AppEntry)> {
        self.apps.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Number of shortcuts across all applications.
    pub fn shortcut_count(&self) -> usize {
        self.apps.values().map(AppEntry::shortcut_count).sum()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Add an empty application entry. Returns the normalized name.
    pub fn add_app(&mut self, name: &str) -> Result<String, ValidationIssue> {
        let app = normalize_app_name(name);
        if app.is_empty() {
            return Err(ValidationIssue::EmptyAppName);
        }
        if self.apps.contains_key(&app) {
            return Err(ValidationIssue::DuplicateApp(app));
        }
        self.apps.insert(app.clone(), AppEntry::default());
        Ok(app)
    }

    /// Remove an application entry and everything under it.
    pub fn remove_app(&mut self, name: &str) -> Result<AppEntry, ValidationIssue> {
        let app = normalize_app_name(name);
        self.apps
            .remove(&app)
            .ok_or(ValidationIssue::UnknownApp(app))
    }

    /// Add an empty combo group to an existing application.
    ///
    /// Adding a group that already exists (under any spelling) is a no-op.
    pub fn add_combo_group(
        &mut self,
        app: &str,
        label: &str,
    ) -> Result<ModifierSet, ValidationIssue> {
        let app = normalize_app_name(app);
        let combo = parse_combo(&app, label)?;
        let entry = self
            .apps
            .get_mut(&app)
            .ok_or_else(|| ValidationIssue::UnknownApp(app.clone()))?;
        entry.groups.entry(combo).or_default();
        Ok(combo)
    }

    /// Remove a combo group from an application.
    pub fn remove_combo_group(
        &mut self,
        app: &str,
        label: &str,
    ) -> Result<KeyGroup, ValidationIssue> {
        let app = normalize_app_name(app);
        let combo = parse_combo(&app, label)?;
        let entry = self
            .apps
            .get_mut(&app)
            .ok_or_else(|| ValidationIssue::UnknownApp(app.clone()))?;
        entry
            .groups
            .remove(&combo)
            .ok_or_else(|| ValidationIssue::UnknownCombo {
                app,
                combo: combo.label(),
            })
    }

    /// Define or overwrite a shortcut, creating the application and combo
    /// group if needed. Returns the description it replaced, if any.
    pub fn set_shortcut(
        &mut self,
        app: &str,
        label: &str,
        key: &str,
        description: Description,
    ) -> Result<Option<Description>, ValidationIssue> {
        let (app, combo, key, description) = check_edit(app, label, key, description)?;
        Ok(self.group_mut(&app, combo).insert(key, description))
    }

    /// Change the key name and description of an existing shortcut.
    ///
    /// Fails without changing anything if the old key does not exist, or if
    /// the new key name is already taken by a different shortcut.
    pub fn rename_shortcut(
        &mut self,
        app: &str,
        label: &str,
        old_key: &str,
        new_key: &str,
        description: Description,
    ) -> Result<(), ValidationIssue> {
        let (app, combo, new_key, description) = check_edit(app, label, new_key, description)?;
        let old_key = normalize_key_name(old_key);

        let group = self
            .apps
            .get_mut(&app)
            .and_then(|entry| entry.groups.get_mut(&combo))
            .filter(|group| group.contains_key(&old_key))
            .ok_or_else(|| ValidationIssue::UnknownKey {
                app: app.clone(),
                combo: combo.label(),
                key: old_key.clone(),
            })?;
        if new_key != old_key && group.contains_key(&new_key) {
            return Err(ValidationIssue::ConflictingKey {
                app,
                combo: combo.label(),
                key: new_key,
            });
        }
        group.remove(&old_key);
        group.insert(new_key, description);
        Ok(())
    }

    /// Remove a single shortcut. The (possibly empty) group is kept.
    pub fn remove_shortcut(
        &mut self,
        app: &str,
        label: &str,
        key: &str,
    ) -> Result<Description, ValidationIssue> {
        let app = normalize_app_name(app);
        let combo = parse_combo(&app, label)?;
        let key = normalize_key_name(key);
        self.apps
            .get_mut(&app)
            .and_then(|entry| entry.groups.get_mut(&combo))
            .and_then(|group| group.remove(&key))
            .ok_or(ValidationIssue::UnknownKey {
                app,
                combo: combo.label(),
                key,
            })
    }

    /// Combine another table into this one.
    pub fn import(&mut self, other: ShortcutTable, mode: ImportMode) {
        match mode {
            ImportMode::Replace => *self = other,
            ImportMode::Merge => {
                for (app, entry) in other.apps {
                    let target = self.apps.entry(app).or_default();
                    for (combo, group) in entry.groups {
                        target.groups.entry(combo).or_default().extend(group);
                    }
                }
            }
        }
    }

    fn group_mut(&mut self, app: &str, combo: ModifierSet) -> &mut KeyGroup {
        self.apps
            .entry(app.to_string())
            .or_default()
            .groups
            .entry(combo)
            .or_default()
    }
}

impl<'de> Deserialize<'de> for ShortcutTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ShortcutTable::from_json_value(value).map_err(|issues| {
            serde::de::Error::custom(crate::ConfigError::Validation(issues))
        })
    }
}

fn check_edit(
    app: &str,
    label: &str,
    key: &str,
    description: Description,
) -> Result<(String, ModifierSet, String, Description), ValidationIssue> {
    let app = normalize_app_name(app);
    if app.is_empty() {
        return Err(ValidationIssue::EmptyAppName);
    }
    let combo = parse_combo(&app, label)?;
    let key = normalize_key_name(key);
    if key.is_empty() {
        return Err(ValidationIssue::EmptyKeyName {
            app,
            combo: combo.label(),
        });
    }
    let description = canonical_description(&app, combo, &key, description)?;
    Ok((app, combo, key, description))
}

fn parse_combo(app: &str, label: &str) -> Result<ModifierSet, ValidationIssue> {
    ModifierSet::parse_label(label).map_err(|reason| ValidationIssue::InvalidComboLabel {
        app: app.to_string(),
        label: label.to_string(),
        reason,
    })
}

/// Lower-case and trim the language codes of a localized description.
///
/// Codes that only differ in case merge when their text agrees.
fn canonical_description(
    app: &str,
    combo: ModifierSet,
    key: &str,
    description: Description,
) -> Result<Description, ValidationIssue> {
    let Description::Localized(map) = description else {
        return Ok(description);
    };
    let issue_path = || (app.to_string(), combo.label(), key.to_string());
    if map.is_empty() {
        let (app, combo, key) = issue_path();
        return Err(ValidationIssue::EmptyDescription { app, combo, key });
    }

    let mut canonical = BTreeMap::new();
    for (raw_lang, text) in map {
        let lang = raw_lang.trim().to_lowercase();
        if lang.is_empty() {
            let (app, combo, key) = issue_path();
            return Err(ValidationIssue::EmptyLanguageCode { app, combo, key });
        }
        match canonical.get(&lang) {
            Some(existing) if *existing != text => {
                let (app, combo, key) = issue_path();
                return Err(ValidationIssue::ConflictingLanguage {
                    app,
                    combo,
                    key,
                    lang,
                });
            }
            Some(_) => {}
            None => {
                canonical.insert(lang, text);
            }
        }
    }
    Ok(Description::Localized(canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComboLabelError;
    use serde_json::json;

    fn combo(label: &str) -> ModifierSet {
        ModifierSet::parse_label(label).unwrap()
    }

    #[test]
    fn test_from_json_normalizes_names() {
        let table = ShortcutTable::from_json_value(json!({
            "notepad.exe": { "ctrl": { "s": "Save" } },
            "DEFAULT": { "NoModifier": { "f1": "Help", "esc": "Close" } }
        }))
        .unwrap();

        let notepad = table.app("NOTEPAD.EXE").unwrap();
        assert_eq!(
            notepad.group(combo("Ctrl")).unwrap().get("S"),
            Some(&Description::from("Save"))
        );
        let default = table.default_entry().unwrap();
        let keys: Vec<&String> = default.group(ModifierSet::NONE).unwrap().keys().collect();
        assert_eq!(keys, ["ESC", "F1"]);
    }

    #[test]
    fn test_from_json_heals_label_order() {
        let table = ShortcutTable::from_json_value(json!({
            "APP.EXE": {
                "Shift+Ctrl": { "N": "New window" },
                "Ctrl+Shift": { "T": "Reopen tab" }
            }
        }))
        .unwrap();

        let entry = table.app("app.exe").unwrap();
        assert_eq!(entry.groups().count(), 1);
        let group = entry.group(combo("Ctrl+Shift")).unwrap();
        assert_eq!(group.len(), 2);

        let out = table.to_json_value().unwrap();
        assert!(out["APP.EXE"].get("Ctrl+Shift").is_some());
        assert!(out["APP.EXE"].get("Shift+Ctrl").is_none());
    }

    #[test]
    fn test_from_json_identical_duplicates_collapse() {
        let table = ShortcutTable::from_json_value(json!({
            "APP.EXE": {
                "Alt+Ctrl": { "D": "Duplicate" },
                "Ctrl+Alt": { "d": "Duplicate" }
            }
        }))
        .unwrap();
        assert_eq!(table.shortcut_count(), 1);
    }

    #[test]
    fn test_from_json_conflicting_duplicates_rejected() {
        let issues = ShortcutTable::from_json_value(json!({
            "APP.EXE": {
                "Alt+Ctrl": { "D": "Duplicate" },
                "Ctrl+Alt": { "D": "Delete" }
            }
        }))
        .unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::ConflictingKey {
                app: "APP.EXE".to_string(),
                combo: "Ctrl+Alt".to_string(),
                key: "D".to_string(),
            }]
        );
    }

    #[test]
    fn test_from_json_collects_all_issues() {
        let issues = ShortcutTable::from_json_value(json!({
            "": {},
            "A.EXE": [],
            "B.EXE": {
                "Ctrl+Hyper": { "S": "Save" },
                "Ctrl": { "S": 42, " ": "blank", "E": {} },
                "Alt": "not a group"
            }
        }))
        .unwrap_err();

        assert!(issues.contains(&ValidationIssue::EmptyAppName));
        assert!(issues.contains(&ValidationIssue::NotAnObject {
            path: "A.EXE".to_string()
        }));
        assert!(issues.contains(&ValidationIssue::InvalidComboLabel {
            app: "B.EXE".to_string(),
            label: "Ctrl+Hyper".to_string(),
            reason: ComboLabelError::UnknownModifier("Hyper".to_string()),
        }));
        assert!(issues.contains(&ValidationIssue::InvalidDescription {
            path: "B.EXE / Ctrl / S".to_string()
        }));
        assert!(issues.contains(&ValidationIssue::EmptyKeyName {
            app: "B.EXE".to_string(),
            combo: "Ctrl".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::EmptyDescription {
            app: "B.EXE".to_string(),
            combo: "Ctrl".to_string(),
            key: "E".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::NotAnObject {
            path: "B.EXE / Alt".to_string()
        }));
        assert_eq!(issues.len(), 7);
    }

    #[test]
    fn test_root_must_be_object() {
        let issues = ShortcutTable::from_json_value(json!(["DEFAULT"])).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::NotAnObject {
                path: "<root>".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_groups_survive_round_trip() {
        let table = ShortcutTable::from_json_value(json!({
            "EMPTY.EXE": {},
            "GROUPED.EXE": { "Win": {} }
        }))
        .unwrap();
        assert!(table.app("empty.exe").unwrap().is_empty());
        let reloaded =
            ShortcutTable::from_json_str(&table.to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_add_and_remove_app() {
        let mut table = ShortcutTable::new();
        assert_eq!(table.add_app(" code.exe ").unwrap(), "CODE.EXE");
        assert_eq!(
            table.add_app("Code.exe"),
            Err(ValidationIssue::DuplicateApp("CODE.EXE".to_string()))
        );
        assert_eq!(table.add_app("  "), Err(ValidationIssue::EmptyAppName));
        assert!(table.remove_app("code.EXE").is_ok());
        assert_eq!(
            table.remove_app("code.exe"),
            Err(ValidationIssue::UnknownApp("CODE.EXE".to_string()))
        );
    }

    #[test]
    fn test_combo_groups() {
        let mut table = ShortcutTable::new();
        table.add_app("CODE.EXE").unwrap();
        assert_eq!(
            table.add_combo_group("CODE.EXE", "Shift+Ctrl").unwrap(),
            combo("Ctrl+Shift")
        );
        // Same group under another spelling is a no-op.
        table.add_combo_group("CODE.EXE", "ctrl+shift").unwrap();
        assert_eq!(table.app("CODE.EXE").unwrap().groups().count(), 1);

        assert!(matches!(
            table.add_combo_group("CODE.EXE", "Ctrl+Ctrl"),
            Err(ValidationIssue::InvalidComboLabel { .. })
        ));
        assert_eq!(
            table.add_combo_group("MISSING.EXE", "Ctrl"),
            Err(ValidationIssue::UnknownApp("MISSING.EXE".to_string()))
        );

        assert!(table.remove_combo_group("CODE.EXE", "Ctrl+Shift").is_ok());
        assert_eq!(
            table.remove_combo_group("CODE.EXE", "Ctrl+Shift"),
            Err(ValidationIssue::UnknownCombo {
                app: "CODE.EXE".to_string(),
                combo: "Ctrl+Shift".to_string(),
            })
        );
    }

    #[test]
    fn test_set_shortcut_creates_app_and_group() {
        let mut table = ShortcutTable::new();
        let previous = table
            .set_shortcut("code.exe", "Ctrl", "p", Description::from("Quick open"))
            .unwrap();
        assert!(previous.is_none());

        let previous = table
            .set_shortcut("CODE.EXE", "Ctrl", "P", Description::from("Go to file"))
            .unwrap();
        assert_eq!(previous, Some(Description::from("Quick open")));
        assert_eq!(table.shortcut_count(), 1);
    }

    #[test]
    fn test_set_shortcut_rejects_invalid_input() {
        let mut table = ShortcutTable::new();
        assert!(matches!(
            table.set_shortcut("APP.EXE", "Ctrl", " ", Description::from("x")),
            Err(ValidationIssue::EmptyKeyName { .. })
        ));
        assert!(matches!(
            table.set_shortcut("APP.EXE", "Ctrl", "S", Description::Localized(BTreeMap::new())),
            Err(ValidationIssue::EmptyDescription { .. })
        ));
        assert!(matches!(
            table.set_shortcut("APP.EXE", "Ctrl+Q", "S", Description::from("x")),
            Err(ValidationIssue::InvalidComboLabel { .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_rename_shortcut() {
        let mut table = ShortcutTable::new();
        table
            .set_shortcut("APP.EXE", "Ctrl", "S", Description::from("Save"))
            .unwrap();
        table
            .set_shortcut("APP.EXE", "Ctrl", "O", Description::from("Open"))
            .unwrap();

        table
            .rename_shortcut("APP.EXE", "Ctrl", "s", "w", Description::from("Write"))
            .unwrap();
        let group = table.app("APP.EXE").unwrap().group(combo("Ctrl")).unwrap();
        assert!(group.get("S").is_none());
        assert_eq!(group.get("W"), Some(&Description::from("Write")));

        assert!(matches!(
            table.rename_shortcut("APP.EXE", "Ctrl", "W", "O", Description::from("x")),
            Err(ValidationIssue::ConflictingKey { .. })
        ));
        assert!(matches!(
            table.rename_shortcut("APP.EXE", "Ctrl", "Z", "Y", Description::from("x")),
            Err(ValidationIssue::UnknownKey { .. })
        ));
        assert_eq!(table.shortcut_count(), 2);
    }

    #[test]
    fn test_remove_shortcut() {
        let mut table = ShortcutTable::new();
        table
            .set_shortcut("APP.EXE", "Alt", "F4", Description::from("Close"))
            .unwrap();
        assert_eq!(
            table.remove_shortcut("app.exe", "alt", "f4").unwrap(),
            Description::from("Close")
        );
        assert!(table.remove_shortcut("APP.EXE", "Alt", "F4").is_err());
        assert!(table.app("APP.EXE").unwrap().group(combo("Alt")).is_some());
    }

    #[test]
    fn test_import_merge_overrides_collisions() {
        let mut table = ShortcutTable::from_json_value(json!({
            "APP.EXE": { "Ctrl": { "S": "Save", "O": "Open" } }
        }))
        .unwrap();
        let imported = ShortcutTable::from_json_value(json!({
            "app.exe": { "Ctrl": { "S": "Save all" }, "Alt": { "X": "Exit" } },
            "OTHER.EXE": { "NoModifier": { "F5": "Run" } }
        }))
        .unwrap();

        table.import(imported, ImportMode::Merge);

        let app = table.app("APP.EXE").unwrap();
        let ctrl = app.group(combo("Ctrl")).unwrap();
        assert_eq!(ctrl.get("S"), Some(&Description::from("Save all")));
        assert_eq!(ctrl.get("O"), Some(&Description::from("Open")));
        assert!(app.group(combo("Alt")).is_some());
        assert!(table.app("OTHER.EXE").is_some());
    }

    #[test]
    fn test_import_replace() {
        let mut table = ShortcutTable::from_json_value(json!({
            "APP.EXE": { "Ctrl": { "S": "Save" } }
        }))
        .unwrap();
        let imported = ShortcutTable::from_json_value(json!({
            "OTHER.EXE": { "Ctrl": { "Q": "Quit" } }
        }))
        .unwrap();
        table.import(imported.clone(), ImportMode::Replace);
        assert_eq!(table, imported);
    }

    #[test]
    fn test_deserialize_reports_validation_issues() {
        let err = serde_json::from_str::<ShortcutTable>(r#"{"APP.EXE": {"Ctrl+Ctrl": {}}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Ctrl appears more than once"));
    }

    #[test]
    fn test_language_codes_are_canonicalized() {
        let table = ShortcutTable::from_json_value(json!({
            "DEFAULT": { "Ctrl": { "S": { "EN": "Save", " Zh ": "保存", "en": "Save" } } }
        }))
        .unwrap();
        let desc = table.default_entry().unwrap().group(combo("Ctrl")).unwrap().get("S");
        assert_eq!(desc, Some(&Description::localized([("en", "Save"), ("zh", "保存")])));
        assert_eq!(desc.and_then(|d| d.text("zh")), Some("保存"));
    }

    #[test]
    fn test_conflicting_language_codes_rejected() {
        let issues = ShortcutTable::from_json_value(json!({
            "DEFAULT": { "Ctrl": { "S": { "en": "Save", "EN": "Store" } } }
        }))
        .unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::ConflictingLanguage {
                app: "DEFAULT".to_string(),
                combo: "Ctrl".to_string(),
                key: "S".to_string(),
                lang: "en".to_string(),
            }]
        );
    }

    #[test]
    fn test_set_shortcut_canonicalizes_language_codes() {
        let mut table = ShortcutTable::new();
        table
            .set_shortcut("APP.EXE", "Ctrl", "S", Description::localized([("ZH", "保存")]))
            .unwrap();
        let group = table.app("APP.EXE").unwrap().group(combo("Ctrl")).unwrap();
        assert_eq!(group.get("S"), Some(&Description::localized([("zh", "保存")])));
    }
}
