//! Typed error variants for the shortcut-overlay-config crate.
//!
//! Loading never propagates these past the loader boundary (see
//! [`crate::persistence::load_table`]); they surface as warnings there, and as
//! hard errors only on explicit import, edit or save.

use thiserror::Error;

/// Errors that can occur when reading, writing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a config file.
    #[error("I/O error on config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid JSON.
    #[error("JSON parse error in config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file was valid JSON but not a valid shortcut table.
    #[error("Shortcut table is invalid ({} issue(s)): {}", .0.len(), join_issues(.0))]
    Validation(Vec<ValidationIssue>),
}

impl From<Vec<ValidationIssue>> for ConfigError {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        ConfigError::Validation(issues)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a combo label could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboLabelError {
    #[error("combo label is empty")]
    Empty,

    #[error("combo label has an empty modifier token")]
    EmptyToken,

    #[error("unknown modifier '{0}' (expected Ctrl, Shift, Alt or Win)")]
    UnknownModifier(String),

    #[error("modifier {0} appears more than once")]
    RepeatedModifier(&'static str),
}

/// A single problem found while validating a shortcut table.
///
/// Validation collects every issue in a document so an editor can show them
/// all at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("{path}: expected a JSON object")]
    NotAnObject { path: String },

    #[error("{path}: description must be a string or an object of language codes")]
    InvalidDescription { path: String },

    #[error("application name is empty")]
    EmptyAppName,

    #[error("{app}: invalid combo label '{label}': {reason}")]
    InvalidComboLabel {
        app: String,
        label: String,
        reason: ComboLabelError,
    },

    #[error("{app} / {combo}: key name is empty")]
    EmptyKeyName { app: String, combo: String },

    #[error("{app} / {combo} / {key}: description has no languages")]
    EmptyDescription {
        app: String,
        combo: String,
        key: String,
    },

    #[error("{app} / {combo} / {key}: language code is empty")]
    EmptyLanguageCode {
        app: String,
        combo: String,
        key: String,
    },

    #[error("{app} / {combo} / {key}: language '{lang}' is given more than once with different text")]
    ConflictingLanguage {
        app: String,
        combo: String,
        key: String,
        lang: String,
    },

    #[error("{app} / {combo} / {key}: defined more than once with different descriptions")]
    ConflictingKey {
        app: String,
        combo: String,
        key: String,
    },

    #[error("application {0} does not exist")]
    UnknownApp(String),

    #[error("application {0} already exists")]
    DuplicateApp(String),

    #[error("{app}: no {combo} group")]
    UnknownCombo { app: String, combo: String },

    #[error("{app} / {combo}: no shortcut for key {key}")]
    UnknownKey {
        app: String,
        combo: String,
        key: String,
    },
}
