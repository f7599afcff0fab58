//! Command-line interface for shortcut-overlay.
//!
//! The overlay window itself is driven by platform hooks; the CLI exposes the
//! same shortcut core for inspecting and editing the table, and for replaying
//! key event scripts through a session.

use crate::app::{OverlaySession, SessionEvent, ShortcutOverlay};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use shortcut_overlay_config::table::normalize_key_name;
use shortcut_overlay_config::{
    ConfigError, Description, ImportMode, ModifierSet, NO_MODIFIER, language_code,
    read_table_file,
};
use shortcut_overlay_keybindings::{KeyEventKind, RawKeyEvent, resolve, visible_shortcuts};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// shortcut-overlay - shows the shortcuts available for the held modifiers
#[derive(Parser, Debug)]
#[command(name = "shortcut-overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding shortcuts.json and settings.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level for the debug log (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the description of one shortcut
    Resolve {
        /// Foreground executable, e.g. notepad.exe (DEFAULT only when omitted)
        #[arg(long)]
        app: Option<String>,

        /// Combo label, e.g. Ctrl+Shift
        #[arg(long, default_value = NO_MODIFIER)]
        combo: String,

        /// Language code (defaults to the configured language)
        #[arg(long)]
        lang: Option<String>,

        /// Key name, e.g. S or F1
        key: String,
    },

    /// List every shortcut in effect for an application and combo
    Show {
        #[arg(long)]
        app: Option<String>,

        #[arg(long, default_value = NO_MODIFIER)]
        combo: String,

        #[arg(long)]
        lang: Option<String>,
    },

    /// Validate a shortcut file without loading it
    Check { file: PathBuf },

    /// Import a shortcut file into the active table
    Import {
        file: PathBuf,

        /// Replace the whole table instead of merging into it
        #[arg(long)]
        replace: bool,
    },

    /// Define or overwrite a shortcut
    Set {
        #[arg(long)]
        app: String,

        #[arg(long, default_value = NO_MODIFIER)]
        combo: String,

        /// Store the text for this language only, keeping other languages
        #[arg(long)]
        lang: Option<String>,

        key: String,

        text: String,
    },

    /// Remove a shortcut
    Remove {
        #[arg(long)]
        app: String,

        #[arg(long, default_value = NO_MODIFIER)]
        combo: String,

        key: String,
    },

    /// Replay key events from stdin through an overlay session
    ///
    /// One command per line: `press <key>`, `release <key>`, `app <exe>`,
    /// `lang <code>`, `blur`. Blank lines and lines starting with `#` are skipped.
    Simulate {
        /// Initial foreground executable
        #[arg(long)]
        app: Option<String>,

        #[arg(long)]
        lang: Option<String>,
    },
}

/// Log level accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Run a parsed command line. Returns the process exit code.
pub fn run(cli: Cli, input: impl BufRead, out: &mut impl Write) -> Result<i32> {
    let overlay = match &cli.config_dir {
        Some(dir) => ShortcutOverlay::load(dir.clone()),
        None => ShortcutOverlay::load_default(),
    };
    if let Some(warning) = overlay.load_warning() {
        eprintln!("shortcut-overlay: warning: {warning}");
    }

    match cli.command {
        Commands::Resolve {
            app,
            combo,
            lang,
            key,
        } => {
            let lang = language(&overlay, lang);
            let table = overlay.store().snapshot();
            let app = app.as_deref().unwrap_or_default();
            match resolve(&table, app, &combo, &key, &lang) {
                Some(text) => {
                    writeln!(out, "{text}")?;
                    Ok(0)
                }
                None => {
                    writeln!(out, "no shortcut for {combo} {key}")?;
                    Ok(1)
                }
            }
        }

        Commands::Show { app, combo, lang } => {
            let combo = ModifierSet::parse_label(&combo)
                .with_context(|| format!("invalid combo label '{combo}'"))?;
            let lang = language(&overlay, lang);
            let table = overlay.store().snapshot();
            let app = app.as_deref().unwrap_or_default();
            for (key, text) in visible_shortcuts(&table, app, combo, &lang) {
                writeln!(out, "{key:<10} {text}")?;
            }
            Ok(0)
        }

        Commands::Check { file } => match read_table_file(&file) {
            Ok(table) => {
                writeln!(
                    out,
                    "{}: {} applications, {} shortcuts",
                    file.display(),
                    table.len(),
                    table.shortcut_count()
                )?;
                Ok(0)
            }
            Err(ConfigError::Validation(issues)) => {
                writeln!(out, "{}: {} issue(s)", file.display(), issues.len())?;
                for issue in issues {
                    writeln!(out, "  {issue}")?;
                }
                Ok(1)
            }
            Err(e) => {
                writeln!(out, "{}: {e}", file.display())?;
                Ok(1)
            }
        },

        Commands::Import { file, replace } => {
            let mode = if replace {
                ImportMode::Replace
            } else {
                ImportMode::Merge
            };
            let table = overlay
                .import_file(&file, mode)
                .with_context(|| format!("failed to import {}", file.display()))?;
            writeln!(
                out,
                "{} applications, {} shortcuts",
                table.len(),
                table.shortcut_count()
            )?;
            Ok(0)
        }

        Commands::Set {
            app,
            combo,
            lang,
            key,
            text,
        } => {
            overlay
                .edit(|table| {
                    let description = match lang {
                        None => Description::Plain(text),
                        Some(lang) => {
                            let current = ModifierSet::parse_label(&combo).ok().and_then(|set| {
                                table.app(&app)?.group(set)?.get(&normalize_key_name(&key))
                            });
                            let mut texts = match current {
                                Some(Description::Localized(texts)) => texts.clone(),
                                _ => Default::default(),
                            };
                            texts.insert(language_code(&lang), text);
                            Description::Localized(texts)
                        }
                    };
                    table.set_shortcut(&app, &combo, &key, description)
                })
                .context("failed to set shortcut")?;
            Ok(0)
        }

        Commands::Remove { app, combo, key } => {
            overlay
                .edit(|table| table.remove_shortcut(&app, &combo, &key))
                .context("failed to remove shortcut")?;
            Ok(0)
        }

        Commands::Simulate { app, lang } => {
            let mut session = overlay.session();
            session.set_foreground_app(app.as_deref());
            if let Some(lang) = lang {
                session.set_language(&lang);
            }
            for line in input.lines() {
                simulate_line(&mut session, &line?, &mut *out)?;
            }
            Ok(0)
        }
    }
}

/// Base language code from `--lang` (a locale or a code), else from settings.
fn language(overlay: &ShortcutOverlay, lang: Option<String>) -> String {
    match lang {
        Some(lang) => language_code(&lang),
        None => overlay.settings().language_code(),
    }
}

/// Apply one script line to `session` and print what the overlay would show.
fn simulate_line(session: &mut OverlaySession, line: &str, out: &mut impl Write) -> Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "press" | "release" => {
            let event = if command == "press" {
                RawKeyEvent::press(arg)
            } else {
                RawKeyEvent::release(arg)
            };
            match session.handle_event(&event) {
                SessionEvent::ModifiersChanged(label) => print_combo(session, &label, out)?,
                SessionEvent::Key {
                    name,
                    kind: KeyEventKind::Press,
                } => match session.resolve_key(&name) {
                    Some(text) => writeln!(out, "{name}: {text}")?,
                    None => writeln!(out, "{name}: -")?,
                },
                SessionEvent::Key { .. } | SessionEvent::Ignored => {}
                SessionEvent::Dropped(reason) => writeln!(out, "dropped: {reason}")?,
            }
        }
        "app" => {
            let app = (!arg.is_empty()).then_some(arg);
            if session.set_foreground_app(app) {
                writeln!(out, "app: {}", session.active_app().unwrap_or("DEFAULT"))?;
            }
        }
        "lang" => {
            session.set_language(arg);
            writeln!(out, "lang: {}", session.language())?;
        }
        "blur" => {
            if session.focus_lost() {
                print_combo(session, &session.current_combo_label(), out)?;
            }
        }
        other => writeln!(out, "unknown command '{other}'")?,
    }
    Ok(())
}

fn print_combo(session: &OverlaySession, label: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "combo: {label}")?;
    for (key, text) in session.visible_shortcuts() {
        writeln!(out, "  {key:<10} {text}")?;
    }
    Ok(())
}
