//! Logging backend for shortcut-overlay
//!
//! Routes every `log::info!()`, `log::debug!()` etc. from all workspace
//! crates to a debug log file:
//! - /tmp/shortcut_overlay_debug.log on Unix/macOS
//! - %TEMP%\shortcut_overlay_debug.log on Windows
//!
//! The overlay runs next to whatever application has focus, so nothing is
//! written to stdout. When RUST_LOG is set, lines are also mirrored to stderr
//! for terminal debugging.
//!
//! Level precedence: `--log-level` flag, then RUST_LOG, then `warn`.

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_FILE_NAME: &str = "shortcut_overlay_debug.log";

/// Level used when neither the flag nor RUST_LOG says otherwise.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
    mirror_to_stderr: bool,
}

impl FileLogger {
    fn new(level: LevelFilter, mirror_to_stderr: bool) -> Self {
        let file = if level != LevelFilter::Off {
            // Silently run without a file if it can't be opened
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
        } else {
            None
        };

        let logger = FileLogger {
            level,
            file: Mutex::new(file),
            mirror_to_stderr,
        };
        logger.write_line(&format!(
            "\n{}\nshortcut-overlay session started at {} (level={})\n{}",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        logger
    }

    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        if let Some(file) = file.as_mut() {
            let _ = writeln!(file, "{}", line);
            let _ = file.flush();
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if self.mirror_to_stderr {
            eprintln!("{}", line);
        }
        self.write_line(&line);
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp").join(LOG_FILE_NAME)
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join(LOG_FILE_NAME)
    }
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
///
/// RUST_LOG directives with module filters (`shortcut_overlay=debug`) are
/// reduced to their last level.
pub fn parse_level(spec: &str) -> Option<LevelFilter> {
    spec.split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            level.parse::<LevelFilter>().ok()
        })
        .last()
}

/// Install the file logger as the `log` backend.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = cli_level
        .or_else(|| rust_log.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LEVEL);

    let logger = LOGGER.get_or_init(|| FileLogger::new(level, rust_log.is_some()));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::Warn));
        assert_eq!(
            parse_level("shortcut_overlay=trace"),
            Some(LevelFilter::Trace)
        );
        assert_eq!(parse_level("error,shortcut_overlay=info"), Some(LevelFilter::Info));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_log_path_name() {
        assert!(log_path().ends_with(LOG_FILE_NAME));
    }
}
