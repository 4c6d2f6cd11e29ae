//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it for this crate.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug site_health example.com
/// RUST_LOG=site_health=debug,reqwest=info site_health example.com
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    // RUST_LOG is read first; the explicit level then wins for this crate
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for noisy in ["reqwest", "hyper", "hyper_util"] {
        builder.filter_module(noisy, LevelFilter::Info.min(level));
    }
    builder.filter_module("site_health", level);

    match format {
        LogFormat::Json => builder.format(write_json_line),
        LogFormat::Plain => builder.format(write_plain_line),
    };

    builder.try_init().map_err(InitializationError::from)
}

/// One JSON object per line: RFC 3339 time, level, target, message.
fn write_json_line(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let line = json!({
        "time": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "message": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

/// `<marker> <LEVEL> <target>: <message>`, colored by level.
fn write_plain_line(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let (marker, label) = level_style(record.level());
    writeln!(
        buf,
        "{marker} {label:<5} {}: {}",
        record.target().dimmed(),
        record.args()
    )
}

fn level_style(level: Level) -> (&'static str, ColoredString) {
    let label = level.as_str();
    match level {
        Level::Error => ("❌", label.red().bold()),
        Level::Warn => ("⚠️", label.yellow()),
        Level::Info => ("🩺", label.green()),
        Level::Debug => ("🔍", label.blue()),
        Level::Trace => ("🔬", label.purple()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_second_call_is_an_error_not_a_panic() {
        // Whichever test initialises first wins; every later call must fail cleanly
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_every_level_has_a_marker() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            let (marker, label) = level_style(level);
            assert!(!marker.is_empty());
            assert!(label.to_string().contains(level.as_str()));
        }
    }
}
