//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file (default "logs/sol-sender.log")

use chrono::Utc;
use std::{
    env,
    fs::{create_dir_all, OpenOptions},
    path::Path,
    sync::Mutex,
};
use tracing::{info, level_filters::LevelFilter};

use crate::constants::{DEFAULT_LOG_FILE_PATH, DEFAULT_LOG_LEVEL, DEFAULT_LOG_MODE};

/// Computes the path of the log file for the given UTC date.
///
/// If the base path ends with ".log", the date is inserted before the extension.
pub fn compute_rolled_file_path(base_file_path: &str, date_str: &str) -> String {
    match base_file_path.strip_suffix(".log") {
        Some(trimmed) => format!("{trimmed}-{date_str}.log"),
        None => format!("{base_file_path}-{date_str}.log"),
    }
}

/// Parses a log level name. Unknown names fall back to `info`.
pub fn parse_level_filter(log_level: &str) -> LevelFilter {
    match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Installs the global tracing subscriber.
///
/// A second call leaves the existing subscriber in place.
pub fn setup_logging() {
    let log_mode = env::var("LOG_MODE").unwrap_or_else(|_| DEFAULT_LOG_MODE.to_string());
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let level_filter = parse_level_filter(&log_level);

    let result = if log_mode.to_lowercase() == "file" {
        let base_file_path =
            env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
        let date_str = Utc::now().format("%Y-%m-%d").to_string();
        let rolled_file_path = compute_rolled_file_path(&base_file_path, &date_str);

        if let Some(parent) = Path::new(&rolled_file_path).parent() {
            if let Err(e) = create_dir_all(parent) {
                eprintln!("Failed to create log directory {}: {e}", parent.display());
            }
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&rolled_file_path)
        {
            Ok(log_file) => tracing_subscriber::fmt()
                .with_max_level(level_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init(),
            Err(e) => {
                eprintln!("Unable to open log file {rolled_file_path}: {e}");
                return;
            }
        }
    } else {
        tracing_subscriber::fmt()
            .with_max_level(level_filter)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
        return;
    }

    info!(mode = %log_mode, level = %level_filter, "logging configured");
}
