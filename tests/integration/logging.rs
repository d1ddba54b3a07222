//! File logging integration tests.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file (default "logs/sol-sender.log")
//!   Refer to `src/logging/mod.rs` for more details.
use chrono::Utc;
use serial_test::serial;
use sol_sender::logging::{compute_rolled_file_path, setup_logging};
use std::{env, fs, path::Path, thread, time::Duration};

#[test]
#[serial]
fn test_setup_logging_file_mode_creates_log_file() {
    let temp_log_dir = tempfile::tempdir().unwrap();
    let base = temp_log_dir.path().join("logs").join("test_sender.log");

    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_FILE_PATH", base.to_str().unwrap());

    setup_logging();
    // Sleep for logger to flush
    thread::sleep(Duration::from_millis(200));

    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let expected_path = compute_rolled_file_path(base.to_str().unwrap(), &date_str);

    assert!(
        Path::new(&expected_path).exists(),
        "Expected log file {expected_path} does not exist"
    );

    env::remove_var("LOG_MODE");
    env::remove_var("LOG_LEVEL");
    env::remove_var("LOG_FILE_PATH");
}

/// The log file is opened in append mode, so existing content survives.
#[test]
#[serial]
fn test_setup_logging_file_mode_appends_to_existing_file() {
    let temp_log_dir = tempfile::tempdir().unwrap();
    let base = temp_log_dir.path().join("test_sender.log");
    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let rolled = compute_rolled_file_path(base.to_str().unwrap(), &date_str);
    fs::write(&rolled, "existing line\n").unwrap();

    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_FILE_PATH", base.to_str().unwrap());

    setup_logging();

    let content = fs::read_to_string(&rolled).unwrap();
    assert!(content.starts_with("existing line\n"));

    env::remove_var("LOG_MODE");
    env::remove_var("LOG_FILE_PATH");
}

#[test]
#[serial]
fn test_setup_logging_twice_does_not_panic() {
    env::set_var("LOG_MODE", "stdout");
    setup_logging();
    setup_logging();
    env::remove_var("LOG_MODE");
}
