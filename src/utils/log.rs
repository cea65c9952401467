// src/utils/log.rs

//! Logger setup with server-style formatting.
//!
//! Output looks like `[2026-01-01 12:00:00] [INFO] message`. `RUST_LOG`
//! takes precedence over the configured level.

use std::io::Write;

use ::log::LevelFilter;
use chrono::Local;

/// Parse a configured level name; unknown names fall back to `Info`.
pub fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" | "critical" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Format a log line with timestamp and level.
fn format_log(level: ::log::Level, message: &std::fmt::Arguments<'_>) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, level, message)
}

/// Install the global logger. Later calls are ignored.
pub fn init(level: &str) {
    let default = parse_level(level).to_string().to_lowercase();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| writeln!(buf, "{}", format_log(record.level(), record.args())))
        .try_init();
}
