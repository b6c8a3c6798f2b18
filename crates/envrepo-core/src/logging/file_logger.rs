//! File-based debug logger
//!
//! A process-wide logger for tracing store lookups when no host logger is
//! wired in. Disabled unless `ENVREPO_DEBUG` is `1` or `true`; the minimum
//! level comes from `ENVREPO_LOG_LEVEL` (default `debug`). Output goes to
//! `envrepo-debug.log` in the system temp directory.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

struct FileLoggerState {
    file: Option<File>,
    min_level: LogLevel,
}

impl FileLoggerState {
    fn from_env() -> Self {
        let enabled = std::env::var("ENVREPO_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let min_level = std::env::var("ENVREPO_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        let file = if enabled {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file_path())
                .ok()
        } else {
            None
        };

        Self { file, min_level }
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp(), level, module, message);
            let _ = file.flush();
        }
    }
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                (secs % 86400) / 3600,
                (secs % 3600) / 60,
                secs % 60,
                d.subsec_millis()
            )
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}

static LOGGER: Lazy<Mutex<FileLoggerState>> = Lazy::new(|| Mutex::new(FileLoggerState::from_env()));

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    LOGGER.lock().write(level, module, message);
}

pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

/// Path of the debug log file
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("envrepo-debug.log")
}

/// Debug logging macro that fills in the module path
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logging::file_logger::debug(module_path!(), &format!($($arg)*))
    };
}
