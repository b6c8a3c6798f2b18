//! Console logger implementation

use super::traits::Logger;

/// A logger that writes to stderr, info to stdout
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::with_prefix("[envrepo]")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn line(&self, level: &str, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        eprintln!("{}", self.line("DEBUG", message));
    }

    fn info(&self, message: &str) {
        println!("{}", self.line("INFO", message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", self.line("WARN", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.line("ERROR", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_prefix() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.line("WARN", "bad yaml"), "[envrepo] WARN: bad yaml");

        let custom = ConsoleLogger::with_prefix("[config-server]");
        assert_eq!(custom.line("INFO", "ready"), "[config-server] INFO: ready");
    }
}
