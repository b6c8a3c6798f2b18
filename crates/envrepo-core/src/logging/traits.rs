//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction so the host decides where diagnostics go
///
/// Implementations:
/// - `NoOpLogger`: Silent logger, the repository default
/// - `ConsoleLogger`: Logs to stdout/stderr
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Convenience macros for logging through a `Logger`
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}
