//! Logging macros for ergonomic log message formatting.
//!
//! The macros accept a `Logger` or a `LogEntry`. A single message argument is
//! written verbatim, braces included; with more arguments the first one is a
//! format string, as in `format!`.
//!
//! # Examples
//!
//! ```
//! use rust_json_logger::prelude::*;
//! use rust_json_logger::info;
//!
//! let buffer = MemoryAppender::new();
//! let logger = Logger::builder(LogLevel::DEBUG, buffer.clone())
//!     .timestamp_key("")
//!     .caller_key("")
//!     .build();
//!
//! info!(logger, "{verbatim}");
//! info!(logger.int("port", 8080), "listening on port {}", 8080);
//!
//! assert_eq!(
//!     buffer.lines(),
//!     vec![
//!         "{\"severity\":\"INFO\",\"message\":\"{verbatim}\"}",
//!         "{\"severity\":\"INFO\",\"message\":\"listening on port 8080\",\"port\":8080}",
//!     ]
//! );
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::builder(LogLevel::DEBUG, std::io::sink()).build();
/// use rust_json_logger::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel(4), "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(,)?) => {
        $logger.log($level, $msg)
    };
    ($logger:expr, $level:expr, $fmt:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($fmt, $($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::builder(LogLevel::DEBUG, std::io::sink()).build();
/// use rust_json_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_json_logger::prelude::*;
/// # let logger = Logger::builder(LogLevel::DEBUG, std::io::sink()).build();
/// use rust_json_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{LogLevel, Logger};

    fn test_logger(level: LogLevel) -> (Logger, MemoryAppender) {
        let buffer = MemoryAppender::new();
        let logger = Logger::builder(level, buffer.clone())
            .timestamp_key("")
            .caller_key("")
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_log_macro() {
        let (logger, buffer) = test_logger(LogLevel::DEBUG);
        log!(logger, LogLevel::INFO, "Test message");
        log!(logger, LogLevel::INFO, "Formatted: {}", 42);
        assert_eq!(
            buffer.lines(),
            vec![
                "{\"severity\":\"INFO\",\"message\":\"Test message\"}",
                "{\"severity\":\"INFO\",\"message\":\"Formatted: 42\"}",
            ]
        );
    }

    #[test]
    fn test_single_argument_is_verbatim() {
        let (logger, buffer) = test_logger(LogLevel::DEBUG);
        debug!(logger, "100%s {}");
        assert_eq!(buffer.contents(), "{\"severity\":\"DEBUG\",\"message\":\"100%s {}\"}\n");
    }

    #[test]
    fn test_level_macros() {
        let (logger, buffer) = test_logger(LogLevel::INFO);
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        assert_eq!(
            buffer.lines(),
            vec![
                "{\"severity\":\"INFO\",\"message\":\"Items: 100\"}",
                "{\"severity\":\"WARN\",\"message\":\"Retry 1 of 3\"}",
                "{\"severity\":\"ERROR\",\"message\":\"Code: 500\"}",
            ]
        );
    }

    #[test]
    fn test_macros_accept_entries() {
        let (logger, buffer) = test_logger(LogLevel::DEBUG);
        warn!(logger.string("user", "ann"), "login failed {} times", 3);
        assert_eq!(
            buffer.contents(),
            "{\"severity\":\"WARN\",\"message\":\"login failed 3 times\",\"user\":\"ann\"}\n"
        );
    }
}
