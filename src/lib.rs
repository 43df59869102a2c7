//! # Rust JSON Logger
//!
//! A structured logging facade writing one JSON object per record.
//!
//! ## Features
//!
//! - **Structured**: typed fields encoded in call order after a fixed header
//!   of severity, timestamp, caller and message
//! - **Cheap when disabled**: records below the logger's level are dropped
//!   before anything is encoded
//! - **Configurable**: every header key can be renamed or omitted, and the
//!   timestamp format, zone, level names and separator are configurable
//! - **Integrated**: a process-wide global logger, request-scoped contexts and
//!   a bridge from the `log` facade
//!
//! ## Example
//!
//! ```
//! use rust_json_logger::prelude::*;
//!
//! let buffer = MemoryAppender::new();
//! let logger = Logger::builder(LogLevel::INFO, buffer.clone())
//!     .timestamp_key("")
//!     .caller_key("")
//!     .build();
//!
//! logger.string("user", "ann").int("attempt", 2).info("login");
//! logger.debug("suppressed");
//!
//! assert_eq!(
//!     buffer.contents(),
//!     "{\"severity\":\"INFO\",\"message\":\"login\",\"user\":\"ann\",\"attempt\":2}\n"
//! );
//! ```

pub mod appenders;
pub mod context;
pub mod core;
pub mod global;
pub mod macros;
pub mod std_log;

pub mod prelude {
    pub use crate::appenders::{FileAppender, MemoryAppender};
    pub use crate::context::{from_context, with_logger, Context};
    pub use crate::core::{
        AnyField, FieldFormat, FieldValue, LevelNames, LogEntry, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, Result, TimestampFormat, TimestampZone,
    };
    pub use crate::global::{global, set_global};
    pub use crate::std_log::set_std_logger;
}

pub use appenders::{FileAppender, MemoryAppender};
pub use context::{from_context, with_logger, Context};
pub use core::{
    AnyField, FieldFormat, FieldValue, LevelNames, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, Result, TimestampFormat, TimestampZone,
};
pub use global::{global, set_global};
pub use std_log::set_std_logger;
