//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod encoder;
pub mod error;
pub mod field;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod timestamp;

pub use caller::CallSite;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result, ENTRY_NOT_WRITTEN};
pub use field::{AnyField, FieldFormat, FieldValue};
pub use log_entry::{LogEntry, ERROR_KEY};
pub use log_level::{LevelNames, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use timestamp::{TimestampFormat, TimestampZone};
