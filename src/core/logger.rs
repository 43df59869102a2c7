//! Main logger implementation

use super::{
    caller::{self, CallSite},
    config::LoggerConfig,
    encoder::{self, JsonLine},
    error::{LoggerError, Result},
    field::{AnyField, FieldValue},
    log_entry::LogEntry,
    log_level::{LevelNames, LogLevel},
    timestamp::{TimestampFormat, TimestampZone},
};
use chrono::Utc;
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

/// State shared by a logger, its copies and every entry derived from them.
struct Shared {
    config: LoggerConfig,
    writer: Mutex<Box<dyn Write + Send>>,
}

/// Structured JSON logger.
///
/// A `Logger` is a template: field methods start a [`LogEntry`], terminal
/// methods write one record. Cloning (or [`Logger::copy`]) is cheap and the
/// copy's level and caller skip are independent of the original; the
/// configuration and destination stay shared.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    level: LogLevel,
    caller_skip: isize,
    /// Fields carried by every record, already encoded
    fields: Arc<Vec<(String, String)>>,
}

impl Logger {
    /// Create a builder writing records at `level` and above to `writer`.
    ///
    /// # Example
    /// ```
    /// use rust_json_logger::prelude::*;
    ///
    /// let buffer = MemoryAppender::new();
    /// let logger = Logger::builder(LogLevel::DEBUG, buffer.clone())
    ///     .timestamp_key("")
    ///     .caller_key("")
    ///     .build();
    ///
    /// logger.int("x", -1).debug("m");
    /// assert_eq!(buffer.contents(), "{\"severity\":\"DEBUG\",\"message\":\"m\",\"x\":-1}\n");
    /// ```
    #[must_use]
    pub fn builder(level: LogLevel, writer: impl Write + Send + 'static) -> LoggerBuilder {
        LoggerBuilder::new(level, writer)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Change the minimum level of this handle.
    pub fn set_level(&mut self, level: LogLevel) -> &mut Self {
        self.level = level;
        self
    }

    /// Adjust how many frames above the call site the caller is taken from.
    ///
    /// Adjustments accumulate and may be negative; resolution clamps to the
    /// frames the runtime can provide.
    pub fn add_caller_skip(&mut self, delta: isize) -> &mut Self {
        self.caller_skip = self.caller_skip.saturating_add(delta);
        self
    }

    pub fn caller_skip(&self) -> isize {
        self.caller_skip
    }

    /// Independent handle sharing configuration and destination.
    #[must_use]
    pub fn copy(&self) -> Logger {
        self.clone()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.shared.config
    }

    /// Start an entry with no fields.
    pub fn entry<'a>(&self) -> LogEntry<'a> {
        LogEntry::new(self.clone())
    }

    pub(crate) fn with_fields(&self, extra: Vec<(String, String)>) -> Logger {
        let mut fields = Vec::with_capacity(self.fields.len() + extra.len());
        fields.extend(self.fields.iter().cloned());
        fields.extend(extra);
        Logger {
            fields: Arc::new(fields),
            ..self.clone()
        }
    }

    /// Level gate, encoding and write of one record.
    pub(crate) fn dispatch(
        &self,
        level: LogLevel,
        message: &dyn fmt::Display,
        fields: &[(String, FieldValue<'_>)],
        site: CallSite<'_>,
    ) -> Result<()> {
        if level < self.level {
            return Ok(());
        }

        let payload = self.render(level, message, fields, site);
        self.write_record(payload)
    }

    fn render(
        &self,
        level: LogLevel,
        message: &dyn fmt::Display,
        fields: &[(String, FieldValue<'_>)],
        site: CallSite<'_>,
    ) -> String {
        let config = &self.shared.config;
        let mut line = JsonLine::new();

        if !config.level_key.is_empty() {
            line.string(&config.level_key, &config.levels.name(level));
        }
        if !config.timestamp_key.is_empty() {
            let now = FieldValue::Time(Utc::now().fixed_offset());
            line.raw(&config.timestamp_key, &encoder::encode(&now, config));
        }
        if !config.caller_key.is_empty() {
            let caller = caller::resolve(site, self.caller_skip, config.short_caller);
            line.string(&config.caller_key, &caller);
        }
        if !config.message_key.is_empty() {
            let message = FieldValue::Display(message);
            line.raw(&config.message_key, &encoder::encode(&message, config));
        }
        for (key, fragment) in self.fields.iter() {
            line.raw(key, fragment);
        }
        for (key, value) in fields {
            line.raw(key, &encoder::encode(value, config));
        }

        line.finish()
    }

    fn write_record(&self, mut payload: String) -> Result<()> {
        let len = payload.len();
        payload.push_str(&self.shared.config.separator);

        let written = {
            let mut writer = self.shared.writer.lock();
            writer
                .write_all(payload.as_bytes())
                .and_then(|()| writer.flush())
        };

        match written {
            Ok(()) => Ok(()),
            Err(source) => {
                payload.truncate(len);
                Err(LoggerError::write(payload, source))
            }
        }
    }

    // Field methods, each starting a new entry

    pub fn any<'a>(&self, key: impl Into<String>, value: impl Into<FieldValue<'a>>) -> LogEntry<'a> {
        self.entry().any(key, value)
    }

    pub fn any_field<'a>(&self, key: impl Into<String>, value: &'a dyn AnyField) -> LogEntry<'a> {
        self.entry().any_field(key, value)
    }

    pub fn bool<'a>(&self, key: impl Into<String>, value: bool) -> LogEntry<'a> {
        self.entry().bool(key, value)
    }

    pub fn bytes<'a>(&self, key: impl Into<String>, value: &'a [u8]) -> LogEntry<'a> {
        self.entry().bytes(key, value)
    }

    pub fn duration<'a>(&self, key: impl Into<String>, value: Duration) -> LogEntry<'a> {
        self.entry().duration(key, value)
    }

    pub fn err<'a, E: Error + 'a>(&self, err: &'a E) -> LogEntry<'a> {
        self.entry().err(err)
    }

    pub fn err_with_key<'a, E: Error + 'a>(&self, key: impl Into<String>, err: &'a E) -> LogEntry<'a> {
        self.entry().err_with_key(key, err)
    }

    pub fn float32<'a>(&self, key: impl Into<String>, value: f32) -> LogEntry<'a> {
        self.entry().float32(key, value)
    }

    pub fn float64<'a>(&self, key: impl Into<String>, value: f64) -> LogEntry<'a> {
        self.entry().float64(key, value)
    }

    pub fn int<'a>(&self, key: impl Into<String>, value: isize) -> LogEntry<'a> {
        self.entry().int(key, value)
    }

    pub fn int32<'a>(&self, key: impl Into<String>, value: i32) -> LogEntry<'a> {
        self.entry().int32(key, value)
    }

    pub fn int64<'a>(&self, key: impl Into<String>, value: i64) -> LogEntry<'a> {
        self.entry().int64(key, value)
    }

    pub fn string<'a>(&self, key: impl Into<String>, value: impl Into<std::borrow::Cow<'a, str>>) -> LogEntry<'a> {
        self.entry().string(key, value)
    }

    pub fn time<'a, Tz: chrono::TimeZone>(&self, key: impl Into<String>, value: chrono::DateTime<Tz>) -> LogEntry<'a> {
        self.entry().time(key, value)
    }

    pub fn uint<'a>(&self, key: impl Into<String>, value: usize) -> LogEntry<'a> {
        self.entry().uint(key, value)
    }

    pub fn uint32<'a>(&self, key: impl Into<String>, value: u32) -> LogEntry<'a> {
        self.entry().uint32(key, value)
    }

    pub fn uint64<'a>(&self, key: impl Into<String>, value: u64) -> LogEntry<'a> {
        self.entry().uint64(key, value)
    }

    // Terminal methods

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        self.entry().log(level, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.entry().log(LogLevel::DEBUG, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.entry().log(LogLevel::INFO, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.entry().log(LogLevel::WARN, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.entry().log(LogLevel::ERROR, message);
    }
}

impl Default for Logger {
    /// Debug level, default configuration, standard output.
    fn default() -> Self {
        Logger::builder(LogLevel::DEBUG, io::stdout()).build()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("caller_skip", &self.caller_skip)
            .field("fields", &self.fields.len())
            .field("config", &self.shared.config)
            .finish()
    }
}

/// Byte sink: every write becomes one record at the logger's current level.
impl Write for Logger {
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.entry().write(buf).map_err(LoggerError::into_io)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.shared.writer.lock().flush()
    }
}

/// Report a failed record once through the global logger.
///
/// The report is written without reporting its own failure, so a failing
/// global destination yields a single stderr line instead of a loop.
pub(crate) fn report_failure(err: &LoggerError) {
    let reporter = crate::global::global();
    let site = CallSite::Tracked(Location::caller());
    if let Err(report_err) = reporter.dispatch(LogLevel::ERROR, err, &[], site) {
        eprintln!("[LOGGER ERROR] {} (report failed: {})", err, report_err);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_json_logger::prelude::*;
///
/// let logger = Logger::builder(LogLevel::INFO, std::io::sink())
///     .level_key("level")
///     .timestamp_zone(TimestampZone::Utc)
///     .short_caller(false)
///     .separator("\r\n")
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::INFO);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    writer: Box<dyn Write + Send>,
    config: LoggerConfig,
}

impl LoggerBuilder {
    pub fn new(level: LogLevel, writer: impl Write + Send + 'static) -> Self {
        Self {
            level,
            writer: Box::new(writer),
            config: LoggerConfig::default(),
        }
    }

    /// Replace the whole configuration snapshot
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Key for the severity name; empty omits it
    #[must_use = "builder methods return a new value"]
    pub fn level_key(mut self, key: impl Into<String>) -> Self {
        self.config = self.config.with_level_key(key);
        self
    }

    /// Key for the timestamp; empty omits it
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_key(mut self, key: impl Into<String>) -> Self {
        self.config = self.config.with_timestamp_key(key);
        self
    }

    /// Key for the call site; empty omits it and skips resolution
    #[must_use = "builder methods return a new value"]
    pub fn caller_key(mut self, key: impl Into<String>) -> Self {
        self.config = self.config.with_caller_key(key);
        self
    }

    /// Key for the message; empty omits it
    #[must_use = "builder methods return a new value"]
    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.config = self.config.with_message_key(key);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config = self.config.with_timestamp_format(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_zone(mut self, zone: TimestampZone) -> Self {
        self.config = self.config.with_timestamp_zone(zone);
        self
    }

    /// Names written under the severity key
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: LevelNames) -> Self {
        self.config = self.config.with_levels(levels);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn short_caller(mut self, short: bool) -> Self {
        self.config = self.config.with_short_caller(short);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config = self.config.with_separator(separator);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            shared: Arc::new(Shared {
                config: self.config,
                writer: Mutex::new(self.writer),
            }),
            level: self.level,
            caller_skip: 0,
            fields: Arc::new(Vec::new()),
        }
    }
}
