//! Log entry accumulation and dispatch

use super::{
    caller::CallSite,
    encoder,
    error::{Result, ENTRY_NOT_WRITTEN},
    field::{AnyField, FieldValue},
    log_level::LogLevel,
    logger::{report_failure, Logger},
};
use chrono::{DateTime, TimeZone};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::time::Duration;

/// Key used by [`LogEntry::err`].
pub const ERROR_KEY: &str = "error";

/// An open record: the fields gathered so far plus the logger that will write it.
///
/// Field methods consume the entry and return it with one more field, in call
/// order. A terminal method (`log`, `debug`, `info`, `warn`, `error`, `write`)
/// consumes the entry and writes at most one record. Clone an entry to fork it.
///
/// An entry that is dropped without a terminal call writes nothing; as an
/// [`Error`] it reports `log entry not written` so the pattern is easy to spot.
#[derive(Clone)]
#[must_use = "log entry not written"]
pub struct LogEntry<'a> {
    logger: Logger,
    fields: Vec<(String, FieldValue<'a>)>,
}

impl<'a> LogEntry<'a> {
    pub(crate) fn new(logger: Logger) -> Self {
        Self {
            logger,
            fields: Vec::new(),
        }
    }

    /// Append a field of any supported type.
    pub fn field(mut self, key: impl Into<String>, value: FieldValue<'a>) -> Self {
        self.fields.push((key.into(), value));
        self
    }

    pub fn fields(&self) -> &[(String, FieldValue<'a>)] {
        &self.fields
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Append any value convertible to a field, e.g. integers, strings,
    /// `Option<T>` (where `None` is `null`) or a `&dyn AnyField`.
    pub fn any(self, key: impl Into<String>, value: impl Into<FieldValue<'a>>) -> Self {
        self.field(key, value.into())
    }

    /// Append a value rendered through its [`AnyField`] capabilities.
    pub fn any_field(self, key: impl Into<String>, value: &'a dyn AnyField) -> Self {
        self.field(key, FieldValue::Any(value))
    }

    pub fn bool(self, key: impl Into<String>, value: bool) -> Self {
        self.field(key, FieldValue::Bool(value))
    }

    /// Bytes are written as a JSON string; invalid UTF-8 is replaced.
    pub fn bytes(self, key: impl Into<String>, value: &'a [u8]) -> Self {
        self.field(key, FieldValue::Bytes(Cow::Borrowed(value)))
    }

    pub fn duration(self, key: impl Into<String>, value: Duration) -> Self {
        self.field(key, FieldValue::Duration(value))
    }

    /// Append `err` under the `error` key.
    ///
    /// An absent error is logged with `any(ERROR_KEY, FieldValue::error(None))`,
    /// which renders as `"<nil>"`.
    pub fn err<E: Error + 'a>(self, err: &'a E) -> Self {
        self.err_with_key(ERROR_KEY, err)
    }

    /// Append `err` under `key`; see [`LogEntry::err`] for absent errors.
    pub fn err_with_key<E: Error + 'a>(self, key: impl Into<String>, err: &'a E) -> Self {
        self.field(key, FieldValue::Error(Some(err)))
    }

    pub fn float32(self, key: impl Into<String>, value: f32) -> Self {
        self.field(key, FieldValue::Float32(value))
    }

    pub fn float64(self, key: impl Into<String>, value: f64) -> Self {
        self.field(key, FieldValue::Float64(value))
    }

    pub fn int(self, key: impl Into<String>, value: isize) -> Self {
        self.field(key, FieldValue::Int(value as i64))
    }

    pub fn int32(self, key: impl Into<String>, value: i32) -> Self {
        self.field(key, FieldValue::Int(i64::from(value)))
    }

    pub fn int64(self, key: impl Into<String>, value: i64) -> Self {
        self.field(key, FieldValue::Int(value))
    }

    pub fn string(self, key: impl Into<String>, value: impl Into<Cow<'a, str>>) -> Self {
        self.field(key, FieldValue::String(value.into()))
    }

    /// Rendered with the logger's timestamp format and zone.
    pub fn time<Tz: TimeZone>(self, key: impl Into<String>, value: DateTime<Tz>) -> Self {
        self.field(key, FieldValue::Time(value.fixed_offset()))
    }

    pub fn uint(self, key: impl Into<String>, value: usize) -> Self {
        self.field(key, FieldValue::Uint(value as u64))
    }

    pub fn uint32(self, key: impl Into<String>, value: u32) -> Self {
        self.field(key, FieldValue::Uint(u64::from(value)))
    }

    pub fn uint64(self, key: impl Into<String>, value: u64) -> Self {
        self.field(key, FieldValue::Uint(value))
    }

    /// A logger whose every record carries this entry's fields.
    pub fn into_logger(self) -> Logger {
        let config = self.logger.config();
        let encoded = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), encoder::encode(value, config)))
            .collect();
        self.logger.with_fields(encoded)
    }

    /// Write the record at `level` if the logger's level admits it.
    ///
    /// A destination failure is reported through the global logger.
    #[track_caller]
    pub fn log(self, level: LogLevel, message: impl fmt::Display) {
        let site = CallSite::Tracked(Location::caller());
        if let Err(e) = self.logger.dispatch(level, &message, &self.fields, site) {
            report_failure(&e);
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(self, message: impl fmt::Display) {
        self.log(LogLevel::DEBUG, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(self, message: impl fmt::Display) {
        self.log(LogLevel::INFO, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(self, message: impl fmt::Display) {
        self.log(LogLevel::WARN, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(self, message: impl fmt::Display) {
        self.log(LogLevel::ERROR, message);
    }

    /// Write `buf` as the message at the logger's current level.
    ///
    /// Returns `buf.len()` on success. A destination failure is returned as
    /// [`LoggerError::Write`](super::error::LoggerError::Write) carrying the
    /// attempted record, and also reported through the global logger.
    #[track_caller]
    pub fn write(self, buf: &[u8]) -> Result<usize> {
        let site = CallSite::Tracked(Location::caller());
        let message = String::from_utf8_lossy(buf);
        let level = self.logger.level();
        match self.logger.dispatch(level, &message, &self.fields, site) {
            Ok(()) => Ok(buf.len()),
            Err(e) => {
                report_failure(&e);
                Err(e)
            }
        }
    }
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ENTRY_NOT_WRITTEN)
    }
}

impl fmt::Debug for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("level", &self.logger.level())
            .field("fields", &self.fields)
            .finish()
    }
}

impl Error for LogEntry<'_> {}
