//! Timestamp formatting utilities
//!
//! Provides configurable timestamp formats and zones for the timestamp key and
//! for time-valued fields.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use rust_json_logger::core::{TimestampFormat, TimestampZone};
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2023, 8, 12, 19, 38, 39).unwrap();
/// let rendered = TimestampFormat::Rfc3339Nano.format(&at.fixed_offset(), &TimestampZone::Utc);
/// assert_eq!(rendered, "2023-08-12T19:38:39Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with nanoseconds, trailing zeros trimmed: `2023-08-13T04:38:39.123456789+09:00`
    ///
    /// This is the default format.
    #[default]
    Rfc3339Nano,

    /// RFC 3339 in whole seconds: `2023-08-13T04:38:39+09:00`
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// Unix `date` style: `Sun Aug 13 04:38:39 UTC 2023`
    UnixDate,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// A pattern chrono cannot render falls back to [`TimestampFormat::Rfc3339Nano`].
    ///
    /// ```
    /// use rust_json_logger::core::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

/// Zone a timestamp is converted to before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampZone {
    Utc,
    #[default]
    Local,
    /// Fixed offset east of UTC, in seconds
    Fixed(i32),
}

impl TimestampZone {
    /// Fixed zone for an offset in hours east of UTC.
    pub fn hours_east(hours: i32) -> Self {
        TimestampZone::Fixed(hours * 3600)
    }

    /// Reject fixed offsets of a day or more.
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampZone::Fixed(secs) if FixedOffset::east_opt(*secs).is_none() => Err(
                LoggerError::config("timestamp_zone", format!("offset out of range: {}s", secs)),
            ),
            _ => Ok(()),
        }
    }
}

impl TimestampFormat {
    /// Render `datetime` in `zone` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>, zone: &TimestampZone) -> String {
        match zone {
            TimestampZone::Utc => self.render(&datetime.with_timezone(&Utc)),
            TimestampZone::Local => self.render(&datetime.with_timezone(&Local)),
            TimestampZone::Fixed(secs) => match FixedOffset::east_opt(*secs) {
                Some(offset) => self.render(&datetime.with_timezone(&offset)),
                None => self.render(&datetime.with_timezone(&Utc)),
            },
        }
    }

    fn render<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Rfc3339Nano => {
                let nanos = datetime.timestamp_subsec_nanos() % 1_000_000_000;
                let mut out = datetime.format("%Y-%m-%dT%H:%M:%S").to_string();
                if nanos != 0 {
                    let digits = format!("{:09}", nanos);
                    out.push('.');
                    out.push_str(digits.trim_end_matches('0'));
                }
                out.push_str(&zone_suffix(datetime));
                out
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Iso8601 => {
                format!("{}{}", datetime.format("%Y-%m-%dT%H:%M:%S%.3f"), zone_suffix(datetime))
            }
            TimestampFormat::Iso8601Micros => {
                format!("{}{}", datetime.format("%Y-%m-%dT%H:%M:%S%.6f"), zone_suffix(datetime))
            }
            TimestampFormat::UnixDate => datetime.format("%a %b %e %H:%M:%S %Z %Y").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Rfc3339Nano.render(datetime),
                }
            }
        }
    }

    /// Reject custom patterns containing specifiers chrono does not know.
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(format_str)
                if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) =>
            {
                Err(LoggerError::config(
                    "timestamp_format",
                    format!("invalid strftime pattern {:?}", format_str),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

fn zone_suffix<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    if datetime.offset().fix().local_minus_utc() == 0 {
        "Z".to_string()
    } else {
        datetime.format("%:z").to_string()
    }
}
