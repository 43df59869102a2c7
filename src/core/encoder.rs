//! JSON encoding of records and field values
//!
//! Encoding never fails a record: a value whose rendering errors or panics is
//! replaced by a placeholder string and the rest of the record is written.

use super::config::LoggerConfig;
use super::field::{AnyField, FieldValue};
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

const NIL: &str = "<nil>";

/// Incrementally built single-line JSON object preserving insertion order.
pub(crate) struct JsonLine {
    buf: String,
    empty: bool,
}

impl JsonLine {
    pub(crate) fn new() -> Self {
        Self {
            buf: String::from("{"),
            empty: true,
        }
    }

    /// Append `key` with an already encoded JSON value.
    pub(crate) fn raw(&mut self, key: &str, fragment: &str) {
        if !self.empty {
            self.buf.push(',');
        }
        self.empty = false;
        self.buf.push_str(&quote(key));
        self.buf.push(':');
        self.buf.push_str(fragment);
    }

    pub(crate) fn string(&mut self, key: &str, value: &str) {
        self.raw(key, &quote(value));
    }

    pub(crate) fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }
}

/// JSON string literal for `s`.
pub fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

/// Encode one field value as a JSON fragment.
pub fn encode(value: &FieldValue<'_>, config: &LoggerConfig) -> String {
    match value {
        FieldValue::Any(v) => encode_any(*v, config),
        FieldValue::Display(v) => quote(&render(|f| fmt::Display::fmt(v, f))),
        other => encode_known(other, config),
    }
}

/// Capability ladder: custom formatter, `Display`, known value, opaque address.
fn encode_any(value: &dyn AnyField, config: &LoggerConfig) -> String {
    if let Some(formatter) = value.as_formatter() {
        return quote(&render(|f| formatter.fmt_field(f)));
    }
    if let Some(display) = value.as_display() {
        return quote(&render(|f| fmt::Display::fmt(display, f)));
    }
    if let Some(known) = value.as_value() {
        if !matches!(known, FieldValue::Any(_)) {
            return encode(&known, config);
        }
    }
    encode_known(&FieldValue::opaque(value), config)
}

fn encode_known(value: &FieldValue<'_>, config: &LoggerConfig) -> String {
    match value {
        FieldValue::Bool(v) => v.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Uint(v) => v.to_string(),
        FieldValue::Float32(v) => encode_float(f64::from(*v), || v.to_string()),
        FieldValue::Float64(v) => encode_float(*v, || v.to_string()),
        FieldValue::Byte(v) => quote(char::from(*v).encode_utf8(&mut [0; 4])),
        FieldValue::Bytes(v) => quote(&String::from_utf8_lossy(v)),
        FieldValue::String(v) => quote(v),
        FieldValue::Duration(v) => quote(&format_duration(*v)),
        FieldValue::Time(v) => {
            let rendered = config.timestamp_format.format(v, &config.timestamp_zone);
            if config.timestamp_format.is_numeric() {
                rendered
            } else {
                quote(&rendered)
            }
        }
        FieldValue::Error(Some(err)) => quote(&render(|f| fmt::Display::fmt(err, f))),
        FieldValue::Error(None) => quote(NIL),
        FieldValue::Opaque(addr) => quote(&format!("{:#x}", addr)),
        FieldValue::Null => String::from("null"),
        FieldValue::Any(_) | FieldValue::Display(_) => encode(value, config),
    }
}

/// Non-finite values become the strings `NaN`, `+Inf` and `-Inf`.
fn encode_float(v: f64, finite: impl FnOnce() -> String) -> String {
    if v.is_nan() {
        quote("NaN")
    } else if v == f64::INFINITY {
        quote("+Inf")
    } else if v == f64::NEG_INFINITY {
        quote("-Inf")
    } else {
        finite()
    }
}

/// Run a user formatting routine, replacing errors and panics by a placeholder.
fn render(fmt_fn: impl Fn(&mut fmt::Formatter<'_>) -> fmt::Result) -> String {
    struct Adapter<F>(F);

    impl<F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result> fmt::Display for Adapter<F> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            (self.0)(f)
        }
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut out = String::new();
        write!(out, "{}", Adapter(&fmt_fn)).map(|_| out)
    }));

    match result {
        Ok(Ok(out)) => out,
        Ok(Err(_)) => String::from("<format error>"),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            format!("<panic: {}>", panic_msg)
        }
    }
}

/// Render a duration as `1h1m1.001001001s`, `1.5ms`, `42ns` or `0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return String::from("0s");
    }

    if nanos < 1_000_000_000 {
        return if nanos < 1_000 {
            format!("{}ns", nanos)
        } else if nanos < 1_000_000 {
            let (whole, frac) = split_fraction(nanos, 3);
            format!("{}{}µs", whole, frac)
        } else {
            let (whole, frac) = split_fraction(nanos, 6);
            format!("{}{}ms", whole, frac)
        };
    }

    let (total_secs, frac) = split_fraction(nanos, 9);
    let mut out = format!("{}{}s", total_secs % 60, frac);
    let total_mins = total_secs / 60;
    if total_mins > 0 {
        out.insert_str(0, &format!("{}m", total_mins % 60));
        let hours = total_mins / 60;
        if hours > 0 {
            out.insert_str(0, &format!("{}h", hours));
        }
    }
    out
}

/// Split `v` into its value in units of `10^prec` and a trimmed fraction such as `.001`.
fn split_fraction(v: u128, prec: u32) -> (u128, String) {
    let scale = 10u128.pow(prec);
    let (whole, frac) = (v / scale, v % scale);
    if frac == 0 {
        return (whole, String::new());
    }
    let digits = format!("{:0width$}", frac, width = prec as usize);
    (whole, format!(".{}", digits.trim_end_matches('0')))
}
