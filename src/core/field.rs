//! Typed values carried by a log entry
//!
//! Values are stored as-is and only encoded once a record has passed the level
//! gate, so building fields for a suppressed record costs no formatting.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Custom rendering capability, checked before `Display`.
pub trait FieldFormat {
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Capabilities a value exposes to [`FieldValue::any`].
///
/// The encoder asks in order: custom formatter, `Display`, known value, and
/// finally renders an opaque address.
pub trait AnyField {
    fn as_formatter(&self) -> Option<&dyn FieldFormat> {
        None
    }

    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }

    fn as_value(&self) -> Option<FieldValue<'_>> {
        None
    }
}

/// Value type for structured logging fields
#[derive(Clone)]
pub enum FieldValue<'a> {
    Any(&'a dyn AnyField),
    Display(&'a dyn fmt::Display),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Byte(u8),
    Bytes(Cow<'a, [u8]>),
    String(Cow<'a, str>),
    Duration(Duration),
    Time(DateTime<FixedOffset>),
    Error(Option<&'a (dyn Error + 'a)>),
    Opaque(usize),
    Null,
}

impl<'a> FieldValue<'a> {
    /// Dispatch through the [`AnyField`] capability ladder.
    pub fn any(value: &'a dyn AnyField) -> Self {
        FieldValue::Any(value)
    }

    pub fn display(value: &'a dyn fmt::Display) -> Self {
        FieldValue::Display(value)
    }

    /// An error value; `None` renders as `"<nil>"`.
    pub fn error(err: Option<&'a (dyn Error + 'a)>) -> Self {
        FieldValue::Error(err)
    }

    /// Address of a value with no other representation, e.g. a function.
    pub fn opaque<T: ?Sized>(value: &T) -> Self {
        FieldValue::Opaque(value as *const T as *const () as usize)
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Any(_) => f.write_str("Any(..)"),
            FieldValue::Display(v) => write!(f, "Display({})", v),
            FieldValue::Bool(v) => write!(f, "Bool({})", v),
            FieldValue::Int(v) => write!(f, "Int({})", v),
            FieldValue::Uint(v) => write!(f, "Uint({})", v),
            FieldValue::Float32(v) => write!(f, "Float32({})", v),
            FieldValue::Float64(v) => write!(f, "Float64({})", v),
            FieldValue::Byte(v) => write!(f, "Byte({})", v),
            FieldValue::Bytes(v) => write!(f, "Bytes({:?})", v),
            FieldValue::String(v) => write!(f, "String({:?})", v),
            FieldValue::Duration(v) => write!(f, "Duration({:?})", v),
            FieldValue::Time(v) => write!(f, "Time({})", v),
            FieldValue::Error(Some(e)) => write!(f, "Error({})", e),
            FieldValue::Error(None) => f.write_str("Error(<nil>)"),
            FieldValue::Opaque(addr) => write!(f, "Opaque({:#x})", addr),
            FieldValue::Null => f.write_str("Null"),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for FieldValue<'_> {
                fn from(v: $t) -> Self {
                    FieldValue::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i16, i32, i64, isize, i8);
impl_from_int!(Uint, u64, u16, u32, u64, usize);

impl From<u8> for FieldValue<'_> {
    fn from(v: u8) -> Self {
        FieldValue::Byte(v)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<f32> for FieldValue<'_> {
    fn from(v: f32) -> Self {
        FieldValue::Float32(v)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(v: f64) -> Self {
        FieldValue::Float64(v)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        FieldValue::String(Cow::Borrowed(v))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(v: &'a String) -> Self {
        FieldValue::String(Cow::Borrowed(v.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(v: String) -> Self {
        FieldValue::String(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for FieldValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        FieldValue::Bytes(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for FieldValue<'_> {
    fn from(v: Vec<u8>) -> Self {
        FieldValue::Bytes(Cow::Owned(v))
    }
}

impl From<Duration> for FieldValue<'_> {
    fn from(v: Duration) -> Self {
        FieldValue::Duration(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue<'_> {
    fn from(v: DateTime<Tz>) -> Self {
        FieldValue::Time(v.fixed_offset())
    }
}

impl<'a> From<&'a (dyn Error + 'a)> for FieldValue<'a> {
    fn from(v: &'a (dyn Error + 'a)) -> Self {
        FieldValue::Error(Some(v))
    }
}

impl<'a> From<&'a dyn AnyField> for FieldValue<'a> {
    fn from(v: &'a dyn AnyField) -> Self {
        FieldValue::Any(v)
    }
}

/// `None` is a nil pointer-like value and renders as JSON `null`.
impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
