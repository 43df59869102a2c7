//! Request-scoped values and logger propagation
//!
//! A [`Context`] is an immutable map from keys to values of any type. Adding a
//! value returns a new context and leaves the original untouched, so a context
//! can be handed down a call chain and extended at each level.

use crate::core::{Logger, LoggerError};
use crate::global::global;
use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Key under which [`with_logger`] stores the logger.
pub const LOGGER_KEY: &str = "Logger";

#[derive(Clone)]
struct ContextValue {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// Immutable key-value context
///
/// # Example
///
/// ```
/// use rust_json_logger::context::Context;
///
/// let root = Context::new();
/// let ctx = root.with_value("request_id", "abc-123".to_string());
///
/// assert_eq!(ctx.value::<String>("request_id").map(String::as_str), Some("abc-123"));
/// assert!(root.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<HashMap<String, ContextValue>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context that also holds `value` under `key`.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) -> Context {
        let mut values = (*self.values).clone();
        values.insert(
            key.into(),
            ContextValue {
                type_name: any::type_name::<T>(),
                value: Arc::new(value),
            },
        );
        Context {
            values: Arc::new(values),
        }
    }

    /// Value stored under `key`, if present and of type `T`.
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.value.downcast_ref()
    }

    /// Type name of the value stored under `key`.
    pub fn type_name(&self, key: &str) -> Option<&'static str> {
        self.values.get(key).map(|v| v.type_name)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(k, v)| (k, v.type_name)))
            .finish()
    }
}

/// Derive a context carrying `logger`.
#[must_use]
pub fn with_logger(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value(LOGGER_KEY, logger)
}

/// The logger stored in `ctx`.
///
/// Never fails: without a context, or when the context holds no logger (or
/// something else under the logger key), the problem is logged at error level
/// through the global logger and a copy of the global logger is returned.
#[track_caller]
pub fn from_context(ctx: Option<&Context>) -> Logger {
    let Some(ctx) = ctx else {
        return fallback(LoggerError::NilContext);
    };

    match ctx.value::<Logger>(LOGGER_KEY) {
        Some(logger) => logger.copy(),
        None => {
            let actual = ctx.type_name(LOGGER_KEY).unwrap_or("<nil>");
            fallback(LoggerError::context_type(any::type_name::<Logger>(), actual))
        }
    }
}

#[track_caller]
fn fallback(err: LoggerError) -> Logger {
    let logger = global();
    logger.error(err);
    logger
}
