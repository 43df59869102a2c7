//! Process-wide default logger

use crate::core::Logger;
use parking_lot::RwLock;
use std::sync::LazyLock;

static GLOBAL: LazyLock<RwLock<Logger>> = LazyLock::new(|| RwLock::new(Logger::default()));

/// Handle on the current global logger.
///
/// Starts as a debug-level logger writing to standard output. The returned
/// handle is a copy: changing its level does not affect the global one.
pub fn global() -> Logger {
    GLOBAL.read().clone()
}

/// Install `logger` as the global logger.
///
/// Returns a function restoring the logger that was global before this call.
/// Restores are not stacked: the last one to run wins.
///
/// # Example
/// ```
/// use rust_json_logger::prelude::*;
///
/// let restore = set_global(Logger::builder(LogLevel::ERROR, std::io::sink()).build());
/// assert_eq!(global().level(), LogLevel::ERROR);
/// restore();
/// ```
#[must_use = "the returned function restores the previous global logger"]
pub fn set_global(logger: Logger) -> impl FnOnce() + Send + 'static {
    let previous = replace_global(logger);
    move || {
        replace_global(previous);
    }
}

fn replace_global(logger: Logger) -> Logger {
    std::mem::replace(&mut *GLOBAL.write(), logger)
}
