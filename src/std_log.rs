//! Bridge from the `log` facade
//!
//! Records emitted through `log::info!` and friends are written by the logger
//! installed with [`set_std_logger`], with the record's own file and line as
//! the caller.

use crate::core::{
    logger::report_failure, CallSite, LogLevel, Logger, LoggerError, Result,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::{const_mutex, const_rwlock, Mutex, RwLock};
use std::panic::Location;

static BRIDGE: Bridge = Bridge;
static TARGET: RwLock<Option<Logger>> = const_rwlock(None);
static INSTALLED: Mutex<bool> = const_mutex(false);

struct Bridge;

impl Log for Bridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        TARGET
            .read()
            .as_ref()
            .is_some_and(|logger| level_from(metadata.level()) >= logger.level())
    }

    fn log(&self, record: &Record<'_>) {
        let Some(logger) = TARGET.read().clone() else {
            return;
        };

        let site = match (record.file(), record.line()) {
            (Some(file), Some(line)) => CallSite::Explicit { file, line },
            _ => CallSite::Tracked(Location::caller()),
        };

        if let Err(e) = logger.dispatch(level_from(record.level()), record.args(), &[], site) {
            report_failure(&e);
        }
    }

    fn flush(&self) {}
}

/// Route the `log` facade to `logger`.
///
/// The first call registers this crate with the facade; it fails with
/// [`LoggerError::StdLoggerInstall`] if another `log` implementation got there
/// first. The returned function restores the previously routed logger and the
/// facade's previous maximum level.
///
/// # Example
/// ```
/// use rust_json_logger::prelude::*;
///
/// let buffer = MemoryAppender::new();
/// let logger = Logger::builder(LogLevel::INFO, buffer.clone()).build();
/// let restore = set_std_logger(logger).unwrap();
///
/// log::info!("via log");
/// assert!(buffer.contents().contains("\"message\":\"via log\""));
/// restore();
/// ```
#[must_use = "the returned function restores the previous routing"]
pub fn set_std_logger(logger: Logger) -> Result<impl FnOnce() + Send + 'static> {
    let mut installed = INSTALLED.lock();
    if !*installed {
        log::set_logger(&BRIDGE).map_err(|e| LoggerError::StdLoggerInstall(e.to_string()))?;
        *installed = true;
    }

    let previous_max = log::max_level();
    log::set_max_level(max_level_for(logger.level()));
    let previous = TARGET.write().replace(logger);
    drop(installed);

    Ok(move || {
        let _installed = INSTALLED.lock();
        *TARGET.write() = previous;
        log::set_max_level(previous_max);
    })
}

fn level_from(level: Level) -> LogLevel {
    match level {
        Level::Error => LogLevel::ERROR,
        Level::Warn => LogLevel::WARN,
        Level::Info => LogLevel::INFO,
        Level::Debug | Level::Trace => LogLevel::DEBUG,
    }
}

/// Most verbose facade level that can pass a logger at `level`.
fn max_level_for(level: LogLevel) -> LevelFilter {
    if level <= LogLevel::DEBUG {
        LevelFilter::Trace
    } else if level <= LogLevel::INFO {
        LevelFilter::Info
    } else if level <= LogLevel::WARN {
        LevelFilter::Warn
    } else if level <= LogLevel::ERROR {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_from(Level::Error), LogLevel::ERROR);
        assert_eq!(level_from(Level::Warn), LogLevel::WARN);
        assert_eq!(level_from(Level::Info), LogLevel::INFO);
        assert_eq!(level_from(Level::Debug), LogLevel::DEBUG);
        assert_eq!(level_from(Level::Trace), LogLevel::DEBUG);
    }

    #[test]
    fn test_max_level_for() {
        assert_eq!(max_level_for(LogLevel(-128)), LevelFilter::Trace);
        assert_eq!(max_level_for(LogLevel::DEBUG), LevelFilter::Trace);
        assert_eq!(max_level_for(LogLevel(-4)), LevelFilter::Info);
        assert_eq!(max_level_for(LogLevel::INFO), LevelFilter::Info);
        assert_eq!(max_level_for(LogLevel::WARN), LevelFilter::Warn);
        assert_eq!(max_level_for(LogLevel::ERROR), LevelFilter::Error);
        assert_eq!(max_level_for(LogLevel(17)), LevelFilter::Off);
    }
}
