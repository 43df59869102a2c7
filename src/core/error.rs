//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Message an entry reports, as an `Error`, when it was built but never written.
pub const ENTRY_NOT_WRITTEN: &str = "log entry not written";

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Destination rejected a serialized record
    #[error("writer.write: p={payload}: {source}")]
    Write {
        payload: String,
        #[source]
        source: std::io::Error,
    },

    /// Logger lookup without a context
    #[error("nil context")]
    NilContext,

    /// Context held something other than a logger under the logger key
    #[error("type assertion failed: expected={expected}, actual={actual}")]
    ContextType {
        expected: &'static str,
        actual: String,
    },

    /// The `log` facade already has a foreign logger installed
    #[error("failed to install log bridge: {0}")]
    StdLoggerInstall(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a destination write error carrying the attempted payload
    pub fn write(payload: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Write {
            payload: payload.into(),
            source,
        }
    }

    /// Create a context type mismatch error
    pub fn context_type(expected: &'static str, actual: impl Into<String>) -> Self {
        LoggerError::ContextType {
            expected,
            actual: actual.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Convert into an `io::Error` for the `io::Write` surface, keeping the kind
    /// of the underlying destination failure.
    pub fn into_io(self) -> std::io::Error {
        let kind = match &self {
            LoggerError::Write { source, .. } => source.kind(),
            LoggerError::IoError(err) => err.kind(),
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, self)
    }
}
