//! File destination

use crate::core::Result;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-mode file destination.
///
/// The file is created if missing and never truncated. Records are buffered
/// and flushed by the logger after every write.
///
/// # Examples
///
/// ```no_run
/// use rust_json_logger::prelude::*;
///
/// let file = FileAppender::new("/var/log/app.jsonl").unwrap();
/// let logger = Logger::builder(LogLevel::INFO, file).build();
/// logger.info("started");
/// ```
pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for FileAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Logger};
    use tempfile::tempdir;

    #[test]
    fn test_file_appender_writes_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");

        let appender = FileAppender::new(&path).unwrap();
        assert_eq!(appender.path(), path.as_path());

        let logger = Logger::builder(LogLevel::DEBUG, appender)
            .timestamp_key("")
            .caller_key("")
            .build();
        logger.int("n", 1).info("first");
        logger.info("second");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\"severity\":\"INFO\",\"message\":\"first\",\"n\":1}\n{\"severity\":\"INFO\",\"message\":\"second\"}\n"
        );
    }

    #[test]
    fn test_file_appender_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        {
            let mut appender = FileAppender::new(&path).unwrap();
            appender.write_all(b"more\n").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\nmore\n");
    }

    #[test]
    fn test_file_appender_missing_directory() {
        let dir = tempdir().unwrap();
        let result = FileAppender::new(dir.path().join("missing").join("app.log"));
        assert!(result.is_err());
    }
}
