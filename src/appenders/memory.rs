//! In-memory destination

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable in-memory buffer.
///
/// Every clone writes to the same buffer, so one clone can be handed to a
/// logger while another reads what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Written records split on newlines, without the separators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemoryAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let reader = MemoryAppender::new();
        let mut writer = reader.clone();
        writer.write_all(b"a\nb\n").unwrap();

        assert_eq!(reader.contents(), "a\nb\n");
        assert_eq!(reader.lines(), vec!["a", "b"]);
        assert_eq!(reader.len(), 4);

        reader.clear();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_lines_handles_crlf() {
        let mut buffer = MemoryAppender::new();
        buffer.write_all(b"one\r\ntwo\r\n").unwrap();
        assert_eq!(buffer.lines(), vec!["one", "two"]);
        assert_eq!(buffer.bytes(), b"one\r\ntwo\r\n".to_vec());
    }
}
