//! Destinations a logger can write to
//!
//! Any `std::io::Write + Send` value is a valid destination; these cover the
//! common cases of capturing output in memory and appending to a file.

pub mod file;
pub mod memory;

pub use file::FileAppender;
pub use memory::MemoryAppender;
