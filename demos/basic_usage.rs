//! Basic logger usage example
//!
//! Demonstrates structured JSON records on standard output, level gating,
//! scoped loggers and the global logger.
//!
//! Run with: cargo run --example basic_usage

use rust_json_logger::prelude::*;
use rust_json_logger::{info, warn};
use std::io;
use std::time::Duration;

fn main() {
    println!("=== Rust JSON Logger - Basic Usage Example ===\n");

    let mut logger = Logger::builder(LogLevel::DEBUG, io::stdout()).build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Structured fields:");
    logger
        .string("user", "ann")
        .int("attempt", 2)
        .duration("elapsed", Duration::from_millis(1500))
        .info("login");
    info!(logger.bool("cached", true), "served {} items", 12);

    println!("\n3. Raising the minimum level to WARN:");
    logger.set_level(LogLevel::WARN);
    logger.info("Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\n4. Scoped logger carrying request fields:");
    let request = logger.string("request_id", "abc-123").into_logger();
    request.error("upstream timed out");

    println!("\n5. Global logger:");
    let restore = set_global(request);
    global().warn("through the global logger");
    restore();

    println!("\n=== Example completed successfully! ===");
}
