//! File logging example
//!
//! Demonstrates a logger configured from JSON writing to an append-mode file,
//! with the `log` facade routed to it.
//!
//! Run with: cargo run --example file_logging

use rust_json_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust JSON Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{"level_key":"level","message_key":"msg","timestamp_zone":"Utc"}"#,
    )?;
    let file = FileAppender::new("application.jsonl")?;
    let logger = Logger::builder(LogLevel::INFO, file).config(config).build();

    println!("1. Logging to file:");
    logger.info("Application started");
    logger.debug("Loading configuration... (filtered)");
    logger.string("path", "/etc/app.toml").info("Configuration loaded");
    logger.warn("Using default settings for some options");

    println!("\n2. Routing the log facade to the same file:");
    let restore = set_std_logger(logger.copy())?;
    for i in 1..=5 {
        log::info!("Processing item {}/5", i);
        if i == 3 {
            log::warn!("Item 3 took longer than expected");
        }
    }
    restore();

    logger.info("All operations completed");

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.jsonl' for the full log output");

    Ok(())
}
