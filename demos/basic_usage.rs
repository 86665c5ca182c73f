//! Basic logger usage example
//!
//! Logs one message per level to the console and to
//! `logs/logfile_<LEVEL>.log`, then shuts the logger down so every line is
//! on disk before the program exits.
//!
//! Run with: cargo run --example basic_usage

use async_file_logger::prelude::*;

fn main() -> Result<()> {
    let mut logger = Logger::builder()
        .base_path("logs/logfile")
        .min_level(LogLevel::Debug)
        .split_by_level(true)
        .structured(false)
        .max_file_size(1024 * 1024)
        .build()?;

    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");

    logger.shutdown()?;

    let metrics = logger.metrics();
    println!(
        "\nWrote {} entries ({} sink failures)",
        metrics.written(),
        metrics.sink_failures()
    );

    Ok(())
}
