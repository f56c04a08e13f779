//! Basic entry logger usage
//!
//! Run with: cargo run --example basic_usage

use rust_entry_logger::prelude::*;
use rust_entry_logger::{info, warn};
use std::time::Duration;

fn main() -> Result<()> {
    let mut logger = Logger::builder().min_level(LogLevel::Info).build();

    logger
        .info()
        .field("user", "alice")
        .field("count", 3)
        .logf(LogLevel::Info, format_args!("login {}", "ok"))?;

    // Filtered out: no allocation, nothing written
    logger
        .debug()
        .field("cache", "warm")
        .log(LogLevel::Debug, "cache lookup")?;

    logger
        .err()
        .field("attempt", 2_u8)
        .field("upstream", None::<&str>)
        .log(LogLevel::Err, "upstream unavailable")?;

    info!(logger, "listening on port {}", 8080)?;
    warn!(logger, "{} requests queued", 128)?;

    if !logger.shutdown(Duration::from_secs(5)) {
        eprintln!("writer did not drain in time");
    }
    Ok(())
}
