//! File logging example
//!
//! Demonstrates writing JSON lines to a file and building a logger from a
//! declarative configuration.
//!
//! Run with: cargo run --example file_logging

use rust_log_dispatch::config::LoggerConfig;
use rust_log_dispatch::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatch - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_log_dispatch_demo");
    fs::create_dir_all(&dir)?;
    let app_log = dir.join("app.log");
    let audit_log = dir.join("audit.log");

    println!("1. Programmatic configuration -> {}", app_log.display());
    let logger = Logger::builder()
        .name("file_logging")
        .destination(
            Destination::builder(FileSink::new(&app_log)?)
                .severity(LogLevel::Debug)
                .serializer(SerializerKind::Json)
                .build(),
        )
        .build();

    for i in 0..5 {
        logger.info(LogCall::new("processing batch %d").arg(i));
    }
    logger.debug("batch loop finished");
    logger.flush()?;

    println!("\n2. JSON configuration -> {}", audit_log.display());
    let config = serde_json::json!({
        "name": "audit",
        "context": {"component": "billing"},
        "destinations": [
            {"severity": "warn", "serializer": "standard", "sink": {"file": audit_log}, "redact": {}}
        ]
    })
    .to_string();

    let audit = LoggerConfig::from_json(&config)?.build()?;
    audit.info("not audited");
    audit.warn((
        LogContext::new()
            .with_field("user", "ada")
            .with_field("password", "hunter2"),
        "password changed",
    ));
    audit.flush()?;

    println!("\n3. File contents:");
    for path in [&app_log, &audit_log] {
        println!("--- {} ---", path.display());
        print!("{}", fs::read_to_string(path)?);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
