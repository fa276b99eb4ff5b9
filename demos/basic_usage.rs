//! Basic logger usage example
//!
//! Demonstrates leveled logging, context, child loggers and the two wire
//! formats on the console.
//!
//! Run with: cargo run --example basic_usage

use rust_log_dispatch::prelude::*;
use rust_log_dispatch::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Dispatch - Basic Usage Example ===\n");

    // Standard lines to stdout, plain JSON for errors on stderr
    let logger = Logger::builder()
        .name("basic_usage")
        .field("service", "demo")
        .destination(
            Destination::builder(ConsoleSink::stdout())
                .severity(SeverityRange::between(LogLevel::Trace, LogLevel::Error)?)
                .serializer(SerializerKind::Standard)
                .build(),
        )
        .destination(
            Destination::builder(ConsoleSink::stderr())
                .severity(LogLevel::Error)
                .serializer(SerializerKind::Json)
                .build(),
        )
        .build();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Context and format arguments:");
    logger.info(
        LogCall::new("user %s logged in from %s")
            .arg("ada")
            .arg("10.0.0.7")
            .context(LogContext::new().with_field("user_id", 42)),
    );
    info!(logger, context = LogContext::new().with_field("items", 3), "Cart has {} items", 3);

    println!("\n3. Errors:");
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    logger.error(LogCall::new("failed to load configuration").error(ErrorInfo::from_error(&err)));

    println!("\n4. Child logger:");
    let child = logger.child(ChildOptions::new().name("worker").field("job_id", "j-17"));
    warn!(child, "Job took {}ms", 1500);

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
