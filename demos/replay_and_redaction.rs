//! Replay and redaction example
//!
//! Demonstrates masking sensitive values and re-logging lines captured by
//! another process.
//!
//! Run with: cargo run --example replay_and_redaction

use rust_log_dispatch::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatch - Replay and Redaction Example ===\n");

    let captured = MemorySink::new();
    let redactor = Redactor::builder()
        .pattern(r"\b\d{4}-\d{4}-\d{4}-\d{4}\b", "[CARD]")
        .build()?;

    let producer = Logger::builder()
        .name("producer")
        .destination(
            Destination::builder(captured.clone())
                .serializer(SerializerKind::Standard)
                .redactor(redactor)
                .build(),
        )
        .build();

    println!("1. Redacted output:");
    producer.info((
        LogContext::new()
            .with_field("password", "hunter2")
            .with_field("note", "paid with 4111-1111-1111-1111"),
        "checkout",
    ));
    producer.warn(LogCall::new("retrying with token=%s").arg("abc-123"));
    producer.debug("cache miss");

    for line in captured.lines() {
        print!("{}", line);
    }

    println!("\n2. Replay into a WARN+ console logger:");
    let consumer = Logger::builder()
        .name("consumer")
        .destination(
            Destination::builder(ConsoleSink::stdout())
                .severity(LogLevel::Warn)
                .serializer(SerializerKind::Standard)
                .build(),
        )
        .build();

    for line in captured.lines() {
        let accepted = consumer.replay(&line);
        println!("   accepted by {} destination(s)", accepted);
    }

    println!(
        "\nReplayed: {}, rejected: {}",
        consumer.metrics().replayed_count(),
        consumer.metrics().replay_rejected_count()
    );
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
