//! Integration tests for the log dispatch pipeline
//!
//! These tests verify:
//! - Severity windows and the standard wire format end to end
//! - Context isolation and call normalization
//! - Child loggers sharing destinations
//! - Fault isolation between destinations
//! - Replay of captured lines
//! - Redaction and file output
//! - Metrics routing

use parking_lot::Mutex;
use rust_log_dispatch::config::LoggerConfig;
use rust_log_dispatch::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn parse(line: &str) -> Value {
    serde_json::from_str(line).expect("line should be JSON")
}

fn memory_logger(severity: impl Into<SeverityRange>, kind: SerializerKind) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .name("integration")
        .destination(
            Destination::builder(sink.clone())
                .severity(severity)
                .serializer(kind)
                .build(),
        )
        .build();
    (logger, sink)
}

#[test]
fn test_end_to_end_standard_format() {
    let (logger, sink) = memory_logger(LogLevel::Info, SerializerKind::Standard);

    logger.debug("hidden");
    logger.info((LogContext::new().with_field("x", 1), "hi"));

    let lines = sink.lines();
    assert_eq!(lines.len(), 1, "Only the info line should be written");
    assert!(lines[0].ends_with('\n'));

    let line = parse(&lines[0]);
    assert_eq!(line["level"], 30);
    assert_eq!(line["x"], 1);
    assert_eq!(line["msg"], "hi");
    assert_eq!(line["v"], 0);
    assert_eq!(line["name"], "integration");
    assert!(line["time"].as_str().unwrap().ends_with('Z'));
    assert!(line.get("message").is_none());
    assert!(line.get("timestamp").is_none());
}

#[test]
fn test_context_isolation() {
    let (logger, sink) = memory_logger(LogLevel::Trace, SerializerKind::Json);

    let mut ctx = LogContext::new().with_field("a", 1);
    logger.log(LogLevel::Info, None, ctx.clone(), "m1");
    ctx.add_field("a", 2);
    logger.log(LogLevel::Info, None, ctx, "m2");

    let lines = sink.lines();
    assert_eq!(parse(&lines[0])["context"]["a"], 1);
    assert_eq!(parse(&lines[1])["context"]["a"], 2);
}

#[test]
fn test_argument_normalization() {
    let (logger, sink) = memory_logger(LogLevel::Trace, SerializerKind::Json);

    logger.error("plain");
    logger.warn("no error attached");
    logger.info(
        LogCall::new("user %s has %d items")
            .arg("ada")
            .arg(3)
            .error(ErrorInfo::synthetic("ignored at info")),
    );

    let lines = sink.lines();

    let error_line = parse(&lines[0]);
    assert_eq!(error_line["message"], "plain");
    assert_eq!(error_line["error"]["name"], "Error");
    assert_eq!(error_line["context"]["err"]["message"], "plain");

    let warn_line = parse(&lines[1]);
    assert!(warn_line["error"].is_null());
    assert_eq!(warn_line["context"], json!({}));

    let info_line = parse(&lines[2]);
    assert_eq!(info_line["message"], "user ada has 3 items");
    assert!(info_line["error"].is_null());
    assert!(info_line["context"].get("err").is_none());
}

#[test]
fn test_trace_carries_stack() {
    let (logger, sink) = memory_logger(LogLevel::Trace, SerializerKind::Json);
    logger.trace("deep");

    let line = parse(&sink.lines()[0]);
    let frames: Vec<&str> = line["context"]["trace"]
        .as_array()
        .expect("trace should be an array")
        .iter()
        .map(|frame| frame.as_str().expect("frames are strings"))
        .collect();

    assert!(!frames.is_empty());
    assert!(
        frames.iter().all(|frame| !frame.contains("rust_log_dispatch::core::")),
        "dispatcher frames leaked: {:?}",
        frames
    );
    assert!(
        frames[0].contains("test_trace_carries_stack"),
        "first frame should be the caller, got {:?}",
        frames[0]
    );
}

#[test]
fn test_windowed_destinations() {
    let low = MemorySink::new();
    let high = MemorySink::new();
    let logger = Logger::builder()
        .destination(
            Destination::builder(low.clone())
                .severity(SeverityRange::between(LogLevel::Trace, LogLevel::Warn).unwrap())
                .build(),
        )
        .destination(
            Destination::builder(high.clone())
                .severity(LogLevel::Warn)
                .build(),
        )
        .build();

    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error("e");

    assert_eq!(low.len(), 2);
    assert_eq!(high.len(), 2);
    assert_eq!(logger.metrics().total_written(), 4);
    assert_eq!(logger.metrics().filtered_count(), 4);
}

#[test]
fn test_child_inheritance() {
    let (logger, sink) = memory_logger(LogLevel::Trace, SerializerKind::Standard);
    let parent = logger.child(LogContext::new().with_field("request_id", "r-1"));
    let child = parent.child(
        ChildOptions::new()
            .name("worker")
            .field("request_id", "r-2")
            .field("job", 7),
    );

    child.info("child line");
    parent.info("parent line");

    let lines = sink.lines();
    let child_line = parse(&lines[0]);
    assert_eq!(child_line["name"], "worker");
    assert_eq!(child_line["request_id"], "r-2");
    assert_eq!(child_line["job"], 7);

    let parent_line = parse(&lines[1]);
    assert_eq!(parent_line["name"], "integration");
    assert_eq!(parent_line["request_id"], "r-1");
    assert!(parent_line.get("job").is_none());
}

#[test]
fn test_failing_destination_is_isolated() {
    struct BrokenSink;
    impl Sink for BrokenSink {
        fn write(&mut self, _line: &str) -> rust_log_dispatch::Result<()> {
            Err(LoggerError::sink("disk full"))
        }
        fn flush(&mut self) -> rust_log_dispatch::Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "broken"
        }
    }

    let healthy = MemorySink::new();
    let logger = Logger::builder()
        .destination(Destination::builder(BrokenSink).build())
        .destination(Destination::builder(healthy.clone()).build())
        .build();

    logger.info("still delivered");

    assert_eq!(healthy.len(), 1);
    assert_eq!(logger.metrics().failed_count(), 1);
    assert!(logger.metrics().failure_rate() > 0.0);
}

#[test]
fn test_panicking_filter_is_isolated() {
    let healthy = MemorySink::new();
    let logger = Logger::builder()
        .destination(
            Destination::builder(MemorySink::new())
                .filter(|_| panic!("bad predicate"))
                .build(),
        )
        .destination(Destination::builder(healthy.clone()).build())
        .build();

    logger.info("survives");
    assert_eq!(healthy.len(), 1);
}

#[test]
fn test_replay_of_captured_line() {
    let (logger, sink) = memory_logger(LogLevel::Info, SerializerKind::Json);

    let captured = json!({"level": 40, "context": {"a": 1}, "msg": "from elsewhere"}).to_string();
    assert_eq!(logger.replay(&captured), 1);

    let line = parse(&sink.lines()[0]);
    assert_eq!(line["level"], 40);
    assert_eq!(line["message"], "from elsewhere");
    assert_eq!(line["context"]["a"], 1);
    assert_eq!(line["name"], "integration");

    assert_eq!(logger.replay(r#"{"level":20,"msg":"too low"}"#), 0);
    assert_eq!(logger.replay("{not json"), 0);
    assert_eq!(sink.len(), 1);
    assert_eq!(logger.metrics().replayed_count(), 1);
}

#[test]
fn test_replay_standard_line_with_error() {
    let (source, captured) = memory_logger(LogLevel::Trace, SerializerKind::Standard);
    source.error(
        LogCall::new("payment failed")
            .error(ErrorInfo::from_parts("PaymentError", "declined", "PaymentError: declined\n  at charge"))
            .context(LogContext::new().with_field("order", 9)),
    );

    let (target, sink) = memory_logger(LogLevel::Warn, SerializerKind::Json);
    assert_eq!(target.replay(&captured.lines()[0]), 1);

    let line = parse(&sink.lines()[0]);
    assert_eq!(line["level"], 50);
    assert_eq!(line["message"], "payment failed");
    assert_eq!(line["error"]["name"], "PaymentError");
    assert_eq!(line["error"]["stack"], "PaymentError: declined\n  at charge");
    assert_eq!(line["context"]["order"], 9);
}

#[test]
fn test_redaction_end_to_end() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .destination(
            Destination::builder(sink.clone())
                .redactor(Redactor::new())
                .build(),
        )
        .build();

    logger.info((
        LogContext::new()
            .with_field("password", "secret123")
            .with_field("accept-language", "en-US")
            .with_field("query", "user=ada&token=abc-123"),
        "login",
    ));

    let line = &sink.lines()[0];
    assert!(line.contains(r#""password":"__SENSITIVE_DATA__""#));
    assert!(line.contains(r#""accept-language":"en-US""#));
    assert!(line.contains("token=__SENSITIVE_DATA__"));
    assert!(!line.contains("secret123"));
    assert!(!line.contains("abc-123"));
}

#[test]
fn test_file_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .destination(
            Destination::builder(FileSink::new(&log_file).expect("Failed to create sink"))
                .severity(LogLevel::Info)
                .build(),
        )
        .build();

    for i in 0..5 {
        logger.info(LogCall::new("entry %d").arg(i));
    }
    logger.debug("skipped");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(parse(lines[4])["msg"], "entry 4");
}

#[test]
fn test_stats_enrichment() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .with_stats(true)
        .stats_provider(|| json!({"freemem": 42, "loadavg": [0.1, 0.2, 0.3]}))
        .destination(Destination::builder(sink.clone()).build())
        .build();

    logger.info("with stats");
    logger
        .child(ChildOptions::new().with_stats(false))
        .info("without stats");

    let lines = sink.lines();
    assert_eq!(parse(&lines[0])["stats"]["freemem"], 42);
    assert!(parse(&lines[1]).get("stats").is_none());
}

#[test]
fn test_metrics_routing() {
    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<String>>>);

    impl MetricsSink for Recording {
        fn supports(&self, operation: &str) -> bool {
            matches!(operation, "increment" | "timing")
        }
        fn invoke(&self, operation: &str, metric: &Metric) -> rust_log_dispatch::Result<()> {
            self.0
                .lock()
                .push(format!("{}:{}:{}", operation, metric.name, metric.value));
            Ok(())
        }
        fn name(&self) -> &str {
            "recording"
        }
    }

    let recording = Recording::default();
    let logger = Logger::builder()
        .name("hello")
        .destination(Destination::builder(MemorySink::new()).build())
        .metrics_sink(recording.clone())
        .build();

    logger.metric("increment", 1.0, None, &[]).unwrap();
    logger.child(ChildOptions::new().name("child")).metric("timing", 12.0, None, &[]).unwrap();
    assert!(logger.metric("launch", 1.0, None, &[]).is_err());

    assert_eq!(
        *recording.0.lock(),
        vec!["increment:hello:1".to_string(), "timing:child:12".to_string()]
    );
}

#[test]
fn test_json_configuration() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");

    let config = json!({
        "name": "configured",
        "context": {"service": "billing"},
        "destinations": [{
            "severity": ["info", "error"],
            "serializer": "bunyan",
            "sink": {"file": log_file},
            "redact": {"fragments": ["card"]}
        }]
    })
    .to_string();

    let logger = LoggerConfig::from_json(&config).unwrap().build().unwrap();
    logger.info((LogContext::new().with_field("card", "4111"), "charged"));
    logger.error("not in window");
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let line = parse(lines[0]);
    assert_eq!(line["name"], "configured");
    assert_eq!(line["service"], "billing");
    assert_eq!(line["card"], "__SENSITIVE_DATA__");
}
