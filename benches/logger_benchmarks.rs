//! Criterion benchmarks for rust_log_dispatch

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_dispatch::prelude::*;
use std::sync::Arc;

fn memory_logger(level: LogLevel, kind: SerializerKind) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .destination(
            Destination::builder(sink.clone())
                .severity(level)
                .serializer(kind)
                .build(),
        )
        .build();
    (logger, sink)
}

fn sample_record() -> LogRecord {
    LogRecord::new(
        "bench",
        LogLevel::Info,
        None,
        LogContext::new()
            .with_field("user_id", 12345)
            .with_field("path", "/api/v1/orders")
            .with_field("latency_ms", 42.5),
        "request completed",
    )
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    for kind in [SerializerKind::Json, SerializerKind::Standard] {
        let (logger, sink) = memory_logger(LogLevel::Trace, kind);

        group.bench_function(format!("info_{}", kind), |b| {
            b.iter(|| {
                logger.info(black_box("Info message"));
                if sink.len() > 10_000 {
                    sink.clear();
                }
            });
        });

        group.bench_function(format!("info_with_context_{}", kind), |b| {
            b.iter(|| {
                logger.info(
                    LogCall::new("user %s did %d things")
                        .arg("ada")
                        .arg(3)
                        .context(LogContext::new().with_field("request_id", "abc")),
                );
                if sink.len() > 10_000 {
                    sink.clear();
                }
            });
        });

        group.bench_function(format!("error_{}", kind), |b| {
            b.iter(|| {
                logger.error(black_box("Error message"));
                if sink.len() > 10_000 {
                    sink.clear();
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let (logger, _sink) = memory_logger(LogLevel::Error, SerializerKind::Json);

    group.bench_function("filtered_debug", |b| {
        b.iter(|| {
            logger.debug(black_box("Filtered message"));
        });
    });

    group.finish();
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    let record = sample_record();

    for kind in [SerializerKind::Json, SerializerKind::Standard] {
        let serializer = kind.create();
        let line = serializer.serialize(&record).unwrap();

        group.bench_function(format!("serialize_{}", kind), |b| {
            b.iter(|| black_box(serializer.serialize(black_box(&record)).unwrap()));
        });

        group.bench_function(format!("deserialize_{}", kind), |b| {
            b.iter(|| black_box(serializer.deserialize(black_box(&line)).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Redaction Benchmarks
// ============================================================================

fn bench_redaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("redaction");
    let redactor = Redactor::new();

    let clean = SerializerKind::Standard
        .create()
        .serialize(&sample_record())
        .unwrap();
    let sensitive = r#"{"name":"bench","password":"hunter2","query":"token=abc-123&page=2","msg":"login"}"#;

    group.bench_function("clean_line", |b| {
        b.iter(|| black_box(redactor.apply(black_box(&clean)).len()));
    });

    group.bench_function("sensitive_line", |b| {
        b.iter(|| black_box(redactor.apply(black_box(sensitive)).len()));
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 100) as u64));

        group.bench_function(format!("{}_threads", threads), |b| {
            b.iter(|| {
                let (logger, _sink) = memory_logger(LogLevel::Info, SerializerKind::Json);
                let logger = Arc::new(logger);

                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let logger = Arc::clone(&logger);
                        std::thread::spawn(move || {
                            for i in 0..100 {
                                logger.info(LogCall::new("thread %d message %d").arg(t).arg(i));
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_logging,
    bench_level_filtering,
    bench_serialization,
    bench_redaction,
    bench_concurrent_logging,
);
criterion_main!(benches);
