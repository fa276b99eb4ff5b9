//! # Rust Log Dispatch
//!
//! A structured-logging core: leveled calls become typed records that are
//! fanned out to several destinations, each with its own severity window,
//! filter, wire format and optional sensitive-data redaction.
//!
//! ## Features
//!
//! - **Multi-destination fan-out**: independent `[floor, ceiling)` windows and predicates
//! - **Two wire formats**: plain JSON and the standard `time`/`msg`/`err` line format
//! - **Replay**: serialized lines read back through a destination and re-logged
//! - **Redaction**: case-insensitive masking of sensitive keys before output
//! - **Fault isolation**: a failing destination never stops the others or the caller
//! - **Metrics side channel**: counters, gauges and timings sent through a [`MetricsSink`]
//!
//! ## Example
//!
//! ```
//! use rust_log_dispatch::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .name("api")
//!     .destination(
//!         Destination::builder(sink.clone())
//!             .severity(LogLevel::Info)
//!             .redactor(Redactor::new())
//!             .build(),
//!     )
//!     .build();
//!
//! logger.debug("not written");
//! logger.info((LogContext::new().with_field("password", "hunter2"), "login"));
//!
//! let lines = sink.lines();
//! assert_eq!(lines.len(), 1);
//! assert!(lines[0].contains("__SENSITIVE_DATA__"));
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod serializers;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ChildOptions, Destination, DestinationBuilder, ErrorInfo, LogCall, LogContext, LogLevel,
        LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Metric, MetricsSink,
        Redactor, Result, SeverityRange, Sink,
    };
    pub use crate::serializers::{Serializer, SerializerKind};
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};

    #[cfg(feature = "statsd")]
    pub use crate::sinks::StatsdSink;
}

pub use crate::core::{
    format_message, ChildOptions, Destination, DestinationBuilder, ErrorInfo, LogCall, LogContext,
    LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Metric, MetricsSink,
    RecordFilter, RedactionRule, Redactor, RedactorBuilder, Result, SeverityRange, Sink,
    StatsProvider, DEFAULT_SENSITIVE_FRAGMENTS, REDACTED_PLACEHOLDER,
};
pub use serializers::{
    DeserializedEntry, JsonSerializer, Serializer, SerializerKind, StandardSerializer,
};
pub use sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink};

#[cfg(feature = "statsd")]
pub use sinks::StatsdSink;
