//! Core logger types and traits

pub mod destination;
pub mod error;
pub mod error_info;
pub mod format;
pub mod log_call;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metric;
pub mod metrics;
pub mod redaction;
pub mod sink;
pub mod stats;
pub mod timestamp;

pub use destination::{Destination, DestinationBuilder, RecordFilter, SeverityRange};
pub use error::{LoggerError, Result};
pub use error_info::ErrorInfo;
pub use format::format_message;
pub use log_call::{LogCall, ERROR_KEY, TRACE_KEY};
pub use log_context::LogContext;
pub use log_level::LogLevel;
pub use log_record::{current_hostname, LogRecord};
pub use logger::{ChildOptions, Logger, LoggerBuilder, DEFAULT_LOGGER_NAME};
pub use metric::{Metric, MetricsSink};
pub use metrics::LoggerMetrics;
pub use redaction::{
    RedactionRule, Redactor, RedactorBuilder, DEFAULT_SENSITIVE_FRAGMENTS, REDACTED_PLACEHOLDER,
};
pub use sink::Sink;
pub use stats::{system_stats, StatsProvider, STATS_KEY};
