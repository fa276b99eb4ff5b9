//! Main logger implementation
//!
//! A [`Logger`] builds one [`LogRecord`] per call and hands it, synchronously
//! and in configuration order, to every [`Destination`]. A failing or
//! panicking destination never stops delivery to the ones after it, and
//! nothing on the logging path returns an error to the caller.

use super::{
    destination::Destination,
    error::{LoggerError, Result},
    error_info::ErrorInfo,
    log_call::LogCall,
    log_context::LogContext,
    log_level::LogLevel,
    log_record::LogRecord,
    metric::{Metric, MetricsSink},
    metrics::LoggerMetrics,
    stats::{default_provider, StatsProvider, STATS_KEY},
};
use crate::serializers::SerializerKind;
use crate::sinks::ConsoleSink;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Logger name used when none is configured
pub const DEFAULT_LOGGER_NAME: &str = "logger";

pub struct Logger {
    name: String,
    context: LogContext,
    destinations: Arc<Vec<Arc<Destination>>>,
    with_stats: bool,
    stats_provider: StatsProvider,
    metrics_sink: Option<Arc<dyn MetricsSink>>,
    /// Delivery counters, shared with children
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with default settings writing standard lines to stdout
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ambient context merged into every record
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn destinations(&self) -> &[Arc<Destination>] {
        &self.destinations
    }

    pub fn with_stats(&self) -> bool {
        self.with_stats
    }

    /// Delivery counters for this logger and its children
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn fatal(&self, call: impl Into<LogCall>) {
        self.log_call(LogLevel::Fatal, call);
    }

    #[inline]
    pub fn error(&self, call: impl Into<LogCall>) {
        self.log_call(LogLevel::Error, call);
    }

    #[inline]
    pub fn warn(&self, call: impl Into<LogCall>) {
        self.log_call(LogLevel::Warn, call);
    }

    #[inline]
    pub fn info(&self, call: impl Into<LogCall>) {
        self.log_call(LogLevel::Info, call);
    }

    #[inline]
    pub fn debug(&self, call: impl Into<LogCall>) {
        self.log_call(LogLevel::Debug, call);
    }

    #[inline]
    pub fn trace(&self, call: impl Into<LogCall>) {
        self.log_call(LogLevel::Trace, call);
    }

    /// Normalize a call descriptor at `level` and log it
    pub fn log_call(&self, level: LogLevel, call: impl Into<LogCall>) {
        let normalized = call.into().normalize(level);
        self.log(level, normalized.error, normalized.context, normalized.message);
    }

    /// Build a record and deliver it to every destination
    pub fn log(
        &self,
        level: LogLevel,
        error: Option<ErrorInfo>,
        mut context: LogContext,
        message: impl Into<String>,
    ) {
        if self.with_stats {
            let stats = self.collect_stats();
            context.add_field(STATS_KEY, stats);
        }

        let record = LogRecord::new(
            self.name.as_str(),
            level,
            error,
            self.context.merged_with(&context),
            message,
        );
        self.dispatch(&record);
    }

    /// Per-destination delivery with panic isolation
    fn dispatch(&self, record: &LogRecord) {
        for destination in self.destinations.iter() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| destination.write(record)));

            match outcome {
                Ok(Ok(true)) => {
                    self.metrics.record_written();
                }
                Ok(Ok(false)) => {
                    self.metrics.record_filtered();
                }
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Destination '{}' failed: {}",
                        destination.name(),
                        e
                    );
                    self.metrics.record_failed();
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Destination '{}' panicked: {}. \
                         Other destinations continue to function.",
                        destination.name(),
                        panic_message(panic_info.as_ref())
                    );
                    self.metrics.record_failed();
                }
            }
        }
    }

    fn collect_stats(&self) -> Value {
        panic::catch_unwind(AssertUnwindSafe(|| (self.stats_provider)())).unwrap_or_else(|_| {
            eprintln!("[LOGGER ERROR] Statistics provider panicked; logging without stats");
            Value::Null
        })
    }

    /// Re-log a line captured elsewhere
    ///
    /// Every destination decodes the line with its own serializer and applies
    /// its severity window. Each acceptance produces a fresh record (new
    /// timestamp, host and pid) delivered through all destinations. Lines
    /// whose level is not a defined one are rejected.
    ///
    /// Returns the number of destinations that accepted the line.
    pub fn replay(&self, line: &str) -> usize {
        let mut accepted = 0;

        for destination in self.destinations.iter() {
            let entry = panic::catch_unwind(AssertUnwindSafe(|| destination.read(line)))
                .ok()
                .flatten();

            let Some((level, entry)) = entry.and_then(|e| e.log_level().map(|l| (l, e))) else {
                self.metrics.record_replay_rejected();
                continue;
            };

            self.metrics.record_replayed();
            accepted += 1;
            self.log(level, entry.error, entry.context, entry.message);
        }

        accepted
    }

    /// New logger sharing this logger's destinations, with `options` applied
    /// over a copy of this logger's configuration
    ///
    /// The child's ambient context is this context overridden by the child's
    /// keys. The parent is left untouched.
    #[must_use]
    pub fn child(&self, options: impl Into<ChildOptions>) -> Logger {
        let options = options.into();

        Logger {
            name: options.name.unwrap_or_else(|| self.name.clone()),
            context: self.context.merged_with(&options.context),
            destinations: Arc::clone(&self.destinations),
            with_stats: options.with_stats.unwrap_or(self.with_stats),
            stats_provider: Arc::clone(&self.stats_provider),
            metrics_sink: self.metrics_sink.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Emit a metric through the configured metrics sink
    ///
    /// Without a sink this is a no-op. An operation the sink does not support
    /// is a programming error and is returned as
    /// [`LoggerError::UnknownMetricOperation`]; a failing delivery is only
    /// reported on stderr.
    pub fn metric(
        &self,
        operation: &str,
        value: f64,
        sample_rate: Option<f64>,
        tags: &[&str],
    ) -> Result<()> {
        let Some(ref sink) = self.metrics_sink else {
            return Ok(());
        };

        if !sink.supports(operation) {
            return Err(LoggerError::unknown_metric(operation, sink.name()));
        }

        let metric = Metric::new(self.name.as_str(), value)
            .with_sample_rate(sample_rate)
            .with_tags(tags.iter().copied());

        if let Err(e) = sink.invoke(operation, &metric) {
            eprintln!(
                "[LOGGER ERROR] Metrics sink '{}' failed on '{}': {}",
                sink.name(),
                operation,
                e
            );
        }

        Ok(())
    }

    /// Flush every destination's sink
    pub fn flush(&self) -> Result<()> {
        for destination in self.destinations.iter() {
            destination.flush()?;
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("destinations", &self.destinations)
            .field("with_stats", &self.with_stats)
            .field(
                "metrics_sink",
                &self.metrics_sink.as_ref().map(|sink| sink.name().to_string()),
            )
            .finish()
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Overrides applied by [`Logger::child`]
#[derive(Debug, Clone, Default)]
pub struct ChildOptions {
    name: Option<String>,
    context: LogContext,
    with_stats: Option<bool>,
}

impl ChildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Context keys layered over the parent's ambient context
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.context.add_field(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.with_stats = Some(enabled);
        self
    }
}

impl From<LogContext> for ChildOptions {
    fn from(context: LogContext) -> Self {
        Self::new().context(context)
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_dispatch::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .name("api")
///     .field("service", "billing")
///     .destination(
///         Destination::builder(sink.clone())
///             .severity(LogLevel::Info)
///             .serializer(SerializerKind::Standard)
///             .build(),
///     )
///     .build();
///
/// logger.debug("dropped");
/// logger.info("kept");
/// assert_eq!(sink.len(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    context: LogContext,
    destinations: Vec<Arc<Destination>>,
    with_stats: bool,
    stats_provider: Option<StatsProvider>,
    metrics_sink: Option<Arc<dyn MetricsSink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            context: LogContext::new(),
            destinations: Vec::new(),
            with_stats: false,
            stats_provider: None,
            metrics_sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the ambient context
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// Add one ambient context field
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.context.add_field(key, value);
        self
    }

    /// Add a destination; delivery follows insertion order
    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destinations.push(Arc::new(destination));
        self
    }

    /// Add a destination already shared with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn shared_destination(mut self, destination: Arc<Destination>) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Inject a statistics snapshot into every record's context
    #[must_use = "builder methods return a new value"]
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.with_stats = enabled;
        self
    }

    /// Replace the statistics source used when stats are enabled
    #[must_use = "builder methods return a new value"]
    pub fn stats_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.stats_provider = Some(Arc::new(provider));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn metrics_sink<M: MetricsSink + 'static>(mut self, sink: M) -> Self {
        self.metrics_sink = Some(Arc::new(sink));
        self
    }

    /// Build the Logger
    ///
    /// Without any destination, standard lines go to stdout.
    pub fn build(self) -> Logger {
        let mut destinations = self.destinations;
        if destinations.is_empty() {
            destinations.push(Arc::new(
                Destination::builder(ConsoleSink::stdout())
                    .name("default")
                    .serializer(SerializerKind::Standard)
                    .build(),
            ));
        }

        Logger {
            name: self.name,
            context: self.context,
            destinations: Arc::new(destinations),
            with_stats: self.with_stats,
            stats_provider: self.stats_provider.unwrap_or_else(default_provider),
            metrics_sink: self.metrics_sink,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
