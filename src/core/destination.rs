//! Destinations: one sink plus the rules deciding what reaches it
//!
//! A destination accepts a record when
//! `floor <= level < ceiling` and its filter (if any) returns `true`.
//! Accepted records are serialized, optionally redacted, terminated with a
//! newline and written to the sink.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::redaction::Redactor;
use super::sink::Sink;
use crate::serializers::{DeserializedEntry, Serializer, SerializerKind};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a record goes to a destination
pub type RecordFilter = Arc<dyn Fn(&LogRecord) -> bool + Send + Sync>;

/// Half-open severity window `[floor, ceiling)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityRange {
    floor: i64,
    ceiling: i64,
}

impl SeverityRange {
    /// Upper bound used when none is configured; above every defined level
    pub const UNBOUNDED: i64 = i64::MAX;

    /// Window `[floor, ceiling)`; an empty window is a configuration error
    pub fn new(floor: i64, ceiling: i64) -> Result<Self> {
        if floor >= ceiling {
            return Err(LoggerError::config(
                "Destination",
                format!("severity floor {} must be below ceiling {}", floor, ceiling),
            ));
        }
        Ok(Self { floor, ceiling })
    }

    /// Everything at or above `level`
    pub fn at_least(level: LogLevel) -> Self {
        Self {
            floor: i64::from(level.value()),
            ceiling: Self::UNBOUNDED,
        }
    }

    /// Levels from `floor` up to, not including, `ceiling`
    pub fn between(floor: LogLevel, ceiling: LogLevel) -> Result<Self> {
        Self::new(i64::from(floor.value()), i64::from(ceiling.value()))
    }

    pub fn floor(&self) -> i64 {
        self.floor
    }

    pub fn ceiling(&self) -> i64 {
        self.ceiling
    }

    #[inline]
    pub fn contains(&self, level: i64) -> bool {
        self.floor <= level && level < self.ceiling
    }
}

impl Default for SeverityRange {
    fn default() -> Self {
        Self {
            floor: 0,
            ceiling: Self::UNBOUNDED,
        }
    }
}

impl From<LogLevel> for SeverityRange {
    fn from(level: LogLevel) -> Self {
        Self::at_least(level)
    }
}

pub struct Destination {
    name: String,
    severity: SeverityRange,
    filter: Option<RecordFilter>,
    serializer: Arc<dyn Serializer>,
    redactor: Option<Redactor>,
    sink: Mutex<Box<dyn Sink>>,
}

impl Destination {
    /// Start configuring a destination writing to `sink`
    #[must_use]
    pub fn builder<S: Sink + 'static>(sink: S) -> DestinationBuilder {
        DestinationBuilder::new(Box::new(sink))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> SeverityRange {
        self.severity
    }

    pub fn serializer(&self) -> &Arc<dyn Serializer> {
        &self.serializer
    }

    /// Severity window test shared by the write and read paths
    #[inline]
    pub fn accepts(&self, level: i64) -> bool {
        self.severity.contains(level)
    }

    /// Full inclusion test for a record
    pub fn includes(&self, record: &LogRecord) -> bool {
        self.accepts(i64::from(record.level().value()))
            && self.filter.as_ref().map_or(true, |filter| filter(record))
    }

    /// Emit `record` if it passes the window and filter
    ///
    /// Returns `Ok(false)` when the record was filtered out; errors only come
    /// from serialization or the sink.
    pub fn write(&self, record: &LogRecord) -> Result<bool> {
        if !self.includes(record) {
            return Ok(false);
        }

        let serialized = self.serializer.serialize(record)?;
        let mut line = match self.redactor {
            Some(ref redactor) => redactor.apply(&serialized).into_owned(),
            None => serialized,
        };
        line.push('\n');

        self.sink.lock().write(&line)?;
        Ok(true)
    }

    /// Decode a line and apply the severity window to its level
    ///
    /// Returns `None` when the line is malformed or outside the window.
    pub fn read(&self, line: &str) -> Option<DeserializedEntry> {
        let entry = self.serializer.deserialize(line).ok()?;
        if self.accepts(entry.level) {
            Some(entry)
        } else {
            None
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("name", &self.name)
            .field("severity", &self.severity)
            .field("filter", &self.filter.is_some())
            .field("serializer", &self.serializer.name())
            .field("redactor", &self.redactor.is_some())
            .finish()
    }
}

/// Builder for [`Destination`]
///
/// # Example
/// ```
/// use rust_log_dispatch::prelude::*;
///
/// let destination = Destination::builder(MemorySink::new())
///     .name("audit")
///     .severity(LogLevel::Warn)
///     .serializer(SerializerKind::Json)
///     .filter(|record| record.context().contains_key("user_id"))
///     .build();
/// assert_eq!(destination.name(), "audit");
/// ```
pub struct DestinationBuilder {
    name: Option<String>,
    severity: SeverityRange,
    filter: Option<RecordFilter>,
    serializer: Arc<dyn Serializer>,
    redactor: Option<Redactor>,
    sink: Box<dyn Sink>,
}

impl DestinationBuilder {
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            name: None,
            severity: SeverityRange::default(),
            filter: None,
            serializer: SerializerKind::default().create(),
            redactor: None,
            sink,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the inclusion window; a bare level means "this level and above"
    #[must_use = "builder methods return a new value"]
    pub fn severity(mut self, severity: impl Into<SeverityRange>) -> Self {
        self.severity = severity.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&LogRecord) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Use one of the built-in serializers
    #[must_use = "builder methods return a new value"]
    pub fn serializer(mut self, kind: SerializerKind) -> Self {
        self.serializer = kind.create();
        self
    }

    /// Use a custom serializer implementation
    #[must_use = "builder methods return a new value"]
    pub fn custom_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = serializer;
        self
    }

    /// Mask sensitive values in every line before it reaches the sink
    #[must_use = "builder methods return a new value"]
    pub fn redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = Some(redactor);
        self
    }

    pub fn build(self) -> Destination {
        let name = self
            .name
            .unwrap_or_else(|| self.sink.name().to_string());

        Destination {
            name,
            severity: self.severity,
            filter: self.filter,
            serializer: self.serializer,
            redactor: self.redactor,
            sink: Mutex::new(self.sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorInfo, LogContext};
    use crate::sinks::MemorySink;

    fn record(level: LogLevel) -> LogRecord {
        LogRecord::new("test", level, None, LogContext::new().with_field("a", 1), "m")
    }

    #[test]
    fn test_window_is_half_open() {
        let range = SeverityRange::between(LogLevel::Debug, LogLevel::Error).unwrap();
        assert!(!range.contains(10));
        assert!(range.contains(20));
        assert!(range.contains(40));
        assert!(!range.contains(50));
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(SeverityRange::new(40, 40).is_err());
        assert!(SeverityRange::between(LogLevel::Error, LogLevel::Info).is_err());
    }

    #[test]
    fn test_default_window_accepts_everything() {
        let range = SeverityRange::default();
        for level in LogLevel::ALL {
            assert!(range.contains(i64::from(level.value())));
        }
    }

    #[test]
    fn test_write_filters_by_level() {
        let sink = MemorySink::new();
        let destination = Destination::builder(sink.clone())
            .severity(LogLevel::Info)
            .build();

        assert!(!destination.write(&record(LogLevel::Debug)).unwrap());
        assert!(destination.write(&record(LogLevel::Info)).unwrap());
        assert_eq!(sink.len(), 1);
        assert!(sink.lines()[0].ends_with('\n'));
    }

    #[test]
    fn test_filter_predicate() {
        let sink = MemorySink::new();
        let destination = Destination::builder(sink.clone())
            .filter(|record| record.context().contains_key("user_id"))
            .build();

        assert!(!destination.write(&record(LogLevel::Info)).unwrap());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_redaction_applied_before_sink() {
        let sink = MemorySink::new();
        let destination = Destination::builder(sink.clone())
            .serializer(SerializerKind::Standard)
            .redactor(Redactor::new())
            .build();

        let record = LogRecord::new(
            "test",
            LogLevel::Info,
            None,
            LogContext::new().with_field("password", "secret123"),
            "login",
        );
        destination.write(&record).unwrap();

        let line = &sink.lines()[0];
        assert!(line.contains(r#""password":"__SENSITIVE_DATA__""#));
        assert!(!line.contains("secret123"));
        assert_eq!(record.context().get("password").unwrap(), "secret123");
    }

    #[test]
    fn test_read_applies_window() {
        let destination = Destination::builder(MemorySink::new())
            .severity(LogLevel::Warn)
            .serializer(SerializerKind::Json)
            .build();

        assert!(destination.read(r#"{"level":30,"message":"m"}"#).is_none());
        let entry = destination.read(r#"{"level":50,"message":"m"}"#).unwrap();
        assert_eq!(entry.level, 50);
    }

    #[test]
    fn test_read_malformed_is_rejected() {
        let destination = Destination::builder(MemorySink::new()).build();
        assert!(destination.read("definitely not json").is_none());
    }

    #[test]
    fn test_error_record_serialized() {
        let sink = MemorySink::new();
        let destination = Destination::builder(sink.clone()).build();
        let record = LogRecord::new(
            "test",
            LogLevel::Error,
            Some(ErrorInfo::synthetic("boom")),
            LogContext::new(),
            "boom",
        );

        destination.write(&record).unwrap();
        assert!(sink.lines()[0].contains(r#""err":{"#));
    }

    #[test]
    fn test_name_defaults_to_sink_name() {
        let destination = Destination::builder(MemorySink::new()).build();
        assert_eq!(destination.name(), "memory");
    }
}
