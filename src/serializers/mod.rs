//! Wire format strategies
//!
//! A [`Serializer`] turns a [`LogRecord`] into one line of text and reads such
//! a line back into a [`DeserializedEntry`]. Two strategies ship with the
//! crate: [`JsonSerializer`] (plain field dump) and [`StandardSerializer`]
//! (the `time`/`msg`/`err` line format understood by common log tooling).

pub mod json;
pub mod standard;

pub use json::JsonSerializer;
pub use standard::StandardSerializer;

use crate::core::{ErrorInfo, LogContext, LogLevel, LogRecord, LoggerError, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Record <-> line conversion
pub trait Serializer: Send + Sync {
    /// Encode a record as a single line, without the trailing newline
    fn serialize(&self, record: &LogRecord) -> Result<String>;

    /// Decode one line produced by `serialize`
    fn deserialize(&self, line: &str) -> Result<DeserializedEntry>;

    fn name(&self) -> &str;
}

/// Structure recovered from a serialized line
///
/// `level` stays a raw integer so destinations can window-check lines
/// carrying levels this crate does not define.
#[derive(Debug, Clone, PartialEq)]
pub struct DeserializedEntry {
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub pid: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
    pub level: i64,
    pub error: Option<ErrorInfo>,
    pub context: LogContext,
    pub message: String,
}

impl DeserializedEntry {
    /// The entry's level, if it is one of the defined ones
    pub fn log_level(&self) -> Option<LogLevel> {
        LogLevel::from_value(self.level)
    }
}

/// Named built-in strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SerializerKind {
    Json,
    #[default]
    Standard,
}

impl SerializerKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            SerializerKind::Json => "json",
            SerializerKind::Standard => "standard",
        }
    }

    pub fn create(&self) -> Arc<dyn Serializer> {
        match self {
            SerializerKind::Json => Arc::new(JsonSerializer::new()),
            SerializerKind::Standard => Arc::new(StandardSerializer::new()),
        }
    }
}

impl fmt::Display for SerializerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for SerializerKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(SerializerKind::Json),
            "standard" | "bunyan" => Ok(SerializerKind::Standard),
            _ => Err(LoggerError::config(
                "Serializer",
                format!("unknown serializer '{}'", s),
            )),
        }
    }
}

/// Key of the nested context object in a line
pub(crate) const CONTEXT_KEY: &str = "context";

/// Reads the level field of a decoded line, which must be an integer
pub(crate) fn level_field(format: &str, value: Option<&Value>) -> Result<i64> {
    value
        .and_then(|v| v.as_i64())
        .ok_or_else(|| LoggerError::deserialize(format, "missing or non-integer 'level'"))
}

/// Context of a decoded line: the top-level keys outside `record_keys`,
/// overridden by the keys of a nested `context` object
///
/// A `context` value that is not an object stays an ordinary field.
pub(crate) fn collect_context(mut fields: Map<String, Value>, record_keys: &[&str]) -> LogContext {
    fields.retain(|key, _| !record_keys.contains(&key.as_str()));
    let mut context = LogContext::from(fields);

    match context.remove(CONTEXT_KEY) {
        Some(Value::Object(nested)) => context.merged_with(&LogContext::from(nested)),
        Some(other) => context.with_field(CONTEXT_KEY, other),
        None => context,
    }
}
