//! Plain JSON serializer
//!
//! Example line:
//! `{"name":"api","hostname":"web-1","pid":42,"timestamp":"2025-01-08T10:30:45.123Z","level":30,"error":null,"context":{"a":1},"message":"hi"}`

use super::{collect_context, level_field, DeserializedEntry, Serializer};
use crate::core::timestamp::parse_iso8601;
use crate::core::{ErrorInfo, LogRecord, LoggerError, Result, ERROR_KEY};
use serde_json::Value;

const FORMAT: &str = "json";

/// Record fields of either format, never read back as context
const RECORD_KEYS: [&str; 10] = [
    "name", "hostname", "pid", "timestamp", "time", "level", "error", "message", "msg", "v",
];

/// Direct field dump of the record, field names unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, record: &LogRecord) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }

    fn deserialize(&self, line: &str) -> Result<DeserializedEntry> {
        let value: Value = serde_json::from_str(line.trim_end())?;
        let Value::Object(mut fields) = value else {
            return Err(LoggerError::deserialize(FORMAT, "line is not a JSON object"));
        };

        let level = level_field(FORMAT, fields.get("level"))?;

        // `msg` and `err` are accepted for lines in the standard format.
        let message = fields
            .remove("message")
            .or_else(|| fields.remove("msg"))
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let error = fields
            .get("error")
            .and_then(ErrorInfo::from_json_value)
            .or_else(|| fields.get(ERROR_KEY).and_then(ErrorInfo::from_json_value));

        let name = string_field(&fields, "name");
        let hostname = string_field(&fields, "hostname");
        let pid = fields
            .get("pid")
            .and_then(Value::as_u64)
            .and_then(|pid| u32::try_from(pid).ok());
        let timestamp = fields
            .get("timestamp")
            .or_else(|| fields.get("time"))
            .and_then(Value::as_str)
            .and_then(parse_iso8601);

        Ok(DeserializedEntry {
            name,
            hostname,
            pid,
            timestamp,
            level,
            error,
            context: collect_context(fields, &RECORD_KEYS),
            message,
        })
    }

    fn name(&self) -> &str {
        FORMAT
    }
}

fn string_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}
