//! Standard log line serializer
//!
//! One JSON object per line, context keys flattened at the top level:
//!
//! ```text
//! {"name":"api","hostname":"web-1","pid":42,"time":"2025-01-08T10:30:45.123Z","level":30,
//!  "msg":"hi","v":0,"err":{"name":"Error","message":"x","stack":"..."},"x":1}
//! ```
//!
//! Context keys that would collide with a record field (`name`, `hostname`,
//! `pid`, `time`, `level`, `msg`, `v`, `err` or `context`) are written under a
//! nested `context` object instead, and merged back when the line is read.

use super::{collect_context, level_field, DeserializedEntry, Serializer, CONTEXT_KEY};
use crate::core::timestamp::{format_iso8601, parse_iso8601};
use crate::core::{ErrorInfo, LogRecord, LoggerError, Result, ERROR_KEY};
use serde_json::{Map, Value};

const FORMAT: &str = "standard";

/// Format version written in the `v` field
pub const FORMAT_VERSION: i64 = 0;

const RECORD_KEYS: [&str; 7] = ["name", "hostname", "pid", "time", "level", "msg", "v"];

fn is_reserved(key: &str) -> bool {
    RECORD_KEYS.contains(&key) || key == ERROR_KEY || key == CONTEXT_KEY
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSerializer;

impl StandardSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for StandardSerializer {
    fn serialize(&self, record: &LogRecord) -> Result<String> {
        let error = record.error().map(ErrorInfo::to_json_value);
        let mut line = Map::new();
        let mut nested = Map::new();

        for (key, value) in record.context().fields() {
            if !is_reserved(key) {
                line.insert(key.clone(), value.clone());
            } else if key != ERROR_KEY || error.as_ref() != Some(value) {
                nested.insert(key.clone(), value.clone());
            }
        }

        line.insert("name".to_string(), Value::from(record.name()));
        line.insert("hostname".to_string(), Value::from(record.hostname()));
        line.insert("pid".to_string(), Value::from(record.pid()));
        line.insert(
            "time".to_string(),
            Value::String(format_iso8601(&record.timestamp())),
        );
        line.insert("level".to_string(), Value::from(record.level().value()));
        line.insert("msg".to_string(), Value::from(record.message()));
        line.insert("v".to_string(), Value::from(FORMAT_VERSION));

        if let Some(error) = error {
            line.insert(ERROR_KEY.to_string(), error);
        }
        if !nested.is_empty() {
            line.insert(CONTEXT_KEY.to_string(), Value::Object(nested));
        }

        Ok(serde_json::to_string(&Value::Object(line))?)
    }

    fn deserialize(&self, line: &str) -> Result<DeserializedEntry> {
        let value: Value = serde_json::from_str(line.trim_end())?;
        let Value::Object(mut fields) = value else {
            return Err(LoggerError::deserialize(FORMAT, "line is not a JSON object"));
        };

        let level = level_field(FORMAT, fields.get("level"))?;

        let name = take_string(&mut fields, "name");
        let hostname = take_string(&mut fields, "hostname");
        let pid = fields
            .get("pid")
            .and_then(Value::as_u64)
            .and_then(|pid| u32::try_from(pid).ok());
        let timestamp = fields
            .get("time")
            .and_then(Value::as_str)
            .and_then(parse_iso8601);
        let message = take_string(&mut fields, "msg").unwrap_or_default();

        // `err` stays in the context as well, mirroring how the call site stored it.
        let error = fields.get(ERROR_KEY).and_then(ErrorInfo::from_json_value);

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

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}
