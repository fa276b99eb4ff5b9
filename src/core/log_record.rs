//! Log record structure

use super::error_info::ErrorInfo;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::timestamp;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use std::sync::OnceLock;

static HOSTNAME: OnceLock<String> = OnceLock::new();

/// Host name of the running machine, resolved once
pub fn current_hostname() -> &'static str {
    HOSTNAME.get_or_init(|| {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string())
    })
}

/// One logged event
///
/// Fields are fixed at construction; destinations only ever see `&LogRecord`.
/// The serde form is the plain field dump used by the JSON serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    name: String,
    hostname: String,
    pid: u32,
    #[serde(serialize_with = "timestamp::iso8601::serialize")]
    timestamp: DateTime<Utc>,
    level: LogLevel,
    error: Option<ErrorInfo>,
    context: LogContext,
    message: String,
}

impl LogRecord {
    /// Capture host, pid and wall-clock time now
    pub fn new(
        name: impl Into<String>,
        level: LogLevel,
        error: Option<ErrorInfo>,
        context: LogContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hostname: current_hostname().to_string(),
            pid: std::process::id(),
            timestamp: Utc::now().trunc_subsecs(3),
            level,
            error,
            context,
            message: message.into(),
        }
    }

    /// Override the capture time, for records rebuilt outside the dispatcher
    ///
    /// Timestamps are kept to millisecond precision, the resolution both
    /// wire formats carry.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(3);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
