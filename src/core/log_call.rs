//! Call descriptor for the leveled logging methods
//!
//! A `LogCall` is what a call site hands to `Logger::error`, `Logger::info`
//! and friends: an optional error, an optional context, a message template
//! and the arguments its placeholders resolve against.

use super::error_info::ErrorInfo;
use super::format::format_message;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use serde_json::Value;
use std::backtrace::Backtrace;

/// Context key the call's error is stored under
pub const ERROR_KEY: &str = "err";

/// Context key holding the captured stack of `trace` calls
pub const TRACE_KEY: &str = "trace";

#[derive(Debug, Clone, Default)]
pub struct LogCall {
    error: Option<ErrorInfo>,
    context: Option<LogContext>,
    template: String,
    args: Vec<Value>,
}

impl LogCall {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Attach an error; only `fatal`, `error` and `warn` consume it
    #[must_use]
    pub fn error(mut self, error: impl Into<ErrorInfo>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Add one argument for the template's placeholders
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve the call into the parts a record is built from
    pub(crate) fn normalize(self, level: LogLevel) -> NormalizedCall {
        let message = format_message(&self.template, &self.args);

        let error = match level {
            LogLevel::Fatal | LogLevel::Error => {
                Some(self.error.unwrap_or_else(|| ErrorInfo::synthetic(message.clone())))
            }
            LogLevel::Warn => self.error,
            _ => None,
        };

        // Always a fresh map: the caller's context is copied, never written to.
        let mut context = self.context.unwrap_or_default();
        if let Some(ref err) = error {
            context.add_field(ERROR_KEY, err.to_json_value());
        }

        if level == LogLevel::Trace {
            context.add_field(TRACE_KEY, capture_trace());
        }

        NormalizedCall {
            error,
            context,
            message,
        }
    }
}

impl From<&str> for LogCall {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for LogCall {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

impl From<(LogContext, &str)> for LogCall {
    fn from((context, template): (LogContext, &str)) -> Self {
        Self::new(template).context(context)
    }
}

impl From<(ErrorInfo, LogContext, &str)> for LogCall {
    fn from((error, context, template): (ErrorInfo, LogContext, &str)) -> Self {
        Self::new(template).context(context).error(error)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NormalizedCall {
    pub(crate) error: Option<ErrorInfo>,
    pub(crate) context: LogContext,
    pub(crate) message: String,
}

/// Current call stack as one string per frame line, without this crate's
/// own frames or the backtrace machinery
fn capture_trace() -> Vec<String> {
    let backtrace = Backtrace::force_capture().to_string();
    let mut frames = Vec::new();
    let mut skipping = false;

    for line in backtrace.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with("at ") {
            if !skipping {
                frames.push(trimmed.to_string());
            }
            continue;
        }

        skipping = is_internal_frame(trimmed);
        if !skipping {
            frames.push(trimmed.to_string());
        }
    }

    frames
}

fn is_internal_frame(frame: &str) -> bool {
    frame.contains("rust_log_dispatch::core::")
        || frame.contains("std::backtrace")
        || frame.contains("std::backtrace_rs")
}
