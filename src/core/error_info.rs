//! Error-like value carried by records

use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::fmt;

/// Flattened error: a name, a message and a textual stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: String,
}

impl ErrorInfo {
    /// Create an error and capture the current stack
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = format!("{}: {}\n{}", name, message, Backtrace::force_capture());
        Self {
            name,
            message,
            stack,
        }
    }

    /// Rebuild an error from already-captured parts, e.g. when reading a line
    pub fn from_parts(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: stack.into(),
        }
    }

    /// Error synthesized at a fatal/error call site that supplied none
    pub fn synthetic(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Convert an application error, keeping its source chain in the stack
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut info = Self::new("Error", error.to_string());
        let mut source = error.source();
        while let Some(cause) = source {
            info.stack.push_str("\nCaused by: ");
            info.stack.push_str(&cause.to_string());
            source = cause.source();
        }
        info
    }

    /// JSON object form used for the `err` context key
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "message": self.message,
            "stack": self.stack,
        })
    }

    /// Parse the JSON object form; anything else is not an error
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object.get("name")?.as_str()?;
        let message = object.get("message").and_then(|v| v.as_str()).unwrap_or_default();
        let stack = object.get("stack").and_then(|v| v.as_str()).unwrap_or_default();
        Some(Self::from_parts(name, message, stack))
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for ErrorInfo {}

impl From<std::io::Error> for ErrorInfo {
    fn from(error: std::io::Error) -> Self {
        Self::from_error(&error)
    }
}
