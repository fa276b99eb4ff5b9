//! Error types for the logging core
//!
//! Only configuration-time operations return these errors to callers.
//! Failures on the logging path are contained at the destination boundary.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unrecognized severity name or number
    #[error("Invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Redaction pattern that failed to compile
    #[error("Invalid redaction pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Metric operation the configured metrics sink does not provide
    #[error("Unknown metric operation '{operation}' for sink '{sink}'")]
    UnknownMetricOperation { operation: String, sink: String },

    /// Wire line that could not be turned back into an entry
    #[error("Cannot deserialize {format} line: {message}")]
    Deserialize { format: String, message: String },

    /// Sink write failure
    #[error("Sink error: {0}")]
    SinkError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an unknown metric operation error
    pub fn unknown_metric(operation: impl Into<String>, sink: impl Into<String>) -> Self {
        LoggerError::UnknownMetricOperation {
            operation: operation.into(),
            sink: sink.into(),
        }
    }

    /// Create a deserialization error
    pub fn deserialize(format: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Deserialize {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error is raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidLevel { .. }
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::InvalidPattern { .. }
                | LoggerError::UnknownMetricOperation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("verbose");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::config("Destination", "floor above ceiling");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::unknown_metric("explode", "statsd");
        assert!(matches!(err, LoggerError::UnknownMetricOperation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("verbose");
        assert_eq!(err.to_string(), "Invalid log level: 'verbose'");

        let err = LoggerError::config("Destination", "floor above ceiling");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Destination: floor above ceiling"
        );

        let err = LoggerError::deserialize("standard", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Cannot deserialize standard line: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = LoggerError::pattern("(unclosed", source);

        assert!(err.to_string().contains("(unclosed"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.is_configuration());
    }

    #[test]
    fn test_runtime_errors_are_not_configuration() {
        assert!(!LoggerError::sink("disk full").is_configuration());
        assert!(!LoggerError::other("boom").is_configuration());
    }
}
