//! Declarative configuration and environment bootstrap
//!
//! [`LoggerConfig`] is a `serde` description of a logger and its
//! destinations, typically read from a JSON document. [`from_env`] assembles
//! one from process environment variables. Both are validated when built:
//! unknown level, serializer or sink names and invalid redaction patterns fail
//! before any record is logged.

use crate::core::{
    Destination, LogContext, LogLevel, Logger, LoggerBuilder, LoggerError, Redactor, Result, SeverityRange,
    DEFAULT_LOGGER_NAME,
};
use crate::serializers::SerializerKind;
use crate::sinks::{ConsoleSink, FileSink};
use serde::Deserialize;
use std::path::PathBuf;

/// Logger name.
pub const LOGGER_NAME_ENV: &str = "LOGGER_NAME";

/// Minimum level of the console destination, by name or number.
pub const LOGGER_LEVEL_ENV: &str = "LOGGER_LEVEL";

/// Line format of the console destination: `json` or `standard`.
pub const LOGGER_FORMAT_ENV: &str = "LOGGER_FORMAT";

/// Comma-separated sensitive key fragments; `none` disables redaction.
pub const LOGGER_SENSITIVE_FRAGMENTS_ENV: &str = "LOGGER_SENSITIVE_FRAGMENTS";

/// `true`/`1` to inject process statistics into every record.
pub const LOGGER_WITH_STATS_ENV: &str = "LOGGER_WITH_STATS";

/// StatsD daemon address, e.g. `127.0.0.1:8125`.
pub const LOGGER_STATSD_ADDR_ENV: &str = "LOGGER_STATSD_ADDR";

fn default_name() -> String {
    DEFAULT_LOGGER_NAME.to_string()
}

/// Whole-logger configuration
///
/// # Example
///
/// ```
/// use rust_log_dispatch::config::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{
///     "name": "api",
///     "context": {"service": "billing"},
///     "destinations": [
///         {"severity": "info", "serializer": "standard", "sink": "stderr", "redact": {}},
///         {"severity": ["trace", "info"], "serializer": "json", "sink": "stdout"}
///     ]
/// }"#).unwrap();
///
/// let logger = config.build().unwrap();
/// assert_eq!(logger.destinations().len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub context: LogContext,

    #[serde(default)]
    pub with_stats: bool,

    /// StatsD address for `Logger::metric`
    #[serde(default)]
    pub statsd: Option<String>,

    /// Empty means the default stdout destination
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            context: LogContext::new(),
            with_stats: false,
            statsd: None,
            destinations: Vec::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))
    }

    /// Read the `LOGGER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let severity = lookup(LOGGER_LEVEL_ENV).map(|level| SeverityConfig::Level(LevelSpec::Name(level)));

        let serializer = lookup(LOGGER_FORMAT_ENV)
            .map(|format| format.parse::<SerializerKind>())
            .transpose()?
            .unwrap_or_default();

        let redact = match lookup(LOGGER_SENSITIVE_FRAGMENTS_ENV) {
            Some(value) if value.trim().eq_ignore_ascii_case("none") => None,
            Some(value) => Some(RedactConfig {
                fragments: Some(
                    value
                        .split(',')
                        .map(|f| f.trim().to_string())
                        .filter(|f| !f.is_empty())
                        .collect(),
                ),
                patterns: Vec::new(),
            }),
            None => Some(RedactConfig::default()),
        };

        let with_stats = match lookup(LOGGER_WITH_STATS_ENV) {
            Some(value) => parse_flag(LOGGER_WITH_STATS_ENV, &value)?,
            None => false,
        };

        Ok(Self {
            name: lookup(LOGGER_NAME_ENV).unwrap_or_else(default_name),
            context: LogContext::new(),
            with_stats,
            statsd: lookup(LOGGER_STATSD_ADDR_ENV),
            destinations: vec![DestinationConfig {
                name: Some("console".to_string()),
                severity,
                serializer: serializer.to_str().to_string(),
                sink: SinkConfig::Named("stdout".to_string()),
                redact,
            }],
        })
    }

    /// Validate and assemble the logger
    pub fn build(self) -> Result<Logger> {
        let mut builder = Logger::builder()
            .name(self.name)
            .context(self.context)
            .with_stats(self.with_stats);

        for destination in self.destinations {
            builder = builder.destination(destination.build()?);
        }

        if let Some(addr) = self.statsd {
            builder = with_statsd(builder, &addr)?;
        }

        Ok(builder.build())
    }
}

/// Build a logger from the `LOGGER_*` environment variables
///
/// The result has one stdout destination; see the `*_ENV` constants for the
/// variables read.
pub fn from_env() -> Result<Logger> {
    LoggerConfig::from_env()?.build()
}

#[cfg(feature = "statsd")]
fn with_statsd(builder: LoggerBuilder, addr: &str) -> Result<LoggerBuilder> {
    Ok(builder.metrics_sink(crate::sinks::StatsdSink::new(addr)?))
}

#[cfg(not(feature = "statsd"))]
fn with_statsd(_builder: LoggerBuilder, addr: &str) -> Result<LoggerBuilder> {
    Err(LoggerError::config(
        "LoggerConfig",
        format!("statsd address '{}' given but the `statsd` feature is disabled", addr),
    ))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LoggerError::config(
            "Environment",
            format!("{} must be a boolean, got '{}'", key, other),
        )),
    }
}

/// One destination
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Level floor, or a `[floor, ceiling]` pair; everything when absent
    #[serde(default)]
    pub severity: Option<SeverityConfig>,

    #[serde(default = "default_serializer")]
    pub serializer: String,

    pub sink: SinkConfig,

    /// Present (even empty) to mask sensitive values
    #[serde(default)]
    pub redact: Option<RedactConfig>,
}

fn default_serializer() -> String {
    SerializerKind::default().to_str().to_string()
}

impl DestinationConfig {
    pub fn build(self) -> Result<Destination> {
        let serializer = self.serializer.parse::<SerializerKind>()?;
        let sink_name = self.sink.describe();

        let mut builder = match self.sink {
            SinkConfig::Named(name) => match name.trim().to_lowercase().as_str() {
                "stdout" => Destination::builder(ConsoleSink::stdout()),
                "stderr" => Destination::builder(ConsoleSink::stderr()),
                _ => {
                    return Err(LoggerError::config(
                        "DestinationConfig",
                        format!("unknown sink '{}'", name),
                    ))
                }
            },
            SinkConfig::File { file } => Destination::builder(FileSink::new(file)?),
        };

        builder = builder
            .name(self.name.unwrap_or(sink_name))
            .serializer(serializer);

        if let Some(severity) = self.severity {
            builder = builder.severity(severity.resolve()?);
        }
        if let Some(redact) = self.redact {
            builder = builder.redactor(redact.build()?);
        }

        Ok(builder.build())
    }
}

/// A level given by name (`"warn"`) or number (`40`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Value(i64),
    Name(String),
}

impl LevelSpec {
    /// Numeric value; names must be defined levels, numbers may be anything
    pub fn resolve(&self) -> Result<i64> {
        match self {
            LevelSpec::Value(value) => Ok(*value),
            LevelSpec::Name(name) => Ok(i64::from(name.parse::<LogLevel>()?.value())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeverityConfig {
    Level(LevelSpec),
    Window([LevelSpec; 2]),
}

impl SeverityConfig {
    pub fn resolve(&self) -> Result<SeverityRange> {
        match self {
            SeverityConfig::Level(level) => SeverityRange::new(level.resolve()?, SeverityRange::UNBOUNDED),
            SeverityConfig::Window([floor, ceiling]) => {
                SeverityRange::new(floor.resolve()?, ceiling.resolve()?)
            }
        }
    }
}

/// `"stdout"`, `"stderr"` or `{"file": "/path/to/log"}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SinkConfig {
    Named(String),
    File { file: PathBuf },
}

impl SinkConfig {
    fn describe(&self) -> String {
        match self {
            SinkConfig::Named(name) => name.trim().to_lowercase(),
            SinkConfig::File { .. } => "file".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedactConfig {
    /// Replaces the default fragment set
    #[serde(default)]
    pub fragments: Option<Vec<String>>,

    /// Extra rules, run before the built-in ones
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    pub pattern: String,
    pub substitution: String,
}

impl RedactConfig {
    pub fn build(self) -> Result<Redactor> {
        let mut builder = Redactor::builder();
        if let Some(fragments) = self.fragments {
            builder = builder.fragments(fragments);
        }
        for rule in self.patterns {
            builder = builder.pattern(rule.pattern, rule.substitution);
        }
        builder.build()
    }
}
