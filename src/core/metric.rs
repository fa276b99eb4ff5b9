//! Metric events and the metrics sink contract
//!
//! The logger builds a [`Metric`] for every `Logger::metric` call and hands it
//! to the configured [`MetricsSink`] under an operation name such as
//! `increment` or `timing`.

use super::error::Result;
use super::log_record::current_hostname;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One metric emission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Stat name; the emitting logger's name
    pub name: String,
    pub hostname: String,
    pub pid: u32,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            hostname: current_hostname().to_string(),
            pid: std::process::id(),
            timestamp: Utc::now(),
            value,
            sample_rate: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: Option<f64>) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Receiver of counter/gauge/timer operations
pub trait MetricsSink: Send + Sync {
    /// Whether `operation` names something this sink can do
    fn supports(&self, operation: &str) -> bool;

    /// Perform `operation` with `metric`; only called for supported operations
    fn invoke(&self, operation: &str, metric: &Metric) -> Result<()>;

    fn name(&self) -> &str;
}
