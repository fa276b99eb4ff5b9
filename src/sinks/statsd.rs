//! StatsD metrics sink
//!
//! Sends one UDP datagram per metric using the StatsD line protocol:
//! `name:value|type[|@rate][|#tag,tag]`, e.g. `hello:1|c` for an increment.

use crate::core::{LoggerError, Metric, MetricsSink, Result};
use std::net::{ToSocketAddrs, UdpSocket};

/// Operations understood by [`StatsdSink`] and their StatsD type codes
const OPERATIONS: &[(&str, &str)] = &[
    ("increment", "c"),
    ("decrement", "c"),
    ("gauge", "g"),
    ("timing", "ms"),
    ("histogram", "h"),
    ("set", "s"),
];

pub struct StatsdSink {
    socket: UdpSocket,
    address: String,
    prefix: Option<String>,
}

impl StatsdSink {
    /// Connect a UDP socket to the daemon at `addr`
    ///
    /// # Errors
    ///
    /// Returns error if the address does not resolve or no local socket can
    /// be bound.
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let target = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| LoggerError::config("StatsdSink", format!("cannot resolve '{}'", address)))?;

        let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.connect(target)?;

        Ok(Self {
            socket,
            address,
            prefix: None,
        })
    }

    /// Prepend `prefix.` to every stat name
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Render the datagram for `operation`, or `None` if it is unknown
    pub fn format_packet(&self, operation: &str, metric: &Metric) -> Option<String> {
        let type_code = type_code(operation)?;
        let value = if operation == "decrement" {
            -metric.value
        } else {
            metric.value
        };

        let mut packet = match self.prefix {
            Some(ref prefix) => format!("{}.{}:{}|{}", prefix, metric.name, value, type_code),
            None => format!("{}:{}|{}", metric.name, value, type_code),
        };

        if let Some(rate) = metric.sample_rate.filter(|rate| *rate < 1.0) {
            packet.push_str(&format!("|@{}", rate));
        }
        if !metric.tags.is_empty() {
            packet.push_str("|#");
            packet.push_str(&metric.tags.join(","));
        }

        Some(packet)
    }
}

fn type_code(operation: &str) -> Option<&'static str> {
    OPERATIONS
        .iter()
        .find(|(name, _)| *name == operation)
        .map(|(_, code)| *code)
}

/// Whether a metric with `sample_rate` should be sent this time
fn sampled_in(sample_rate: Option<f64>) -> bool {
    match sample_rate {
        Some(rate) if rate < 1.0 => rand::random::<f64>() < rate,
        _ => true,
    }
}

impl MetricsSink for StatsdSink {
    fn supports(&self, operation: &str) -> bool {
        type_code(operation).is_some()
    }

    fn invoke(&self, operation: &str, metric: &Metric) -> Result<()> {
        let packet = self
            .format_packet(operation, metric)
            .ok_or_else(|| LoggerError::unknown_metric(operation, self.name()))?;

        if !sampled_in(metric.sample_rate) {
            return Ok(());
        }

        self.socket.send(packet.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "statsd"
    }
}
