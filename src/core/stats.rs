//! Process statistics injected into record contexts
//!
//! The provider is a plain closure so applications (and tests) can swap in
//! their own snapshot source.

use serde_json::{json, Value};
use std::sync::Arc;

/// Produces the value stored under the `stats` context key
pub type StatsProvider = Arc<dyn Fn() -> Value + Send + Sync>;

/// Context key holding the statistics snapshot
pub const STATS_KEY: &str = "stats";

pub fn default_provider() -> StatsProvider {
    Arc::new(system_stats)
}

/// Memory and load snapshot of the running host
///
/// Shape: `{"memory":{"rss":..},"freemem":..,"totalmem":..,"loadavg":[..]}`.
/// Hosts without `/proc` get an empty object.
#[cfg(target_os = "linux")]
pub fn system_stats() -> Value {
    use std::fs;

    let status = fs::read_to_string("/proc/self/status").unwrap_or_default();
    let meminfo = fs::read_to_string("/proc/meminfo").unwrap_or_default();
    let loadavg = fs::read_to_string("/proc/loadavg")
        .ok()
        .map(|raw| parse_loadavg(&raw))
        .unwrap_or_default();

    json!({
        "memory": { "rss": parse_kb_field(&status, "VmRSS:") },
        "freemem": parse_kb_field(&meminfo, "MemFree:"),
        "totalmem": parse_kb_field(&meminfo, "MemTotal:"),
        "loadavg": loadavg,
    })
}

#[cfg(not(target_os = "linux"))]
pub fn system_stats() -> Value {
    json!({})
}

/// Byte value of a `Key:   1234 kB` line, as found in `/proc/meminfo`
/// and `/proc/self/status`
fn parse_kb_field(raw: &str, key: &str) -> Option<u64> {
    raw.lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

fn parse_loadavg(raw: &str) -> Vec<f64> {
    raw.split_whitespace()
        .take(3)
        .filter_map(|v| v.parse::<f64>().ok())
        .collect()
}
