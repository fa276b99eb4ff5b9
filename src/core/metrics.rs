//! Delivery counters for logger observability
//!
//! Tracks how records fared at the destination boundary: written, filtered
//! out, or lost to a failing destination, plus replay outcomes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by a logger and its children
///
/// # Example
///
/// ```
/// use rust_log_dispatch::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.total_written(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines handed to a sink successfully
    total_written: AtomicU64,

    /// Records a destination's window or filter turned away
    filtered_count: AtomicU64,

    /// Writes lost to serializer or sink errors and panics
    failed_count: AtomicU64,

    /// Lines re-logged through `replay`
    replayed_count: AtomicU64,

    /// Lines a destination rejected during `replay`
    replay_rejected_count: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_written: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
            replayed_count: AtomicU64::new(0),
            replay_rejected_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn replayed_count(&self) -> u64 {
        self.replayed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn replay_rejected_count(&self) -> u64 {
        self.replay_rejected_count.load(Ordering::Relaxed)
    }

    /// Record a written line, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_replayed(&self) -> u64 {
        self.replayed_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_replay_rejected(&self) -> u64 {
        self.replay_rejected_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempted writes that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let total = self.total_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_written.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.failed_count.store(0, Ordering::Relaxed);
        self.replayed_count.store(0, Ordering::Relaxed);
        self.replay_rejected_count.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_written: AtomicU64::new(self.total_written()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            failed_count: AtomicU64::new(self.failed_count()),
            replayed_count: AtomicU64::new(self.replayed_count()),
            replay_rejected_count: AtomicU64::new(self.replay_rejected_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_written(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.failed_count(), 0);
        assert_eq!(metrics.replayed_count(), 0);
        assert_eq!(metrics.replay_rejected_count(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_failed(), 0);
        assert_eq!(metrics.failed_count(), 1);
        metrics.record_failed();
        assert_eq!(metrics.failed_count(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_written();
        }
        for _ in 0..10 {
            metrics.record_failed();
        }
        // Filtered records are not attempts.
        metrics.record_filtered();

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        metrics.record_replayed();
        metrics.record_replay_rejected();

        metrics.reset();

        assert_eq!(metrics.total_written(), 0);
        assert_eq!(metrics.replayed_count(), 0);
        assert_eq!(metrics.replay_rejected_count(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();

        let snapshot = metrics.clone();
        metrics.record_written();

        assert_eq!(metrics.total_written(), 2);
        assert_eq!(snapshot.total_written(), 1);
    }
}
