//! Sink and metrics sink implementations

pub mod console;
pub mod file;
pub mod memory;
#[cfg(feature = "statsd")]
pub mod statsd;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use memory::MemorySink;
#[cfg(feature = "statsd")]
pub use statsd::StatsdSink;

pub use crate::core::{MetricsSink, Sink};
