//! Sink trait for log output targets

use super::error::Result;

/// Receives fully serialized lines, newline included
pub trait Sink: Send {
    fn write(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
