//! Logging macros for ergonomic log message formatting.
//!
//! These macros build a [`LogCall`](crate::LogCall) whose message is produced
//! by `format!`, optionally carrying an error and a context, and hand it to
//! the logger's leveled API.
//!
//! # Examples
//!
//! ```
//! use rust_log_dispatch::prelude::*;
//! use rust_log_dispatch::{error, info};
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With a context
//! let ctx = LogContext::new().with_field("user_id", 42);
//! info!(logger, context = ctx, "User {} logged in", 42);
//!
//! // With an error
//! let err = ErrorInfo::new("TimeoutError", "upstream timed out");
//! error!(logger, error = err, "Request failed");
//! ```

/// Log at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_log_dispatch::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_dispatch::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Warn, context = LogContext::new().with_field("code", 500), "Code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, error = $err:expr, context = $ctx:expr, $($arg:tt)+) => {
        $logger.log_call(
            $level,
            $crate::LogCall::new(format!($($arg)+)).error($err).context($ctx),
        )
    };
    ($logger:expr, $level:expr, error = $err:expr, $($arg:tt)+) => {
        $logger.log_call($level, $crate::LogCall::new(format!($($arg)+)).error($err))
    };
    ($logger:expr, $level:expr, context = $ctx:expr, $($arg:tt)+) => {
        $logger.log_call($level, $crate::LogCall::new(format!($($arg)+)).context($ctx))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_call($level, $crate::LogCall::new(format!($($arg)+)))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_dispatch::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_dispatch::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_dispatch::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_dispatch::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// Without `error = ..` a synthetic error is captured at the call site.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
