//! Logging macros built on `format_args!`.
//!
//! The message is formatted straight into the entry's buffer, and not at all
//! when the level is filtered out.
//!
//! # Examples
//!
//! ```
//! use rust_entry_logger::prelude::*;
//! use rust_entry_logger::{info, logf};
//!
//! let logger = Logger::builder().sink(std::io::sink()).build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port).unwrap();
//!
//! logf!(logger.warn().field("port", port), LogLevel::Warn, "port {} is privileged", port).unwrap();
//! ```

/// Finish an entry with a formatted message.
///
/// # Examples
///
/// ```
/// # use rust_entry_logger::prelude::*;
/// use rust_entry_logger::logf;
/// let (dispatcher, receiver) = rust_entry_logger::dispatcher::channel(1);
/// logf!(Entry::standard(dispatcher), LogLevel::Err, "code {}", 500).unwrap();
/// assert_eq!(receiver.recv().unwrap().message(), "code 500");
/// ```
#[macro_export]
macro_rules! logf {
    ($entry:expr, $level:expr, $($arg:tt)+) => {
        $entry.logf($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message through a logger.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger.entry($crate::LogLevel::Debug), $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message through a logger.
///
/// # Examples
///
/// ```
/// # use rust_entry_logger::prelude::*;
/// # let logger = Logger::builder().sink(std::io::sink()).build();
/// use rust_entry_logger::info;
/// info!(logger, "user {} logged in", 42).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger.entry($crate::LogLevel::Info), $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warn-level message through a logger.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger.entry($crate::LogLevel::Warn), $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an err-level message through a logger.
#[macro_export]
macro_rules! err {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger.entry($crate::LogLevel::Err), $crate::LogLevel::Err, $($arg)+)
    };
}
