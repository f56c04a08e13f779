//! # Rust Entry Logger
//!
//! Structured, level-filtered log entries that are formatted off the calling
//! thread.
//!
//! - **Fluent entries**: chain typed fields, finish with one `log`/`logf` call
//! - **Free when filtered**: disabled levels get a no-op entry with no allocation
//! - **Asynchronous**: finished entries move through a bounded channel to a
//!   background writer; a full channel blocks the producer
//! - **Pluggable output**: logfmt by default, JSON, text, or any closure

pub mod core;
pub mod macros;

pub use crate::core::dispatcher;

pub mod prelude {
    pub use crate::core::{
        Entry, EntryFormatter, Field, FieldEnum, FieldValue, FormatterConfig, LogFormatter,
        LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat,
        Result, StandardEntry, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use crate::core::{
    Dispatcher, Entry, EntryFormatter, EntryReceiver, EntryWriter, Field, FieldEnum, FieldValue,
    FormatterConfig, LogFormatter, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, OutputFormat, Result, StandardEntry, TimeSource, TimestampFormat,
    DEFAULT_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
