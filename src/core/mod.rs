//! Core entry types, dispatch channel and writer

pub mod config;
pub mod dispatcher;
pub mod entry;
pub mod error;
pub mod field;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod standard_entry;
pub mod timestamp;
pub mod writer;

pub use config::{LoggerConfig, DEFAULT_CAPACITY};
pub use dispatcher::{Dispatcher, EntryReceiver, TimeSource};
pub use entry::Entry;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldEnum, FieldValue};
pub use formatter::{EntryFormatter, FormatterConfig, LogFormatter, OutputFormat};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use standard_entry::StandardEntry;
pub use timestamp::TimestampFormat;
pub use writer::EntryWriter;
