//! Fluent entry handle that is free when its level is filtered out
//!
//! A logger hands out [`Entry::Standard`] when the level is enabled and
//! [`Entry::Noop`] otherwise. Call sites are identical for both:
//!
//! ```
//! use rust_entry_logger::{dispatcher, Entry, LogLevel};
//!
//! let (dispatcher, receiver) = dispatcher::channel(8);
//!
//! for entry in [Entry::standard(dispatcher), Entry::noop()] {
//!     entry
//!         .field("user", "alice")
//!         .field("count", 3)
//!         .logf(LogLevel::Info, format_args!("login {}", "ok"))
//!         .unwrap();
//! }
//!
//! assert_eq!(receiver.len(), 1);
//! ```

use super::{
    dispatcher::Dispatcher,
    error::Result,
    field::FieldValue,
    formatter::EntryFormatter,
    log_level::LogLevel,
    standard_entry::StandardEntry,
};
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Entry {
    /// Live entry that will be sent to the writer
    Standard(Box<StandardEntry>),
    /// Inert stand-in; every call does nothing
    Noop,
}

impl Entry {
    pub fn standard(dispatcher: Dispatcher) -> Self {
        Entry::Standard(StandardEntry::new(dispatcher))
    }

    #[inline]
    pub const fn noop() -> Self {
        Entry::Noop
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        matches!(self, Entry::Noop)
    }

    /// Attach a field; on `Noop` the value is never converted
    #[inline]
    #[must_use]
    pub fn field(self, name: &str, value: impl Into<FieldValue>) -> Self {
        match self {
            Entry::Standard(entry) => Entry::Standard(entry.field(name, value)),
            Entry::Noop => Entry::Noop,
        }
    }

    #[inline]
    pub fn log(self, level: LogLevel, message: &str) -> Result<()> {
        match self {
            Entry::Standard(entry) => entry.log(level, message),
            Entry::Noop => Ok(()),
        }
    }

    #[inline]
    pub fn logf(self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        match self {
            Entry::Standard(entry) => entry.logf(level, args),
            Entry::Noop => Ok(()),
        }
    }

    pub fn format(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        match self {
            Entry::Standard(entry) => entry.format(sink),
            Entry::Noop => Ok(()),
        }
    }

    pub fn custom_format(
        &self,
        formatter: &dyn EntryFormatter,
        sink: &mut dyn io::Write,
    ) -> io::Result<()> {
        match self {
            Entry::Standard(entry) => entry.custom_format(formatter, sink),
            Entry::Noop => Ok(()),
        }
    }
}
