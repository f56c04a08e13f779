//! Allocating log entry that accumulates fields and is sent to the writer

use super::{
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    field::{Field, FieldValue},
    formatter::{EntryFormatter, LogFormatter},
    log_level::LogLevel,
};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write as _};
use std::io;

/// A live log entry.
///
/// Created boxed, filled with fields by the producer, then moved into the
/// dispatch channel by exactly one call to [`log`](Self::log) or
/// [`logf`](Self::logf). Both take the box by value, so the producer cannot
/// touch the entry after it has been sent:
///
/// ```compile_fail
/// use rust_entry_logger::{dispatcher, LogLevel, StandardEntry};
///
/// let (dispatcher, _receiver) = dispatcher::channel(8);
/// let entry = StandardEntry::new(dispatcher);
/// entry.log(LogLevel::Info, "first").unwrap();
/// entry.log(LogLevel::Info, "second").unwrap();
/// ```
///
/// Dropping the box releases every field, the message and the entry itself.
pub struct StandardEntry {
    level: LogLevel,
    fields: Vec<Field>,
    timestamp: DateTime<Utc>,
    message: String,
    dispatcher: Option<Dispatcher>,
}

impl StandardEntry {
    /// Allocate an empty entry bound to `dispatcher`
    ///
    /// The level starts at `Debug` and the timestamp at the Unix epoch; both
    /// are only meaningful after the terminal call.
    pub fn new(dispatcher: Dispatcher) -> Box<Self> {
        Box::new(Self {
            level: LogLevel::Debug,
            fields: Vec::new(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            message: String::new(),
            dispatcher: Some(dispatcher),
        })
    }

    /// Append a field; fields keep their attachment order
    #[must_use]
    pub fn field(mut self: Box<Self>, name: &str, value: impl Into<FieldValue>) -> Box<Self> {
        self.fields.push(Field::new(name, value));
        self
    }

    /// Finish the entry with `message` and send it to the writer
    ///
    /// Blocks while the channel is full.
    pub fn log(mut self: Box<Self>, level: LogLevel, message: &str) -> Result<()> {
        let dispatcher = self.dispatcher.take().ok_or(LoggerError::AlreadyDispatched)?;
        self.message.push_str(message);
        self.finalize_and_send(dispatcher, level)
    }

    /// Like [`log`](Self::log), formatting `args` into the message buffer
    pub fn logf(mut self: Box<Self>, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        let dispatcher = self.dispatcher.take().ok_or(LoggerError::AlreadyDispatched)?;
        self.message
            .write_fmt(args)
            .map_err(|_| LoggerError::formatter("message", "a Display implementation returned an error"))?;
        self.finalize_and_send(dispatcher, level)
    }

    fn finalize_and_send(mut self: Box<Self>, dispatcher: Dispatcher, level: LogLevel) -> Result<()> {
        self.timestamp = dispatcher.now();
        self.level = level;
        dispatcher.send(self)
    }

    /// Write this entry with the default logfmt formatter
    pub fn format(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        LogFormatter::default().format_entry(self, sink)
    }

    /// Write this entry with a caller-supplied formatter
    pub fn custom_format(
        &self,
        formatter: &dyn EntryFormatter,
        sink: &mut dyn io::Write,
    ) -> io::Result<()> {
        formatter.format_entry(self, sink)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether the terminal call has already happened
    pub fn is_dispatched(&self) -> bool {
        self.dispatcher.is_none()
    }
}

impl fmt::Debug for StandardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardEntry")
            .field("level", &self.level)
            .field("timestamp", &self.timestamp)
            .field("message", &self.message)
            .field("fields", &self.fields)
            .field("dispatched", &self.is_dispatched())
            .finish()
    }
}
