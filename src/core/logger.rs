//! Logger façade: level filtering plus ownership of the writer thread

use super::{
    config::{LoggerConfig, DEFAULT_CAPACITY},
    dispatcher::{self, Dispatcher, TimeSource},
    entry::Entry,
    error::Result,
    formatter::{EntryFormatter, LogFormatter},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    writer::EntryWriter,
};
use parking_lot::RwLock;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when the logger is dropped without explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Hands out entries and owns the background writer.
///
/// # Example
///
/// ```
/// use rust_entry_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .sink(std::io::sink())
///     .build();
///
/// logger
///     .info()
///     .field("user", "alice")
///     .field("count", 3)
///     .logf(LogLevel::Info, format_args!("login {}", "ok"))
///     .unwrap();
///
/// assert!(logger.debug().is_noop());
/// ```
pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    dispatcher: Option<Dispatcher>,
    writer_handle: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger at `Info` writing logfmt lines to stdout
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Start an entry at `level`
    ///
    /// Returns [`Entry::Noop`] when the level is filtered out or the logger
    /// has been shut down.
    #[inline]
    pub fn entry(&self, level: LogLevel) -> Entry {
        match self.dispatcher {
            Some(ref dispatcher) if self.is_enabled(level) => Entry::standard(dispatcher.clone()),
            _ => Entry::noop(),
        }
    }

    #[inline]
    pub fn debug(&self) -> Entry {
        self.entry(LogLevel::Debug)
    }

    #[inline]
    pub fn info(&self) -> Entry {
        self.entry(LogLevel::Info)
    }

    #[inline]
    pub fn warn(&self) -> Entry {
        self.entry(LogLevel::Warn)
    }

    #[inline]
    pub fn err(&self) -> Entry {
        self.entry(LogLevel::Err)
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled_at(*self.min_level.read())
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Stop accepting entries and wait for the writer to drain
    ///
    /// Entries already handed out keep their own channel handle, so the writer
    /// only exits once those are logged or dropped.
    ///
    /// Returns `true` if the writer finished within `timeout`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_entry_logger::Logger;
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::builder().sink(std::io::sink()).build();
    /// logger.info().log(rust_entry_logger::LogLevel::Info, "bye").unwrap();
    /// assert!(logger.shutdown(Duration::from_secs(5)));
    /// assert!(logger.info().is_noop());
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.dispatcher.take());

        if let Some(handle) = self.writer_handle.take() {
            let start = std::time::Instant::now();

            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!("[LOGGER ERROR] Writer thread panicked during shutdown: {:?}", e);
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Writer thread did not finish within {:?}. \
                         Some entries may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        true
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.writer_handle.is_some() {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }

        let failures = self.metrics.write_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed writes (failure rate: {:.2}%)",
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing a [`Logger`]
///
/// # Example
/// ```
/// use rust_entry_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .capacity(256)
///     .formatter(LogFormatter::new(OutputFormat::Json))
///     .sink(std::io::sink())
///     .build();
/// assert!(logger.is_enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    capacity: usize,
    formatter: Box<dyn EntryFormatter>,
    sink: Box<dyn Write + Send>,
    clock: Option<TimeSource>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            capacity: DEFAULT_CAPACITY,
            formatter: Box::new(LogFormatter::default()),
            sink: Box::new(std::io::stdout()),
            clock: None,
        }
    }

    /// Builder preloaded from a configuration, which is validated first
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new()
            .min_level(config.min_level)
            .capacity(config.capacity)
            .formatter(config.formatter()))
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Maximum number of entries waiting for the writer
    ///
    /// Producers block once this many are queued. Zero makes every send a
    /// rendezvous with the writer.
    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: EntryFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replace the wall clock used to stamp entries
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: TimeSource) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the logger and start its writer thread
    pub fn build(self) -> Logger {
        let metrics = Arc::new(LoggerMetrics::new());
        let (dispatcher, receiver) =
            dispatcher::channel_with_metrics(self.capacity, Arc::clone(&metrics));
        let dispatcher = match self.clock {
            Some(clock) => dispatcher.with_clock(clock),
            None => dispatcher,
        };

        let writer = EntryWriter::new(self.formatter, self.sink, Arc::clone(&metrics));
        let writer_handle = writer.spawn(receiver);

        Logger {
            min_level: Arc::new(RwLock::new(self.min_level)),
            dispatcher: Some(dispatcher),
            writer_handle: Some(writer_handle),
            metrics,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, StandardEntry};

    fn quiet_logger(min_level: LogLevel) -> Logger {
        Logger::builder()
            .min_level(min_level)
            .sink(std::io::sink())
            .build()
    }

    #[test]
    fn test_level_filtering() {
        let logger = quiet_logger(LogLevel::Warn);

        assert!(logger.debug().is_noop());
        assert!(logger.info().is_noop());
        assert!(!logger.warn().is_noop());
        assert!(!logger.err().is_noop());
    }

    #[test]
    fn test_set_min_level() {
        let logger = quiet_logger(LogLevel::Err);
        assert!(logger.info().is_noop());

        logger.set_min_level(LogLevel::Debug);
        assert_eq!(logger.min_level(), LogLevel::Debug);
        assert!(!logger.debug().is_noop());
    }

    #[test]
    fn test_shutdown_drains_entries() {
        let mut logger = quiet_logger(LogLevel::Debug);
        for i in 0..20 {
            logger
                .info()
                .field("i", i)
                .log(LogLevel::Info, "queued")
                .unwrap();
        }

        assert!(logger.shutdown(Duration::from_secs(5)));
        assert_eq!(logger.metrics().entries_sent(), 20);
        assert_eq!(logger.metrics().entries_written(), 20);
        assert!(logger.err().is_noop());
    }

    #[test]
    fn test_shutdown_times_out_on_unsent_entry() {
        let mut logger = quiet_logger(LogLevel::Debug);
        let held = logger.info();

        assert!(!logger.shutdown(Duration::from_millis(50)));
        drop(held);
    }

    #[test]
    fn test_filtered_entry_does_not_touch_metrics() {
        let logger = quiet_logger(LogLevel::Err);
        for _ in 0..100 {
            logger.debug().field("x", 1).log(LogLevel::Debug, "hidden").unwrap();
        }
        assert_eq!(logger.metrics().entries_sent(), 0);
    }

    #[test]
    fn test_builder_from_config() {
        let config = LoggerConfig {
            min_level: LogLevel::Warn,
            capacity: 8,
            ..LoggerConfig::default()
        };
        let logger = LoggerBuilder::from_config(&config)
            .unwrap()
            .sink(std::io::sink())
            .build();

        assert_eq!(logger.min_level(), LogLevel::Warn);
        assert!(logger.info().is_noop());
    }

    #[test]
    fn test_builder_from_config_rejects_zero_capacity() {
        let config = LoggerConfig {
            capacity: 0,
            ..LoggerConfig::default()
        };
        let err = LoggerBuilder::from_config(&config).err().unwrap();

        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_standard_entry_type_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Box<StandardEntry>>();
        assert_send::<Entry>();
    }

    #[test]
    fn test_logger_is_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Logger>();
    }
}
