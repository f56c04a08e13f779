//! Background consumer that formats dispatched entries into a sink

use super::{
    dispatcher::EntryReceiver,
    error::LoggerError,
    formatter::EntryFormatter,
    metrics::LoggerMetrics,
    standard_entry::StandardEntry,
};
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const BATCH_SIZE: usize = 50;
const BATCH_TIMEOUT: Duration = Duration::from_millis(10);

/// Single consumer of the dispatch channel.
///
/// Owns every entry it receives: each one is formatted once and then dropped.
pub struct EntryWriter {
    formatter: Box<dyn EntryFormatter>,
    sink: Box<dyn Write + Send>,
    metrics: Arc<LoggerMetrics>,
}

impl EntryWriter {
    pub fn new(
        formatter: Box<dyn EntryFormatter>,
        sink: Box<dyn Write + Send>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            formatter,
            sink,
            metrics,
        }
    }

    /// Run the writer on its own thread until the channel disconnects
    pub fn spawn(self, receiver: EntryReceiver) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run(receiver))
    }

    /// Drain `receiver` on the current thread until it disconnects
    pub fn run(mut self, receiver: EntryReceiver) {
        let mut batch = Vec::with_capacity(BATCH_SIZE);

        loop {
            match receiver.recv() {
                Ok(entry) => batch.push(entry),
                Err(_) => break,
            }

            Self::fill_batch(&receiver, &mut batch);
            if batch.len() < BATCH_SIZE {
                // Small batch - give producers a moment to catch up
                thread::sleep(BATCH_TIMEOUT);
                Self::fill_batch(&receiver, &mut batch);
            }

            self.write_batch(&batch);
            // Entries are released here, after formatting
            batch.clear();
        }

        if let Err(e) = self.sink.flush() {
            eprintln!(
                "[LOGGER ERROR] {}",
                LoggerError::io_operation("flushing sink", "final flush failed", e)
            );
        }
    }

    fn fill_batch(receiver: &EntryReceiver, batch: &mut Vec<Box<StandardEntry>>) {
        while batch.len() < BATCH_SIZE {
            match receiver.try_recv() {
                Ok(entry) => batch.push(entry),
                Err(_) => break,
            }
        }
    }

    /// Format every entry, isolating formatter errors and panics
    fn write_batch(&mut self, batch: &[Box<StandardEntry>]) {
        for entry in batch {
            let formatter = &self.formatter;
            let sink = &mut self.sink;
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                formatter.format_entry(entry, &mut **sink)
            }));

            match result {
                Ok(Ok(())) => {
                    self.metrics.record_written();
                }
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] {}",
                        LoggerError::io_operation("formatting entry", entry.message(), e)
                    );
                    self.metrics.record_write_failure();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Formatter panicked: {}. Writer continues.",
                        panic_msg
                    );
                    self.metrics.record_write_failure();
                }
            }
        }

        if let Err(e) = self.sink.flush() {
            eprintln!(
                "[LOGGER ERROR] {}",
                LoggerError::io_operation("flushing sink", "batch flush failed", e)
            );
        }
    }
}
