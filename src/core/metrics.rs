//! Dispatch metrics for observability
//!
//! Counters shared between producers (via the dispatcher) and the background
//! writer, useful for spotting backpressure and sink failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the entry pipeline
///
/// # Example
///
/// ```
/// use rust_entry_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_sent();
/// metrics.record_written();
///
/// assert_eq!(metrics.entries_sent(), 1);
/// assert_eq!(metrics.pending(), 0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries successfully handed to the channel
    entries_sent: AtomicU64,

    /// Entries formatted into the sink without error
    entries_written: AtomicU64,

    /// Entries whose formatting failed or panicked
    write_failures: AtomicU64,

    /// Number of sends that found the channel full and had to block
    block_events: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_sent: AtomicU64::new(0),
            entries_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_sent(&self) -> u64 {
        self.entries_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    /// Entries sent but not yet processed by the writer
    pub fn pending(&self) -> u64 {
        self.entries_sent()
            .saturating_sub(self.entries_written() + self.write_failures())
    }

    /// Record a successful send, returning the previous count
    #[inline]
    pub fn record_sent(&self) -> u64 {
        self.entries_sent.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.entries_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of processed entries that failed to format, as a percentage
    ///
    /// Returns 0.0 if nothing has been processed.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.entries_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.entries_sent.store(0, Ordering::Relaxed);
        self.entries_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            entries_sent: AtomicU64::new(self.entries_sent()),
            entries_written: AtomicU64::new(self.entries_written()),
            write_failures: AtomicU64::new(self.write_failures()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}
