//! Producer side of the entry hand-off channel
//!
//! Entries travel as `Box<StandardEntry>` through a bounded crossbeam channel.
//! The channel is one FIFO queue, so the writer sees entries in the order
//! their sends completed, and each producer's entries stay in program order.

use super::{
    error::{LoggerError, Result},
    metrics::LoggerMetrics,
    standard_entry::StandardEntry,
};
use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

/// Wall-clock provider used to stamp entries at their terminal call
pub type TimeSource = fn() -> DateTime<Utc>;

/// Receiving half handed to the writer
pub type EntryReceiver = Receiver<Box<StandardEntry>>;

/// Cloneable handle through which finished entries are sent.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Dispatcher {
    sender: Sender<Box<StandardEntry>>,
    metrics: Arc<LoggerMetrics>,
    clock: TimeSource,
}

/// Create a bounded dispatch channel holding at most `capacity` entries
pub fn channel(capacity: usize) -> (Dispatcher, EntryReceiver) {
    channel_with_metrics(capacity, Arc::new(LoggerMetrics::new()))
}

/// Create a bounded dispatch channel reporting into existing metrics
pub fn channel_with_metrics(
    capacity: usize,
    metrics: Arc<LoggerMetrics>,
) -> (Dispatcher, EntryReceiver) {
    let (sender, receiver) = bounded(capacity);
    let dispatcher = Dispatcher {
        sender,
        metrics,
        clock: Utc::now,
    };
    (dispatcher, receiver)
}

impl Dispatcher {
    /// Replace the time source used to stamp entries
    #[must_use]
    pub fn with_clock(mut self, clock: TimeSource) -> Self {
        self.clock = clock;
        self
    }

    pub fn metrics(&self) -> &Arc<LoggerMetrics> {
        &self.metrics
    }

    #[inline]
    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Send an entry, blocking while the channel is full
    pub(crate) fn send(&self, entry: Box<StandardEntry>) -> Result<()> {
        match self.sender.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                self.metrics.record_block();
                self.sender
                    .send(entry)
                    .map_err(|_| LoggerError::ChannelSendError)?;
            }
            Err(TrySendError::Disconnected(_)) => return Err(LoggerError::ChannelSendError),
        }
        self.metrics.record_sent();
        Ok(())
    }

    /// Number of entries waiting in the channel
    pub fn queued(&self) -> usize {
        self.sender.len()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.sender.capacity()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("queued", &self.sender.len())
            .field("capacity", &self.sender.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
    }

    #[test]
    fn test_send_counts_metrics() {
        let (dispatcher, receiver) = channel(4);
        StandardEntry::new(dispatcher.clone())
            .log(LogLevel::Info, "one")
            .unwrap();

        assert_eq!(dispatcher.metrics().entries_sent(), 1);
        assert_eq!(dispatcher.queued(), 1);
        assert_eq!(receiver.recv().unwrap().message(), "one");
    }

    #[test]
    fn test_disconnected_receiver() {
        let (dispatcher, receiver) = channel(4);
        drop(receiver);

        let result = StandardEntry::new(dispatcher.clone()).log(LogLevel::Err, "lost");
        assert!(matches!(result, Err(LoggerError::ChannelSendError)));
        assert_eq!(dispatcher.metrics().entries_sent(), 0);
    }

    #[test]
    fn test_custom_clock() {
        let (dispatcher, receiver) = channel(1);
        let dispatcher = dispatcher.with_clock(fixed_clock);

        StandardEntry::new(dispatcher).log(LogLevel::Warn, "tick").unwrap();
        assert_eq!(receiver.recv().unwrap().timestamp(), fixed_clock());
    }

    #[test]
    fn test_full_channel_blocks_until_drained() {
        let (dispatcher, receiver) = channel(1);
        StandardEntry::new(dispatcher.clone())
            .log(LogLevel::Info, "first")
            .unwrap();

        let producer = {
            let dispatcher = dispatcher.clone();
            std::thread::spawn(move || StandardEntry::new(dispatcher).log(LogLevel::Info, "second"))
        };

        std::thread::sleep(std::time::Duration::from_millis(50));
        assert_eq!(receiver.recv().unwrap().message(), "first");
        producer.join().unwrap().unwrap();
        assert_eq!(receiver.recv().unwrap().message(), "second");
        assert_eq!(dispatcher.metrics().block_events(), 1);
    }

    #[test]
    fn test_capacity() {
        let (dispatcher, _receiver) = channel(10);
        assert_eq!(dispatcher.capacity(), Some(10));
    }
}
