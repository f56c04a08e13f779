//! Integration tests for the entry logger
//!
//! These tests verify:
//! - End-to-end formatting through the background writer
//! - Field order and presence/absence rendering
//! - Level filtering with no channel traffic
//! - File sinks and JSON configuration
//! - Error surfaces (closed channel, failing sink)

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use rust_entry_logger::prelude::*;
use rust_entry_logger::{dispatcher, EntryWriter};
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
}

fn buffered_logger(min_level: LogLevel) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let logger = Logger::builder()
        .min_level(min_level)
        .sink(buffer.clone())
        .clock(fixed_clock)
        .build();
    (logger, buffer)
}

#[test]
fn test_login_scenario_default_formatter() {
    let (mut logger, buffer) = buffered_logger(LogLevel::Debug);

    logger
        .info()
        .field("user", "alice")
        .field("count", 3)
        .logf(LogLevel::Info, format_args!("login {}", "ok"))
        .expect("send succeeds");

    assert!(logger.shutdown(Duration::from_secs(5)));

    let output = buffer.contents();
    assert_eq!(
        output,
        "timestamp=2025-01-08T10:30:45.000Z level=info message=\"login ok\" user=alice count=3\n"
    );
}

#[test]
fn test_every_field_once_in_order() {
    let (mut logger, buffer) = buffered_logger(LogLevel::Debug);

    logger
        .warn()
        .field("a", 1_u8)
        .field("b", -2_i16)
        .field("c", 2.5_f32)
        .field("d", false)
        .field("e", LogLevel::Err)
        .field("f", String::from("owned"))
        .log(LogLevel::Warn, "mixed")
        .unwrap();
    assert!(logger.shutdown(Duration::from_secs(5)));

    let output = buffer.contents();
    let line = output.lines().next().expect("one line");
    assert!(line.ends_with(" a=1 b=-2 c=2.5 d=false e=err f=owned"), "{}", line);
    for key in ["a=", "b=", "c=", "d=", "e=", "f="] {
        assert_eq!(line.matches(&format!(" {}", key)).count(), 1);
    }
    assert!(line.contains("level=warn"));
}

#[test]
fn test_absent_optional_distinct_from_present() {
    let (mut logger, buffer) = buffered_logger(LogLevel::Debug);
    let missing: Option<&str> = None;

    logger.info().field("session", missing).log(LogLevel::Info, "absent").unwrap();
    logger.info().field("session", Some("null")).log(LogLevel::Info, "present").unwrap();
    assert!(logger.shutdown(Duration::from_secs(5)));

    let output = buffer.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("session=null"));
    assert!(lines[1].ends_with("session=\"null\""));
    assert_ne!(lines[0].rsplit(' ').next(), lines[1].rsplit(' ').next());
}

#[test]
fn test_filtered_levels_produce_nothing() {
    let (mut logger, buffer) = buffered_logger(LogLevel::Warn);

    for i in 0..100 {
        logger
            .debug()
            .field("i", i)
            .log(LogLevel::Debug, "hidden")
            .unwrap();
        logger
            .info()
            .field("i", i)
            .logf(LogLevel::Info, format_args!("hidden {}", i))
            .unwrap();
    }
    assert!(logger.shutdown(Duration::from_secs(5)));

    assert!(buffer.contents().is_empty());
    assert_eq!(logger.metrics().entries_sent(), 0);
    assert_eq!(logger.metrics().entries_written(), 0);
}

#[test]
fn test_json_output_through_writer() {
    let buffer = SharedBuffer::default();
    let mut logger = Logger::builder()
        .formatter(LogFormatter::new(OutputFormat::Json))
        .sink(buffer.clone())
        .clock(fixed_clock)
        .build();

    logger
        .err()
        .field("code", 500_u16)
        .field("retry", None::<u32>)
        .log(LogLevel::Err, "upstream failed")
        .unwrap();
    assert!(logger.shutdown(Duration::from_secs(5)));

    let parsed: serde_json::Value =
        serde_json::from_str(buffer.contents().trim_end()).expect("valid JSON line");
    assert_eq!(parsed["level"], "err");
    assert_eq!(parsed["message"], "upstream failed");
    assert_eq!(parsed["code"], 500);
    assert!(parsed["retry"].is_null());
    assert_eq!(parsed["timestamp"], "2025-01-08T10:30:45.000Z");
}

#[test]
fn test_file_sink_from_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("entries.log");

    let config = LoggerConfig::from_json(
        r#"{"min_level": "info", "capacity": 4, "timestamp_format": "UnixMillis"}"#,
    )
    .expect("valid config");
    let file = fs::File::create(&log_file).expect("Failed to create log file");
    let mut logger = LoggerBuilder::from_config(&config)
        .expect("validated config")
        .sink(io::BufWriter::new(file))
        .build();

    for i in 0..25 {
        logger
            .info()
            .field("seq", i)
            .logf(LogLevel::Info, format_args!("entry {}", i))
            .unwrap();
    }
    logger.debug().log(LogLevel::Debug, "filtered").unwrap();
    assert!(logger.shutdown(Duration::from_secs(5)));

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 25);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("seq={}", i)), "{}", line);
        assert!(line.contains(&format!("message=\"entry {}\"", i)));
    }
    assert!(!content.contains("filtered"));
}

#[test]
fn test_send_after_writer_gone_is_an_error() {
    let (dispatcher, receiver) = dispatcher::channel(2);
    drop(receiver);

    let result = Entry::standard(dispatcher)
        .field("k", "v")
        .log(LogLevel::Info, "nobody listening");
    assert!(matches!(result, Err(LoggerError::ChannelSendError)));
}

#[test]
fn test_consumer_relog_is_rejected() {
    let (dispatcher, receiver) = dispatcher::channel(2);
    Entry::standard(dispatcher)
        .log(LogLevel::Info, "first")
        .unwrap();

    let received = receiver.recv().unwrap();
    assert!(received.is_dispatched());
    let err = received.log(LogLevel::Err, "again").unwrap_err();
    assert!(matches!(err, LoggerError::AlreadyDispatched));
    assert!(receiver.is_empty());
}

#[test]
fn test_failing_sink_does_not_stop_producers() {
    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let mut logger = Logger::builder().sink(FailingSink).build();
    for _ in 0..5 {
        logger.info().log(LogLevel::Info, "will fail").unwrap();
    }
    assert!(logger.shutdown(Duration::from_secs(5)));

    assert_eq!(logger.metrics().entries_sent(), 5);
    assert_eq!(logger.metrics().write_failures(), 5);
    assert_eq!(logger.metrics().entries_written(), 0);
}

#[test]
fn test_manual_consumer_owns_entries() {
    let (dispatcher, receiver) = dispatcher::channel(8);
    let buffer = SharedBuffer::default();

    let writer = EntryWriter::new(
        Box::new(LogFormatter::new(OutputFormat::Text)),
        Box::new(buffer.clone()),
        Arc::clone(dispatcher.metrics()),
    );
    let handle = std::thread::spawn(move || writer.run(receiver));

    Entry::standard(dispatcher.clone().with_clock(fixed_clock))
        .field("user", "bob")
        .log(LogLevel::Warn, "slow login")
        .unwrap();
    drop(dispatcher);
    handle.join().expect("writer exits once all senders are gone");

    assert_eq!(
        buffer.contents(),
        "[2025-01-08T10:30:45.000Z] [warn ] slow login user=bob\n"
    );
}
