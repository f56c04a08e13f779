//! Formatter hook and the built-in line formats
//!
//! The writer calls an [`EntryFormatter`] once per finalized entry. Provided
//! output formats, one line each:
//! - Logfmt: `timestamp=... level=info message="..." key=value ...` (default)
//! - Json: one JSON object per line
//! - Text: human-readable, optionally colored
//!
//! Field keys never shadow the header: a field named `timestamp`, `level` or
//! `message` is written as `fields.<name>`, and a repeated key gets `.1`,
//! `.2`, ... for its later occurrences.

use super::field::FieldValue;
use super::standard_entry::StandardEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{self, Write};

const HEADER_KEYS: [&str; 3] = ["timestamp", "level", "message"];

/// Serializes a finalized entry into a byte sink.
///
/// Any `Fn(&StandardEntry, &mut dyn Write) -> io::Result<()>` closure is a
/// formatter.
pub trait EntryFormatter: Send + Sync {
    fn format_entry(&self, entry: &StandardEntry, sink: &mut dyn Write) -> io::Result<()>;
}

impl<F> EntryFormatter for F
where
    F: Fn(&StandardEntry, &mut dyn Write) -> io::Result<()> + Send + Sync,
{
    fn format_entry(&self, entry: &StandardEntry, sink: &mut dyn Write) -> io::Result<()> {
        self(entry, sink)
    }
}

/// Built-in output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `timestamp=2025-01-08T10:30:45.123Z level=info message="login ok" user=alice`
    #[default]
    Logfmt,

    /// `{"timestamp":"2025-01-08T10:30:45.123Z","level":"info","message":"login ok","user":"alice"}`
    Json,

    /// `[2025-01-08T10:30:45.123Z] [info ] login ok user=alice`
    Text,
}

/// Formatting options shared by the built-in formats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterConfig {
    pub timestamp_format: TimestampFormat,
    /// Print `INFO` instead of `info`
    pub level_uppercase: bool,
    /// Color the level in `Text` output
    pub use_colors: bool,
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_level_uppercase(mut self, uppercase: bool) -> Self {
        self.level_uppercase = uppercase;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

/// Default formatter: one of the [`OutputFormat`]s plus its options
///
/// # Example
///
/// ```
/// use rust_entry_logger::{LogFormatter, OutputFormat};
///
/// let formatter = LogFormatter::new(OutputFormat::Json);
/// assert_eq!(formatter.output_format(), OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogFormatter {
    output_format: OutputFormat,
    config: FormatterConfig,
}

impl LogFormatter {
    pub fn new(output_format: OutputFormat) -> Self {
        Self {
            output_format,
            config: FormatterConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn level_str(&self, entry: &StandardEntry) -> String {
        if self.config.level_uppercase {
            entry.level().to_str().to_ascii_uppercase()
        } else {
            entry.level().to_str().to_string()
        }
    }

    fn write_logfmt(&self, entry: &StandardEntry, sink: &mut dyn Write) -> io::Result<()> {
        let timestamp = self.config.timestamp_format.format(&entry.timestamp());
        write!(
            sink,
            "timestamp={} level={} message={}",
            escape_logfmt_value(&timestamp),
            self.level_str(entry),
            quote_logfmt_value(entry.message())
        )?;

        let keys = field_keys(entry, escape_logfmt_key);
        for (key, field) in keys.iter().zip(entry.fields()) {
            write!(sink, " {}={}", key, logfmt_field_value(field.value()))?;
        }
        sink.write_all(b"\n")
    }

    fn write_json(&self, entry: &StandardEntry, sink: &mut dyn Write) -> io::Result<()> {
        let mut json_obj = serde_json::Map::new();

        let format = &self.config.timestamp_format;
        let timestamp = match format.unix_value(&entry.timestamp()) {
            Some(value) => serde_json::Value::from(value),
            None => serde_json::Value::String(format.format(&entry.timestamp())),
        };
        json_obj.insert("timestamp".to_string(), timestamp);
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(self.level_str(entry)),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message().to_string()),
        );

        let keys = field_keys(entry, |name: &str| name.to_string());
        for (key, field) in keys.into_iter().zip(entry.fields()) {
            json_obj.insert(key, field.value().to_json_value());
        }

        serde_json::to_writer(&mut *sink, &serde_json::Value::Object(json_obj))?;
        sink.write_all(b"\n")
    }

    fn write_text(&self, entry: &StandardEntry, sink: &mut dyn Write) -> io::Result<()> {
        let level = format!("{:5}", self.level_str(entry));
        #[cfg(feature = "color")]
        let level = if self.config.use_colors {
            use colored::Colorize;
            level.color(entry.level().color_code()).to_string()
        } else {
            level
        };

        write!(
            sink,
            "[{}] [{}] {}",
            self.config.timestamp_format.format(&entry.timestamp()),
            level,
            sanitize_message(entry.message())
        )?;
        let keys = field_keys(entry, escape_logfmt_key);
        for (key, field) in keys.iter().zip(entry.fields()) {
            write!(sink, " {}={}", key, logfmt_field_value(field.value()))?;
        }
        sink.write_all(b"\n")
    }
}

impl EntryFormatter for LogFormatter {
    fn format_entry(&self, entry: &StandardEntry, sink: &mut dyn Write) -> io::Result<()> {
        match self.output_format {
            OutputFormat::Logfmt => self.write_logfmt(entry, sink),
            OutputFormat::Json => self.write_json(entry, sink),
            OutputFormat::Text => self.write_text(entry, sink),
        }
    }
}

/// Escape control characters so one entry stays on one line
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn logfmt_field_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Str(s) => escape_logfmt_value(s),
        FieldValue::Enum(tag) => escape_logfmt_value(tag),
        FieldValue::Optional(None) => "null".to_string(),
        FieldValue::Optional(Some(inner)) => logfmt_field_value(inner),
        other => other.to_string(),
    }
}

/// Output key for each field, in attachment order, unique within the line
fn field_keys(entry: &StandardEntry, clean: fn(&str) -> String) -> Vec<String> {
    let mut taken: HashSet<String> = HEADER_KEYS.iter().map(|key| key.to_string()).collect();
    entry
        .fields()
        .iter()
        .map(|field| {
            let mut base = clean(field.name());
            if HEADER_KEYS.contains(&base.as_str()) {
                base = format!("fields.{}", base);
            }
            let mut key = base.clone();
            let mut occurrence = 1;
            while !taken.insert(key.clone()) {
                key = format!("{}.{}", base, occurrence);
                occurrence += 1;
            }
            key
        })
        .collect()
}

/// Keep only `[A-Za-z0-9_.-]`, the characters safe in a bare logfmt key
fn escape_logfmt_key(key: &str) -> String {
    let escaped: String = key
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if escaped.is_empty() {
        "_".to_string()
    } else {
        escaped
    }
}

/// Quote a value when it would otherwise be ambiguous
///
/// `null` is quoted so a present string never reads as an absent value.
fn escape_logfmt_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value == "null"
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '=' | '\\'));
    if needs_quotes {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
