//! Typed key/value fields attached to log entries
//!
//! A [`Field`] owns a copy of its name and of any string data in its value, so
//! callers may pass transient or reused buffers.

use super::log_level::LogLevel;
use std::fmt;

/// Value of a structured field.
///
/// The set of kinds is closed so every formatter can handle each one.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Name of an enumeration variant
    Enum(&'static str),
    /// `None` is an absent value, `Some` wraps the present one
    Optional(Option<Box<FieldValue>>),
}

/// Enumerations that can be attached as fields by variant name.
///
/// # Example
///
/// ```
/// use rust_entry_logger::{FieldEnum, FieldValue};
///
/// enum Phase { Connect, Handshake }
///
/// impl FieldEnum for Phase {
///     fn tag(&self) -> &'static str {
///         match self {
///             Phase::Connect => "connect",
///             Phase::Handshake => "handshake",
///         }
///     }
/// }
///
/// assert_eq!(FieldValue::enum_tag(&Phase::Handshake), FieldValue::Enum("handshake"));
/// ```
pub trait FieldEnum {
    fn tag(&self) -> &'static str;
}

impl FieldEnum for LogLevel {
    fn tag(&self) -> &'static str {
        self.to_str()
    }
}

impl FieldValue {
    pub fn enum_tag<E: FieldEnum + ?Sized>(value: &E) -> Self {
        FieldValue::Enum(value.tag())
    }

    /// True only for an absent optional
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Optional(None) => true,
            FieldValue::Optional(Some(inner)) => inner.is_absent(),
            _ => false,
        }
    }

    /// Short name of the value kind
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Uint(_) => "uint",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::Enum(_) => "enum",
            FieldValue::Optional(_) => "optional",
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Str(s) => serde_json::Value::String(s.clone()),
            FieldValue::Enum(tag) => serde_json::Value::String((*tag).to_string()),
            FieldValue::Optional(None) => serde_json::Value::Null,
            FieldValue::Optional(Some(inner)) => inner.to_json_value(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Enum(tag) => f.write_str(tag),
            FieldValue::Optional(None) => f.write_str("null"),
            FieldValue::Optional(Some(inner)) => inner.fmt(f),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for FieldValue {
                #[inline]
                fn from(v: $source) -> Self {
                    FieldValue::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_owned())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Str(s.clone())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<LogLevel> for FieldValue {
    fn from(level: LogLevel) -> Self {
        FieldValue::enum_tag(&level)
    }
}

/// Nested optionals collapse: `Some(None)` is stored as absent and
/// `Some(Some(v))` as present `v`.
impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value.map(Into::into) {
            Some(FieldValue::Optional(inner)) => FieldValue::Optional(inner),
            Some(present) => FieldValue::Optional(Some(Box::new(present))),
            None => FieldValue::Optional(None),
        }
    }
}

/// One named, typed piece of structured data.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: FieldValue,
}

impl Field {
    /// Build a field, copying `name` into owned storage
    pub fn new(name: &str, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}
