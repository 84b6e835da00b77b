//! Dynamic configuration values.
//!
//! A [`DynamicValue`] is the configuration tree exactly as it is received from
//! the host runtime, before any attribute has looked at it. Numbers are always
//! carried as `f64`, the same way the Struct wire format carries them, so
//! integer-ness is decided by the attribute that reads the value.

use serde::Deserialize;
use std::collections::HashMap;

/// Field mapping of an object value.
pub type Fields = HashMap<String, DynamicValue>;

/// An untyped configuration value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum DynamicValue {
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Fields),
    /// Lists can appear on the wire but no attribute consumes them.
    List(Vec<DynamicValue>),
}

/// The dynamic kind of a value, as reported in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Absent,
    Bool,
    Number,
    String,
    Object,
    List,
}

impl DynamicValue {
    /// Builds an object value from `(key, value)` pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<DynamicValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Absent => ValueKind::Absent,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Object(_) => ValueKind::Object,
            Self::List(_) => ValueKind::List,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Looks up a top-level key. Non-object values have no keys.
    pub fn get(&self, field_name: &str) -> Option<&DynamicValue> {
        match self {
            Self::Object(fields) => fields.get(field_name),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for DynamicValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Bool(b) => Self::Bool(b),
            // serde_json numbers without arbitrary_precision always fit an f64
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Absent, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for DynamicValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for DynamicValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Fields> for DynamicValue {
    fn from(value: Fields) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
