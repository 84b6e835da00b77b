//! The closed set of attribute kinds and the values they produce.

use crate::config::attribute::{BoolAttribute, FloatAttribute, IntAttribute, StringAttribute};
use crate::config::composite::{LabelConfidenceMap, ObjectAttribute};
use crate::config::errors::AttributeResult;
use crate::config::value::DynamicValue;
use serde::Serialize;
use std::collections::HashMap;

/// A single field's validation rule, of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeSpec {
    Int(IntAttribute),
    Float(FloatAttribute),
    String(StringAttribute),
    Bool(BoolAttribute),
    Object(ObjectAttribute),
    LabelMap(LabelConfidenceMap),
}

impl AttributeSpec {
    pub fn field_name(&self) -> &str {
        match self {
            Self::Int(attr) => attr.field_name(),
            Self::Float(attr) => attr.field_name(),
            Self::String(attr) => attr.field_name(),
            Self::Bool(attr) => attr.field_name(),
            Self::Object(attr) => attr.field_name(),
            Self::LabelMap(attr) => attr.field_name(),
        }
    }

    /// Validates the field against `tree` and wraps the result in a [`NativeValue`].
    ///
    /// Optional kinds that resolve to nothing produce [`NativeValue::Null`].
    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<NativeValue> {
        Ok(match self {
            Self::Int(attr) => NativeValue::Int(attr.validate(tree)?),
            Self::Float(attr) => NativeValue::Float(attr.validate(tree)?),
            Self::Bool(attr) => NativeValue::Bool(attr.validate(tree)?),
            Self::String(attr) => attr.validate(tree)?.map_or(NativeValue::Null, NativeValue::String),
            Self::Object(attr) => attr.validate(tree)?.map_or(NativeValue::Null, NativeValue::Record),
            Self::LabelMap(attr) => {
                attr.validate(tree)?.map_or(NativeValue::Null, NativeValue::LabelMap)
            }
        })
    }
}

impl From<IntAttribute> for AttributeSpec {
    fn from(attr: IntAttribute) -> Self {
        Self::Int(attr)
    }
}

impl From<FloatAttribute> for AttributeSpec {
    fn from(attr: FloatAttribute) -> Self {
        Self::Float(attr)
    }
}

impl From<StringAttribute> for AttributeSpec {
    fn from(attr: StringAttribute) -> Self {
        Self::String(attr)
    }
}

impl From<BoolAttribute> for AttributeSpec {
    fn from(attr: BoolAttribute) -> Self {
        Self::Bool(attr)
    }
}

impl From<ObjectAttribute> for AttributeSpec {
    fn from(attr: ObjectAttribute) -> Self {
        Self::Object(attr)
    }
}

impl From<LabelConfidenceMap> for AttributeSpec {
    fn from(attr: LabelConfidenceMap) -> Self {
        Self::LabelMap(attr)
    }
}

/// A validated, strongly-typed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NativeValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Record(Record),
    LabelMap(HashMap<String, f64>),
}

impl NativeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_label_map(&self) -> Option<&HashMap<String, f64>> {
        match self {
            Self::LabelMap(map) => Some(map),
            _ => None,
        }
    }
}

/// Validated fields in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, NativeValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field_name: impl Into<String>, value: NativeValue) {
        self.fields.push((field_name.into(), value));
    }

    pub fn get(&self, field_name: &str) -> Option<&NativeValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, value)| value)
    }

    pub fn get_i64(&self, field_name: &str) -> Option<i64> {
        self.get(field_name).and_then(NativeValue::as_i64)
    }

    pub fn get_f64(&self, field_name: &str) -> Option<f64> {
        self.get(field_name).and_then(NativeValue::as_f64)
    }

    pub fn get_bool(&self, field_name: &str) -> Option<bool> {
        self.get(field_name).and_then(NativeValue::as_bool)
    }

    pub fn get_str(&self, field_name: &str) -> Option<&str> {
        self.get(field_name).and_then(NativeValue::as_str)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
