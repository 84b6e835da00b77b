//! Attributes whose values are themselves objects.

use crate::config::attribute::{Attribute, Resolved};
use crate::config::errors::{AttributeError, AttributeResult};
use crate::config::schema::{AttributeSpec, Record};
use crate::config::value::{DynamicValue, Fields, ValueKind};
use std::collections::HashMap;
use tracing::debug;

/// A nested object validated by its own ordered list of child attributes.
///
/// Children are evaluated against the object's own fields, not the outer
/// tree. A child error comes back with this attribute's name prepended to its
/// path, so a bad `x1_rel` inside `crop_region` reports `crop_region.x1_rel`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectAttribute {
    pub base: Attribute<DynamicValue>,
    pub fields: Vec<AttributeSpec>,
}

impl ObjectAttribute {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            base: Attribute::new(field_name),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, spec: impl Into<AttributeSpec>) -> Self {
        self.fields.push(spec.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.base.required = true;
        self
    }

    /// The default is an object tree and goes through the same child validation.
    pub fn with_default(mut self, default: Fields) -> Self {
        self.base.default = Some(DynamicValue::Object(default));
        self
    }

    pub fn field_name(&self) -> &str {
        &self.base.field_name
    }

    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<Option<Record>> {
        let resolved = self.base.resolve(tree)?;
        let object = match resolved {
            Resolved::Absent => return Ok(None),
            Resolved::Default(default) => default,
            Resolved::Tree(value) => value,
        };
        match object.as_object() {
            Some(fields) => self.validate_fields(object, fields).map(Some),
            None => Err(AttributeError::type_mismatch(
                &self.base.field_name,
                ValueKind::Object,
                object.kind(),
            )),
        }
    }

    fn validate_fields(&self, object: &DynamicValue, fields: &Fields) -> AttributeResult<Record> {
        let mut record = Record::new();
        for spec in &self.fields {
            let value = spec
                .validate(object)
                .map_err(|e| e.with_parent(&self.base.field_name))?;
            record.push(spec.field_name(), value);
        }

        let ignored: Vec<&str> = fields
            .keys()
            .map(String::as_str)
            .filter(|key| !self.fields.iter().any(|spec| spec.field_name() == *key))
            .collect();
        if !ignored.is_empty() {
            debug!(field = %self.base.field_name, ?ignored, "ignoring undeclared object keys");
        }

        Ok(record)
    }
}

/// A map from class label to confidence threshold.
///
/// Every key of the object is a label and every value must be a number. No
/// bounds are enforced on the thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelConfidenceMap {
    pub base: Attribute<HashMap<String, f64>>,
}

impl LabelConfidenceMap {
    pub const DEFAULT_FIELD_NAME: &'static str = "chosen_labels";

    pub fn new() -> Self {
        Self::with_field_name(Self::DEFAULT_FIELD_NAME)
    }

    pub fn with_field_name(field_name: impl Into<String>) -> Self {
        Self {
            base: Attribute::new(field_name),
        }
    }

    pub fn required(mut self) -> Self {
        self.base.required = true;
        self
    }

    pub fn with_default(mut self, default: HashMap<String, f64>) -> Self {
        self.base.default = Some(default);
        self
    }

    pub fn field_name(&self) -> &str {
        &self.base.field_name
    }

    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<Option<HashMap<String, f64>>> {
        let resolved = self.base.resolve(tree)?;
        let fields = match resolved {
            Resolved::Absent => return Ok(None),
            Resolved::Default(default) => return Ok(Some(default.clone())),
            Resolved::Tree(DynamicValue::Object(fields)) => fields,
            Resolved::Tree(_) => return Err(self.base.type_mismatch(ValueKind::Object, &resolved)),
        };

        // Sorted so the reported entry does not depend on hash order
        let mut labels: Vec<&String> = fields.keys().collect();
        labels.sort();

        let mut chosen = HashMap::with_capacity(labels.len());
        for label in labels {
            match &fields[label] {
                DynamicValue::Number(threshold) => {
                    chosen.insert(label.clone(), *threshold);
                }
                other => {
                    return Err(AttributeError::type_mismatch(
                        label.as_str(),
                        ValueKind::Number,
                        other.kind(),
                    )
                    .with_parent(&self.base.field_name));
                }
            }
        }
        Ok(Some(chosen))
    }
}

impl Default for LabelConfidenceMap {
    fn default() -> Self {
        Self::new()
    }
}
