//! Sections: attributes validated together into one record.
//!
//! A section evaluates its attributes in declaration order and stops at the
//! first failure, so the first declared bad field is always the one reported.
//! There is no partial-success mode.

use crate::config::errors::{AttributeResult, SchemaError, SectionError, SectionResult};
use crate::config::schema::{AttributeSpec, Record};
use crate::config::value::DynamicValue;
use std::collections::HashSet;
use tracing::debug;

/// A typed configuration section.
pub trait ConfigSection: Sized {
    /// Section name used in error messages and logs.
    const NAME: &'static str;

    /// Validates the attributes of this section against `tree`.
    fn validate_attributes(tree: &DynamicValue) -> AttributeResult<Self>;

    /// Validates the section and tags a failure with the section name.
    fn from_tree(tree: &DynamicValue) -> SectionResult<Self> {
        debug!(section = Self::NAME, "validating section");
        Self::validate_attributes(tree).map_err(|e| SectionError::new(Self::NAME, e))
    }
}

/// A section declared at runtime as an ordered list of attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    specs: Vec<AttributeSpec>,
}

impl Section {
    /// Field names must be non-empty and unique within the section.
    pub fn new(name: impl Into<String>, specs: Vec<AttributeSpec>) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.field_name().is_empty() {
                return Err(SchemaError::EmptyFieldName { section: name });
            }
            if !seen.insert(spec.field_name()) {
                return Err(SchemaError::DuplicateField {
                    field: spec.field_name().to_string(),
                    section: name,
                });
            }
        }
        Ok(Self { name, specs })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specs(&self) -> &[AttributeSpec] {
        &self.specs
    }

    pub fn validate_section(&self, tree: &DynamicValue) -> SectionResult<Record> {
        debug!(section = %self.name, fields = self.specs.len(), "validating section");
        let mut record = Record::new();
        for spec in &self.specs {
            let value = spec
                .validate(tree)
                .map_err(|e| SectionError::new(&self.name, e))?;
            record.push(spec.field_name(), value);
        }
        Ok(record)
    }
}

/// Outcome of validating several independent sections.
///
/// Each failing section contributes its first error. The configuration as a
/// whole is invalid while any error is present.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport<T> {
    value: Option<T>,
    errors: Vec<SectionError>,
}

impl<T> SectionReport<T> {
    pub fn valid(value: T) -> Self {
        Self {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<SectionError>) -> Self {
        Self {
            value: None,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SectionError] {
        &self.errors
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_result(self) -> Result<T, Vec<SectionError>> {
        match self.value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}
