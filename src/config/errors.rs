//! Error types for attribute validation.
//!
//! The error system is layered:
//!
//! - [`AttributeError`]: a single attribute failed to validate. Every variant
//!   carries the [`FieldPath`] of the offending value.
//! - [`SectionError`]: an attribute error tagged with the section that was
//!   being validated when it happened.
//!
//! Configuration errors are deterministic, so none of them is retryable:
//! validating the same tree again reproduces the same error.

use crate::config::value::ValueKind;
use thiserror::Error;

/// Dotted path of field names from the section root to a value.
///
/// Paths are built leaf first: the attribute that fails names itself, and
/// every enclosing object attribute prepends its own name on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(field: impl Into<String>) -> Self {
        Self(vec![field.into()])
    }

    /// The path of the configuration root itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The innermost field name.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn child(mut self, field: impl Into<String>) -> Self {
        self.0.push(field.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.0.insert(0, parent.into());
        self
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

/// Which side of a numeric range was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
}

/// A single attribute failed to validate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttributeError {
    #[error("Missing required configuration attribute: {field}")]
    MissingRequired { field: FieldPath },

    #[error("Expected {expected} for '{field}', got {actual}")]
    TypeMismatch {
        field: FieldPath,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("Expected integer for '{field}', but got {value} with a decimal part")]
    NotAnInteger { field: FieldPath, value: f64 },

    #[error("{} Got {value}.", describe_bound(field, *bound, *limit))]
    RangeViolation {
        field: FieldPath,
        bound: Bound,
        limit: f64,
        value: f64,
    },

    #[error("Invalid value '{value}' for '{field}'. Allowed values are: {}", allowed.join(", "))]
    InvalidChoice {
        field: FieldPath,
        value: String,
        allowed: Vec<String>,
    },
}

fn describe_bound(field: &FieldPath, bound: Bound, limit: f64) -> String {
    match bound {
        Bound::Min => format!("Value for '{}' should be at least {}.", field, limit),
        Bound::Max => format!("Value for '{}' should be at most {}.", field, limit),
    }
}

impl AttributeError {
    pub fn missing_required(field: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: FieldPath::new(field),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: ValueKind, actual: ValueKind) -> Self {
        Self::TypeMismatch {
            field: FieldPath::new(field),
            expected,
            actual,
        }
    }

    pub fn not_an_integer(field: impl Into<String>, value: f64) -> Self {
        Self::NotAnInteger {
            field: FieldPath::new(field),
            value,
        }
    }

    pub fn range_violation(field: impl Into<String>, bound: Bound, limit: f64, value: f64) -> Self {
        Self::RangeViolation {
            field: FieldPath::new(field),
            bound,
            limit,
            value,
        }
    }

    pub fn invalid_choice(
        field: impl Into<String>,
        value: impl Into<String>,
        allowed: &[String],
    ) -> Self {
        Self::InvalidChoice {
            field: FieldPath::new(field),
            value: value.into(),
            allowed: allowed.to_vec(),
        }
    }

    pub fn field(&self) -> &FieldPath {
        match self {
            Self::MissingRequired { field }
            | Self::TypeMismatch { field, .. }
            | Self::NotAnInteger { field, .. }
            | Self::RangeViolation { field, .. }
            | Self::InvalidChoice { field, .. } => field,
        }
    }

    fn field_mut(&mut self) -> &mut FieldPath {
        match self {
            Self::MissingRequired { field }
            | Self::TypeMismatch { field, .. }
            | Self::NotAnInteger { field, .. }
            | Self::RangeViolation { field, .. }
            | Self::InvalidChoice { field, .. } => field,
        }
    }

    /// Prepends an enclosing object's field name to the error path.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        let field = std::mem::take(self.field_mut());
        *self.field_mut() = field.with_parent(parent);
        self
    }

    /// Stable code for referencing the error kind in logs and docs.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "ATTR_0001",
            Self::TypeMismatch { .. } => "ATTR_0002",
            Self::NotAnInteger { .. } => "ATTR_0003",
            Self::RangeViolation { .. } => "ATTR_0004",
            Self::InvalidChoice { .. } => "ATTR_0005",
        }
    }
}

/// An attribute error raised while validating a named section.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid {section} configuration: {source}")]
pub struct SectionError {
    pub section: String,
    #[source]
    pub source: AttributeError,
}

impl SectionError {
    pub fn new(section: impl Into<String>, source: AttributeError) -> Self {
        Self {
            section: section.into(),
            source,
        }
    }

    pub fn field(&self) -> &FieldPath {
        self.source.field()
    }
}

/// A section declaration that cannot be validated against anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Section '{section}' declares an attribute with an empty field name")]
    EmptyFieldName { section: String },

    #[error("Section '{section}' declares field '{field}' more than once")]
    DuplicateField { section: String, field: String },
}

pub type AttributeResult<T> = Result<T, AttributeError>;
pub type SectionResult<T> = Result<T, SectionError>;
