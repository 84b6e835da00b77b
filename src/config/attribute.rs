//! Scalar attributes and the presence/default resolution they share.
//!
//! Every attribute follows the same two steps. It first resolves its field
//! against the tree ([`Attribute::resolve`]), substituting its default when the
//! field is absent. It then coerces the resolved value into its native type
//! and checks its constraints.

use crate::config::errors::{AttributeError, AttributeResult, Bound};
use crate::config::value::{DynamicValue, ValueKind};
use tracing::trace;

/// The base of every attribute: a field name and its presence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<T> {
    pub field_name: String,
    pub required: bool,
    pub default: Option<T>,
}

/// A field value after default substitution.
///
/// A value from the tree and a native default are kept apart so each
/// attribute can coerce both explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a, T> {
    Tree(&'a DynamicValue),
    Default(&'a T),
    Absent,
}

impl<T> Attribute<T> {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            required: false,
            default: None,
        }
    }

    /// Looks the field up in `tree` and substitutes the default if it is absent.
    ///
    /// A key explicitly set to null counts as absent. The required check runs
    /// after default substitution, so a default always satisfies it.
    pub fn resolve<'a>(&'a self, tree: &'a DynamicValue) -> AttributeResult<Resolved<'a, T>> {
        let resolved = match tree.get(&self.field_name) {
            Some(value) if !value.is_absent() => Resolved::Tree(value),
            _ => match &self.default {
                Some(default) => {
                    trace!(field = %self.field_name, "substituting default value");
                    Resolved::Default(default)
                }
                None => Resolved::Absent,
            },
        };

        if self.required && matches!(resolved, Resolved::Absent) {
            return Err(AttributeError::missing_required(&self.field_name));
        }
        Ok(resolved)
    }

    /// Mismatch error for a resolved value that failed coercion. Defaults are
    /// native values of the attribute's own kind, so only tree values and
    /// absence can get here.
    pub(crate) fn type_mismatch(&self, expected: ValueKind, resolved: &Resolved<'_, T>) -> AttributeError {
        let actual = match resolved {
            Resolved::Tree(value) => value.kind(),
            _ => ValueKind::Absent,
        };
        AttributeError::type_mismatch(&self.field_name, expected, actual)
    }
}

macro_rules! attribute_builders {
    ($ty:ident, $default:ty) => {
        impl $ty {
            pub fn required(mut self) -> Self {
                self.base.required = true;
                self
            }

            pub fn with_default(mut self, default: impl Into<$default>) -> Self {
                self.base.default = Some(default.into());
                self
            }

            pub fn field_name(&self) -> &str {
                &self.base.field_name
            }
        }
    };
}

fn check_range(
    field_name: &str,
    min: Option<f64>,
    max: Option<f64>,
    value: f64,
) -> AttributeResult<()> {
    // NaN compares false with everything, so it fails whichever bound is set
    if let Some(min) = min {
        if value.is_nan() || value < min {
            return Err(AttributeError::range_violation(field_name, Bound::Min, min, value));
        }
    }
    if let Some(max) = max {
        if value.is_nan() || value > max {
            return Err(AttributeError::range_violation(field_name, Bound::Max, max, value));
        }
    }
    Ok(())
}

const I64_LOWER: f64 = i64::MIN as f64;
// Exclusive: i64::MAX is not representable and rounds up to 2^63
const I64_UPPER: f64 = -(i64::MIN as f64);

/// An integer field with optional inclusive bounds.
///
/// Numbers that do not fit an `i64` are range violations even when no bounds
/// are configured.
#[derive(Debug, Clone, PartialEq)]
pub struct IntAttribute {
    pub base: Attribute<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

attribute_builders!(IntAttribute, i64);

impl IntAttribute {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            base: Attribute::new(field_name),
            min: None,
            max: None,
        }
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<i64> {
        let resolved = self.base.resolve(tree)?;
        let value = match resolved {
            Resolved::Default(default) => *default as f64,
            Resolved::Tree(DynamicValue::Number(n)) => *n,
            _ => return Err(self.base.type_mismatch(ValueKind::Number, &resolved)),
        };

        if value.fract() != 0.0 {
            return Err(AttributeError::not_an_integer(&self.base.field_name, value));
        }
        check_range(
            &self.base.field_name,
            self.min.map(|m| m as f64),
            self.max.map(|m| m as f64),
            value,
        )?;
        if value < I64_LOWER {
            return Err(AttributeError::range_violation(
                &self.base.field_name,
                Bound::Min,
                I64_LOWER,
                value,
            ));
        }
        if value >= I64_UPPER {
            return Err(AttributeError::range_violation(
                &self.base.field_name,
                Bound::Max,
                i64::MAX as f64,
                value,
            ));
        }
        Ok(value as i64)
    }
}

/// A floating point field with optional inclusive bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatAttribute {
    pub base: Attribute<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

attribute_builders!(FloatAttribute, f64);

impl FloatAttribute {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            base: Attribute::new(field_name),
            min: None,
            max: None,
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Shorthand for `min(min).max(max)`.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<f64> {
        let resolved = self.base.resolve(tree)?;
        let value = match resolved {
            Resolved::Default(default) => *default,
            Resolved::Tree(DynamicValue::Number(n)) => *n,
            _ => return Err(self.base.type_mismatch(ValueKind::Number, &resolved)),
        };

        check_range(&self.base.field_name, self.min, self.max, value)?;
        Ok(value)
    }
}

/// A string field, optionally restricted to an allow-list.
///
/// Absence is not an error unless the field is required.
#[derive(Debug, Clone, PartialEq)]
pub struct StringAttribute {
    pub base: Attribute<String>,
    pub allowlist: Option<Vec<String>>,
}

attribute_builders!(StringAttribute, String);

impl StringAttribute {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            base: Attribute::new(field_name),
            allowlist: None,
        }
    }

    pub fn allowlist<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowlist = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<Option<String>> {
        let resolved = self.base.resolve(tree)?;
        let value = match resolved {
            Resolved::Absent => return Ok(None),
            Resolved::Default(default) => default.as_str(),
            Resolved::Tree(DynamicValue::String(s)) => s.as_str(),
            Resolved::Tree(_) => return Err(self.base.type_mismatch(ValueKind::String, &resolved)),
        };

        // An empty allow-list leaves the field unconstrained
        if let Some(allowed) = self.allowlist.as_deref().filter(|a| !a.is_empty()) {
            if !allowed.iter().any(|a| a == value) {
                return Err(AttributeError::invalid_choice(
                    &self.base.field_name,
                    value,
                    allowed,
                ));
            }
        }
        Ok(Some(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolAttribute {
    pub base: Attribute<bool>,
}

attribute_builders!(BoolAttribute, bool);

impl BoolAttribute {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            base: Attribute::new(field_name),
        }
    }

    pub fn validate(&self, tree: &DynamicValue) -> AttributeResult<bool> {
        let resolved = self.base.resolve(tree)?;
        match resolved {
            Resolved::Default(default) => Ok(*default),
            Resolved::Tree(DynamicValue::Bool(b)) => Ok(*b),
            _ => Err(self.base.type_mismatch(ValueKind::Bool, &resolved)),
        }
    }
}
