//! The typed sections of the tracker configuration.

mod detector;
mod embedder;
mod tracking;

pub use detector::DetectorConfig;
pub use embedder::EmbedderConfig;
pub use tracking::{CropRegion, TrackingConfig};

use crate::config::attribute::StringAttribute;
use crate::config::errors::{AttributeError, AttributeResult};
use crate::config::value::DynamicValue;
use serde::Serialize;
use std::str::FromStr;

/// Inference device selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda,
}

/// Distance used to compare embeddings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    Cosine,
    Euclidean,
    Manhattan,
}

/// Validates an allow-listed string attribute and parses it into its enum.
///
/// The attribute must carry a default, so a validated value is always present.
pub(crate) fn parse_choice<T: FromStr>(
    attr: StringAttribute,
    tree: &DynamicValue,
) -> AttributeResult<T> {
    let value = attr
        .validate(tree)?
        .ok_or_else(|| AttributeError::missing_required(attr.field_name()))?;
    value.parse().map_err(|_| {
        AttributeError::invalid_choice(
            attr.field_name(),
            value.as_str(),
            attr.allowlist.as_deref().unwrap_or_default(),
        )
    })
}
