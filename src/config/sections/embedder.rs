//! Embedder section: the re-identification model and how it is fed.

use crate::config::attribute::{IntAttribute, StringAttribute};
use crate::config::errors::AttributeResult;
use crate::config::section::ConfigSection;
use crate::config::sections::{parse_choice, Device, DistanceMetric};
use crate::config::value::DynamicValue;
use serde::Serialize;
use strum::VariantNames;

/// Embedder model parameters.
///
/// The tensor dimensions and names describe the model's input and output
/// bindings and are passed through to the inference collaborator unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedderConfig {
    pub embedder_name: Option<String>,
    /// Explicit weights file. The bundled weights are used when unset.
    pub model_path: Option<String>,
    pub embedder_distance: DistanceMetric,
    pub input_height: i64,
    pub input_width: i64,
    pub input_name: String,
    pub output_name: String,
    pub device: Device,
}

impl ConfigSection for EmbedderConfig {
    const NAME: &'static str = "embedder";

    fn validate_attributes(tree: &DynamicValue) -> AttributeResult<Self> {
        Ok(Self {
            embedder_name: StringAttribute::new("embedder_model").validate(tree)?,
            model_path: StringAttribute::new("model_path").validate(tree)?,
            embedder_distance: parse_choice(
                StringAttribute::new("embedder_distance")
                    .with_default(DistanceMetric::Cosine.to_string())
                    .allowlist(DistanceMetric::VARIANTS.iter().copied()),
                tree,
            )?,
            input_height: IntAttribute::new("embedder_input_height")
                .with_default(112)
                .validate(tree)?,
            input_width: IntAttribute::new("embedder_input_width")
                .with_default(112)
                .validate(tree)?,
            input_name: StringAttribute::new("embedder_input_name")
                .with_default("input")
                .validate(tree)?
                .unwrap_or_default(),
            output_name: StringAttribute::new("embedder_output_name")
                .with_default("output")
                .validate(tree)?
                .unwrap_or_default(),
            device: parse_choice(
                StringAttribute::new("embedder_device")
                    .with_default(Device::Cuda.to_string())
                    .allowlist(Device::VARIANTS.iter().copied()),
                tree,
            )?,
        })
    }
}
