//! Detector section: which vision service produces detections and which of
//! its labels are kept.
//!
//! # Examples
//!
//! ```rust,ignore
//! use reid_config::config::{ConfigSection, DetectorConfig, Device, DynamicValue};
//! use serde_json::json;
//!
//! let tree = DynamicValue::from(json!({
//!     "detector_name": "vision-1",
//!     "chosen_labels": { "person": 0.5 }
//! }));
//! let detector = DetectorConfig::from_tree(&tree)?;
//! assert_eq!(detector.device, Device::Cpu);
//! ```

use crate::config::attribute::{BoolAttribute, IntAttribute, StringAttribute};
use crate::config::composite::LabelConfidenceMap;
use crate::config::errors::AttributeResult;
use crate::config::section::ConfigSection;
use crate::config::sections::{parse_choice, Device};
use crate::config::value::DynamicValue;
use serde::Serialize;
use std::collections::HashMap;
use strum::VariantNames;

/// Detector parameters.
///
/// The debug-tool fields are read by the detector service only and are
/// passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorConfig {
    /// Name of the vision service providing detections.
    pub detector_name: Option<String>,
    /// Accepted class labels and their confidence thresholds.
    pub chosen_labels: Option<HashMap<String, f64>>,
    pub device: Device,
    pub enable_debug_tools: bool,
    pub path_to_debug_directory: Option<String>,
    pub max_size_debug_directory: i64,
}

impl ConfigSection for DetectorConfig {
    const NAME: &'static str = "detector";

    fn validate_attributes(tree: &DynamicValue) -> AttributeResult<Self> {
        Ok(Self {
            detector_name: StringAttribute::new("detector_name").validate(tree)?,
            chosen_labels: LabelConfidenceMap::new().validate(tree)?,
            device: parse_choice(
                StringAttribute::new("detector_device")
                    .with_default(Device::Cpu.to_string())
                    .allowlist(Device::VARIANTS.iter().copied()),
                tree,
            )?,
            enable_debug_tools: BoolAttribute::new("_enable_debug_tools")
                .with_default(false)
                .validate(tree)?,
            path_to_debug_directory: StringAttribute::new("_path_to_debug_directory")
                .validate(tree)?,
            max_size_debug_directory: IntAttribute::new("_max_size_debug_directory")
                .with_default(200)
                .validate(tree)?,
        })
    }
}
