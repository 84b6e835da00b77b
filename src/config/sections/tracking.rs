//! Tracking section: track lifetime, matching thresholds and the optional
//! crop region.
//!
//! Every field has a default, so an empty tree is a valid tracking section.
//! The crop region is the exception: it is optional, but once present all
//! four corners are required and must lie in `[0, 1]`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use reid_config::config::{ConfigSection, DynamicValue, TrackingConfig};
//! use serde_json::json;
//!
//! let tree = DynamicValue::from(json!({
//!     "max_age_track": 300,
//!     "crop_region": { "x1_rel": 0.0, "y1_rel": 0.1, "x2_rel": 1.0, "y2_rel": 0.9 }
//! }));
//! let tracking = TrackingConfig::from_tree(&tree)?;
//! assert_eq!(tracking.max_age_track, 300);
//! assert_eq!(tracking.lambda_value, 0.0005);
//! ```

use crate::config::attribute::{BoolAttribute, FloatAttribute, IntAttribute};
use crate::config::composite::ObjectAttribute;
use crate::config::errors::AttributeResult;
use crate::config::schema::Record;
use crate::config::section::ConfigSection;
use crate::config::value::DynamicValue;
use serde::Serialize;

/// Tracking parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingConfig {
    /// Decay constant applied to track feature history.
    pub lambda_value: f64,
    /// Frames a track survives without a match.
    pub max_age_track: i64,
    /// Minimum embedding similarity for a match.
    pub embedder_threshold: f64,
    /// Polling frequency of the background loop, in Hz.
    pub max_frequency: f64,
    pub start_background_loop: bool,
    pub crop_region: Option<CropRegion>,
}

/// Rectangular crop, in coordinates relative to the frame size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRegion {
    pub x1_rel: f64,
    pub y1_rel: f64,
    pub x2_rel: f64,
    pub y2_rel: f64,
}

impl CropRegion {
    pub const FIELDS: [&'static str; 4] = ["x1_rel", "y1_rel", "x2_rel", "y2_rel"];

    pub fn attribute() -> ObjectAttribute {
        Self::FIELDS.iter().fold(ObjectAttribute::new("crop_region"), |attr, name| {
            attr.field(FloatAttribute::new(*name).required().range(0.0, 1.0))
        })
    }

    // Every field is required and numeric, so a validated record always has all four
    fn from_record(record: &Record) -> Self {
        let get = |name: &str| record.get_f64(name).unwrap_or_default();
        Self {
            x1_rel: get("x1_rel"),
            y1_rel: get("y1_rel"),
            x2_rel: get("x2_rel"),
            y2_rel: get("y2_rel"),
        }
    }
}

impl ConfigSection for TrackingConfig {
    const NAME: &'static str = "tracking";

    fn validate_attributes(tree: &DynamicValue) -> AttributeResult<Self> {
        Ok(Self {
            lambda_value: FloatAttribute::new("lambda_value")
                .range(0.0, 1.0)
                .with_default(0.0005)
                .validate(tree)?,
            max_age_track: IntAttribute::new("max_age_track")
                .min(0)
                .max(100_000)
                .with_default(1000)
                .validate(tree)?,
            embedder_threshold: FloatAttribute::new("embedder_threshold")
                .range(0.0, 1.0)
                .with_default(0.3)
                .validate(tree)?,
            max_frequency: FloatAttribute::new("max_frequency_hz")
                .range(0.1, 100.0)
                .with_default(10.0)
                .validate(tree)?,
            start_background_loop: BoolAttribute::new("_start_background_loop")
                .with_default(true)
                .validate(tree)?,
            crop_region: CropRegion::attribute()
                .validate(tree)?
                .as_ref()
                .map(CropRegion::from_record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::errors::{AttributeError, Bound};
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = TrackingConfig::from_tree(&DynamicValue::from(json!({}))).unwrap();

        assert_eq!(config.lambda_value, 0.0005);
        assert_eq!(config.max_age_track, 1000);
        assert_eq!(config.embedder_threshold, 0.3);
        assert_eq!(config.max_frequency, 10.0);
        assert!(config.start_background_loop);
        assert_eq!(config.crop_region, None);
    }

    #[test]
    fn test_crop_region() {
        let tree = DynamicValue::from(json!({
            "crop_region": { "x1_rel": 0.1, "y1_rel": 0.2, "x2_rel": 0.9, "y2_rel": 0.8 }
        }));

        let config = TrackingConfig::from_tree(&tree).unwrap();
        assert_eq!(
            config.crop_region,
            Some(CropRegion {
                x1_rel: 0.1,
                y1_rel: 0.2,
                x2_rel: 0.9,
                y2_rel: 0.8
            })
        );
    }

    #[test]
    fn test_crop_region_out_of_range() {
        let tree = DynamicValue::from(json!({
            "crop_region": { "x1_rel": 1.5, "y1_rel": 0.2, "x2_rel": 0.9, "y2_rel": 0.8 }
        }));

        let err = TrackingConfig::from_tree(&tree).unwrap_err();
        assert_eq!(err.section, "tracking");
        assert_eq!(
            err.source,
            AttributeError::range_violation("x1_rel", Bound::Max, 1.0, 1.5).with_parent("crop_region")
        );
    }

    #[test]
    fn test_crop_region_missing_corner() {
        let tree = DynamicValue::from(json!({
            "crop_region": { "x1_rel": 0.1, "y1_rel": 0.2, "x2_rel": 0.9 }
        }));

        let err = TrackingConfig::from_tree(&tree).unwrap_err();
        assert_eq!(
            err.source,
            AttributeError::missing_required("y2_rel").with_parent("crop_region")
        );
    }

    #[test]
    fn test_max_frequency_reads_hz_key() {
        let tree = DynamicValue::from(json!({ "max_frequency_hz": 0.5 }));
        assert_eq!(TrackingConfig::from_tree(&tree).unwrap().max_frequency, 0.5);

        let tree = DynamicValue::from(json!({ "max_frequency_hz": 0.01 }));
        let err = TrackingConfig::from_tree(&tree).unwrap_err();
        assert_eq!(err.field().leaf(), Some("max_frequency_hz"));
    }

    #[test]
    fn test_max_age_track_must_be_integer() {
        let tree = DynamicValue::from(json!({ "max_age_track": 10.5 }));
        let err = TrackingConfig::from_tree(&tree).unwrap_err();
        assert_eq!(err.source, AttributeError::not_an_integer("max_age_track", 10.5));
    }
}
