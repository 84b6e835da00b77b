//! Top-level tracker configuration.

use crate::config::errors::{AttributeError, FieldPath, SectionError, SectionResult};
use crate::config::section::{ConfigSection, SectionReport};
use crate::config::sections::{DetectorConfig, EmbedderConfig, TrackingConfig};
use crate::config::value::{DynamicValue, Fields, ValueKind};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A service configuration as delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: DynamicValue,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>, attributes: DynamicValue) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

/// Every section of the tracker configuration, validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerConfig {
    pub tracking: TrackingConfig,
    pub detector: DetectorConfig,
    pub embedder: EmbedderConfig,
}

impl TrackerConfig {
    /// Validates every section in order, stopping at the first failing one.
    pub fn from_tree(tree: &DynamicValue) -> SectionResult<Self> {
        check_root(tree)?;
        let config = Self {
            tracking: TrackingConfig::from_tree(tree)?,
            detector: DetectorConfig::from_tree(tree)?,
            embedder: EmbedderConfig::from_tree(tree)?,
        };
        info!(
            detector = ?config.detector.detector_name,
            embedder = ?config.embedder.embedder_name,
            "tracker configuration validated"
        );
        Ok(config)
    }

    /// Validates every section independently and collects the first error of
    /// each failing one.
    pub fn validate_collecting(tree: &DynamicValue) -> SectionReport<Self> {
        if let Err(error) = check_root(tree) {
            return SectionReport::invalid(vec![error]);
        }

        let tracking = TrackingConfig::from_tree(tree);
        let detector = DetectorConfig::from_tree(tree);
        let embedder = EmbedderConfig::from_tree(tree);

        match (tracking, detector, embedder) {
            (Ok(tracking), Ok(detector), Ok(embedder)) => SectionReport::valid(Self {
                tracking,
                detector,
                embedder,
            }),
            (tracking, detector, embedder) => {
                let errors: Vec<SectionError> = [tracking.err(), detector.err(), embedder.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                for error in &errors {
                    warn!(section = %error.section, code = error.source.error_code(), "{}", error.source);
                }
                SectionReport::invalid(errors)
            }
        }
    }

    /// Names of the external resources this configuration refers to.
    pub fn dependencies(&self) -> Vec<String> {
        [&self.detector.detector_name, &self.embedder.embedder_name]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

fn check_root(tree: &DynamicValue) -> SectionResult<()> {
    if tree.as_object().is_some() {
        return Ok(());
    }
    Err(SectionError::new(
        "root",
        AttributeError::TypeMismatch {
            field: FieldPath::root(),
            expected: ValueKind::Object,
            actual: tree.kind(),
        },
    ))
}

/// Validates a service configuration and returns its dependencies.
///
/// This is the hook the host runtime calls before constructing the service.
///
/// A service without an attributes block validates as an empty tree, the same
/// way the loader reads one.
pub fn validate_config(config: &ServiceConfig) -> crate::Result<Vec<String>> {
    let empty = DynamicValue::Object(Fields::new());
    let tree = if config.attributes.is_absent() {
        &empty
    } else {
        &config.attributes
    };
    let tracker = TrackerConfig::from_tree(tree)?;
    Ok(tracker.dependencies())
}
