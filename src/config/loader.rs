//! Loading configuration trees from JSON.

use crate::config::tracker::ServiceConfig;
use crate::config::value::{DynamicValue, ValueKind};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration root must be an object, got {0}")]
    NotAnObject(ValueKind),
}

pub type LoadResult<T> = Result<T, LoadError>;

fn ensure_object(tree: DynamicValue) -> LoadResult<DynamicValue> {
    match tree {
        DynamicValue::Object(_) => Ok(tree),
        other => Err(LoadError::NotAnObject(other.kind())),
    }
}

/// Parses a bare attribute tree.
pub fn load_tree_from_str(json: &str) -> LoadResult<DynamicValue> {
    ensure_object(serde_json::from_str(json)?)
}

pub fn load_tree_from_file<P: AsRef<Path>>(path: P) -> LoadResult<DynamicValue> {
    debug!(path = %path.as_ref().display(), "loading attribute tree");
    let reader = BufReader::new(File::open(path)?);
    ensure_object(serde_json::from_reader(reader)?)
}

/// Parses a `{"name": ..., "attributes": {...}}` service envelope.
pub fn load_service_config_from_str(json: &str) -> LoadResult<ServiceConfig> {
    let config: ServiceConfig = serde_json::from_str(json)?;
    check_attributes(config)
}

pub fn load_service_config_from_file<P: AsRef<Path>>(path: P) -> LoadResult<ServiceConfig> {
    debug!(path = %path.as_ref().display(), "loading service config");
    let reader = BufReader::new(File::open(path)?);
    let config: ServiceConfig = serde_json::from_reader(reader)?;
    check_attributes(config)
}

// A missing attributes block is an empty tree
fn check_attributes(mut config: ServiceConfig) -> LoadResult<ServiceConfig> {
    if config.attributes.is_absent() {
        config.attributes = DynamicValue::Object(Default::default());
    }
    config.attributes = ensure_object(config.attributes)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_tree_from_str() {
        let tree = load_tree_from_str(r#"{"max_age_track": 10, "crop_region": null}"#).unwrap();
        assert_eq!(tree.get("max_age_track"), Some(&DynamicValue::Number(10.0)));
        assert_eq!(tree.get("crop_region"), Some(&DynamicValue::Absent));
    }

    #[test]
    fn test_load_tree_rejects_non_object_root() {
        assert!(matches!(
            load_tree_from_str("[1, 2, 3]"),
            Err(LoadError::NotAnObject(ValueKind::List))
        ));
        assert!(matches!(load_tree_from_str("{not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_service_config_envelope() {
        let config = load_service_config_from_str(
            r#"{"name": "tracker", "attributes": {"detector_name": "vision-1"}}"#,
        )
        .unwrap();
        assert_eq!(config.name, "tracker");
        assert_eq!(
            config.attributes.get("detector_name").and_then(DynamicValue::as_str),
            Some("vision-1")
        );
    }

    #[test]
    fn test_load_service_config_without_attributes() {
        let config = load_service_config_from_str(r#"{"name": "tracker"}"#).unwrap();
        assert_eq!(config.attributes, DynamicValue::Object(Default::default()));

        assert!(matches!(
            load_service_config_from_str(r#"{"name": "tracker", "attributes": "oops"}"#),
            Err(LoadError::NotAnObject(ValueKind::String))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_tree_from_file("/definitely/not/here.json"),
            Err(LoadError::Io(_))
        ));
    }
}
