//! End-to-end validation of full tracker configurations.

use pretty_assertions::assert_eq;
use reid_config::config::{
    AttributeError, Bound, ConfigSection, CropRegion, DetectorConfig, Device, DistanceMetric,
    DynamicValue, EmbedderConfig, TrackerConfig, TrackingConfig, ValueKind,
};
use serde_json::json;
use std::collections::HashMap;

fn tree(value: serde_json::Value) -> DynamicValue {
    DynamicValue::from(value)
}

#[test]
fn test_full_configuration() {
    let config = TrackerConfig::from_tree(&tree(json!({
        "lambda_value": 0.001,
        "max_age_track": 500,
        "embedder_threshold": 0.45,
        "max_frequency_hz": 5,
        "_start_background_loop": false,
        "crop_region": { "x1_rel": 0.1, "y1_rel": 0.2, "x2_rel": 0.9, "y2_rel": 0.8 },
        "detector_name": "vision-1",
        "chosen_labels": { "person": 0.3, "car": 0.6 },
        "detector_device": "cuda",
        "embedder_model": "osnet",
        "embedder_distance": "euclidean",
        "embedder_device": "cpu"
    })))
    .unwrap();

    assert_eq!(
        config.tracking,
        TrackingConfig {
            lambda_value: 0.001,
            max_age_track: 500,
            embedder_threshold: 0.45,
            max_frequency: 5.0,
            start_background_loop: false,
            crop_region: Some(CropRegion {
                x1_rel: 0.1,
                y1_rel: 0.2,
                x2_rel: 0.9,
                y2_rel: 0.8,
            }),
        }
    );
    assert_eq!(
        config.detector,
        DetectorConfig {
            detector_name: Some("vision-1".to_string()),
            chosen_labels: Some(HashMap::from([
                ("person".to_string(), 0.3),
                ("car".to_string(), 0.6),
            ])),
            device: Device::Cuda,
            enable_debug_tools: false,
            path_to_debug_directory: None,
            max_size_debug_directory: 200,
        }
    );
    assert_eq!(config.embedder.embedder_distance, DistanceMetric::Euclidean);
    assert_eq!(config.embedder.device, Device::Cpu);
    assert_eq!(config.dependencies(), ["vision-1", "osnet"]);
}

#[test]
fn test_sections_validate_independently() {
    // A broken detector section does not stop other sections from validating
    let tree = tree(json!({ "detector_device": "gpu", "max_age_track": 12 }));

    assert_eq!(TrackingConfig::from_tree(&tree).unwrap().max_age_track, 12);
    assert!(EmbedderConfig::from_tree(&tree).is_ok());

    let err = DetectorConfig::from_tree(&tree).unwrap_err();
    assert_eq!(err.section, "detector");
    assert_eq!(
        err.source,
        AttributeError::invalid_choice(
            "detector_device",
            "gpu",
            &["cpu".to_string(), "cuda".to_string()]
        )
    );

    // ...but the configuration as a whole is invalid
    let report = TrackerConfig::validate_collecting(&tree);
    assert!(report.has_errors());
    assert_eq!(report.errors().len(), 1);
    assert!(report.into_result().is_err());
}

#[test]
fn test_error_within_section_is_first_declared() {
    // lambda_value is declared before max_age_track, both are invalid
    let err = TrackerConfig::from_tree(&tree(json!({
        "max_age_track": -1,
        "lambda_value": 5
    })))
    .unwrap_err();

    assert_eq!(
        err.source,
        AttributeError::range_violation("lambda_value", Bound::Max, 1.0, 5.0)
    );
}

#[test]
fn test_wrong_kinds_are_reported_with_actual_kind() {
    let err = TrackerConfig::from_tree(&tree(json!({ "_start_background_loop": "true" })))
        .unwrap_err();
    assert_eq!(
        err.source,
        AttributeError::type_mismatch("_start_background_loop", ValueKind::Bool, ValueKind::String)
    );

    let err = TrackerConfig::from_tree(&tree(json!({ "detector_name": ["a"] }))).unwrap_err();
    assert_eq!(
        err.source,
        AttributeError::type_mismatch("detector_name", ValueKind::String, ValueKind::List)
    );
}

#[test]
fn test_serialized_output_uses_wire_names_for_choices() {
    let config = TrackerConfig::from_tree(&tree(json!({}))).unwrap();
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["detector"]["device"], "cpu");
    assert_eq!(json["embedder"]["device"], "cuda");
    assert_eq!(json["embedder"]["embedder_distance"], "cosine");
    assert_eq!(json["tracking"]["crop_region"], serde_json::Value::Null);
}

#[test]
fn test_validation_from_many_threads() {
    let tree = std::sync::Arc::new(tree(json!({ "max_age_track": 42, "detector_name": "v" })));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = tree.clone();
            std::thread::spawn(move || TrackerConfig::from_tree(&tree))
        })
        .collect();

    for handle in handles {
        let config = handle.join().unwrap().unwrap();
        assert_eq!(config.tracking.max_age_track, 42);
    }
}
