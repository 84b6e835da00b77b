use reid_config::config::{
    load_service_config_from_file, load_tree_from_file, validate_config, LoadError,
    TrackerConfig, ValueKind,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_validate_service_config() {
    let file = write_temp(
        r#"{
            "name": "person-tracker",
            "attributes": {
                "detector_name": "vision-1",
                "embedder_model": "osnet",
                "chosen_labels": { "person": 0.5 }
            }
        }"#,
    );

    let config = load_service_config_from_file(file.path()).unwrap();
    assert_eq!(config.name, "person-tracker");
    assert_eq!(validate_config(&config).unwrap(), ["vision-1", "osnet"]);
}

#[test]
fn test_load_bare_tree() {
    let file = write_temp(r#"{ "max_age_track": 7 }"#);

    let tree = load_tree_from_file(file.path()).unwrap();
    let config = TrackerConfig::from_tree(&tree).unwrap();
    assert_eq!(config.tracking.max_age_track, 7);
}

#[test]
fn test_load_rejects_non_object_tree() {
    let file = write_temp("42");
    assert!(matches!(
        load_tree_from_file(file.path()),
        Err(LoadError::NotAnObject(ValueKind::Number))
    ));
}
