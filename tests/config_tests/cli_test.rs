use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_validate_prints_typed_config() {
    let file = config_file(r#"{"name": "tracker", "attributes": {"max_age_track": 30}}"#);

    Command::cargo_bin("reid-config")
        .unwrap()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_age_track\": 30"));
}

#[test]
fn test_validate_attributes_only() {
    let file = config_file(r#"{"embedder_distance": "manhattan"}"#);

    Command::cargo_bin("reid-config")
        .unwrap()
        .args(["validate", "--attributes-only"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"embedder_distance\": \"manhattan\""));
}

#[test]
fn test_validate_collect_reports_each_section() {
    let file = config_file(
        r#"{"attributes": {"lambda_value": -1, "detector_device": "gpu", "embedder_device": "tpu"}}"#,
    );

    Command::cargo_bin("reid-config")
        .unwrap()
        .args(["validate", "--collect"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tracking configuration"))
        .stderr(predicate::str::contains("Invalid detector configuration"))
        .stderr(predicate::str::contains("Invalid embedder configuration"));
}

#[test]
fn test_deps() {
    let file = config_file(r#"{"attributes": {"detector_name": "vision-1"}}"#);

    Command::cargo_bin("reid-config")
        .unwrap()
        .arg("deps")
        .arg(file.path())
        .assert()
        .success()
        .stdout("vision-1\n");
}
