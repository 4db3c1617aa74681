//! CLI integration tests
//!
//! These tests run the built binary against the schema fixtures.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

fn kenmerk_flatten_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kenmerk-flatten"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_str().unwrap().to_string()
}

#[test]
fn test_cli_edn_output() {
    let output = Command::new(kenmerk_flatten_bin())
        .arg(fixture("rio_subset.xsd"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "conversion should succeed");
    assert!(stdout.starts_with("{\"AangebodenHOOpleiding\" ["));
    assert!(stdout.contains(
        r#"{:name "niveau", :kenmerk false, :cardinality :required, :type "duo:NiveauType"}"#
    ));
    assert!(stdout.contains(
        r#"{:cardinality :required, :type "duo:Opleidingseenheid", :ref "opleidingseenheid"}"#
    ));
    assert!(stdout.contains(":cardinality [2 5]"));
    assert!(stdout.contains("\"ParticuliereOpleidingPeriode\" []}"));
    assert!(!stdout.contains(":kenmerklist"), "placeholders must be substituted");
}

#[test]
fn test_cli_json_output() {
    let output = Command::new(kenmerk_flatten_bin())
        .args(["--format", "json", &fixture("rio_subset.xsd")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "json conversion should succeed");

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");

    let entities = json.as_object().unwrap();
    assert_eq!(entities.len(), 17);
    assert_eq!(
        entities.keys().next().map(String::as_str),
        Some("AangebodenHOOpleiding")
    );

    let ho = json["HoOpleiding"].as_array().unwrap();
    assert_eq!(ho.len(), 6);
    assert_eq!(ho[4]["name"], "deficientie");
    assert_eq!(ho[4]["kenmerk"], true);
    assert_eq!(ho[4]["cardinality"], "optional");
}

#[test]
fn test_cli_entity_selection() {
    let output = Command::new(kenmerk_flatten_bin())
        .args([
            "--format",
            "json",
            "--compact",
            "--entity",
            "HoOpleidingPeriode",
            "--entity",
            "Onbekend",
            &fixture("rio_subset.xsd"),
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 1);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["HoOpleidingPeriode"][2]["cardinality"], "zero_or_more");
    assert_eq!(json["Onbekend"], serde_json::json!([]));
}

#[test]
fn test_cli_shape_error() {
    let output = Command::new(kenmerk_flatten_bin())
        .arg(fixture("bad_shape.xsd"))
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "shape violations are fatal");
    assert!(output.stdout.is_empty(), "no partial output");
    assert!(stderr.contains("more than one structural child"));
    assert!(stderr.contains("HoOpleiding"));
}

#[test]
fn test_cli_lazy_skips_unrequested_types() {
    let output = Command::new(kenmerk_flatten_bin())
        .args(["--lazy", "--entity", "Anders", &fixture("bad_shape.xsd")])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "unrequested broken types are not reduced");
    assert_eq!(stdout.trim(), "{\"Anders\" []}");
}

#[test]
fn test_cli_missing_file() {
    let output = Command::new(kenmerk_flatten_bin())
        .arg(fixture("does_not_exist.xsd"))
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Failed to read file"));
}
