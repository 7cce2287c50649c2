// tests/error_handling.rs

use std::io::Write;
use tempfile::NamedTempFile;
use stepdag::config::load_and_validate;
use stepdag::dag::GraphBuilder;
use stepdag::errors::StepdagError;
use stepdag::input::{load_constraints, parse_constraints};

#[test]
fn test_cyclic_records_return_structured_error() {
    let constraints = parse_constraints(
        "Step A must be finished before step B can begin.\n\
         Step B must be finished before step A can begin.\n",
    )
    .unwrap();

    match GraphBuilder::from_constraints(constraints).build() {
        Err(StepdagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("A") || msg.contains("B"));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_malformed_record_reports_line_number() {
    let result = parse_constraints(
        "Step A must be finished before step B can begin.\n\
         \n\
         Step B must finish before step C.\n",
    );

    match result {
        Err(StepdagError::Parse { line, message }) => {
            assert_eq!(line, 3);
            assert!(message.contains("Step B must finish"));
        }
        Err(e) => panic!("Expected Parse error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_lowercase_step_is_rejected() {
    let result = parse_constraints("Step a must be finished before step B can begin.");

    match result {
        Err(StepdagError::Parse { line, message }) => {
            assert_eq!(line, 1);
            assert!(message.contains("'a'"));
        }
        Err(e) => panic!("Expected Parse error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_input_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_constraints(dir.path().join("missing.txt"));

    assert!(matches!(result, Err(StepdagError::IoError(_))));
}

#[test]
fn test_zero_workers_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[scheduler]
workers = 0
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(StepdagError::ConfigError(msg)) => {
            assert!(msg.contains("workers"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_preset_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[scheduler]
preset = "turbo"
"#
    )
    .unwrap();

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(StepdagError::TomlError(_))));
}
