//! Integration tests for Settings loading from a global config file.
//!
//! These tests pass the global config path explicitly and run without
//! TREESTORE_* variables, so they exercise defaults plus the file layer.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use treestore::config::Settings;
use treestore::{ApplicationError, InputFormat};

#[test]
fn given_missing_global_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_with_global(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treestore.toml");
    fs::write(
        &path,
        r#"
default_file = "/data/items.toml"
format = "toml"
show_type = false
"#,
    )
    .unwrap();

    let settings = Settings::load_with_global(Some(&path)).expect("load settings");

    assert_eq!(settings.default_file, Some(PathBuf::from("/data/items.toml")));
    assert_eq!(settings.format, InputFormat::Toml);
    assert!(!settings.show_type);
}

#[test]
fn given_partial_global_config_when_load_then_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treestore.toml");
    fs::write(&path, "format = \"json\"\n").unwrap();

    let settings = Settings::load_with_global(Some(&path)).unwrap();

    assert_eq!(settings.format, InputFormat::Json);
    assert!(settings.show_type);
    assert!(settings.default_file.is_none());
}

#[test]
fn given_malformed_global_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treestore.toml");
    fs::write(&path, "format = [unclosed").unwrap();

    let err = Settings::load_with_global(Some(&path)).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}
