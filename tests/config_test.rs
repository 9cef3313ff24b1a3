//! Integration tests for settings loading and persistence.

use std::path::Path;

use tmdb_scraper::config::{load_settings, load_settings_or_default, persist, PluginSettings};

#[test]
fn load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "api_key = \"abc123\"\npreferred_language = \"en-US\"\n",
    )
    .unwrap();

    let settings = load_settings(&path).unwrap();
    assert_eq!(settings.api_key, "abc123");
    assert_eq!(settings.preferred_language, "en-US");
}

#[test]
fn load_missing_file_is_an_error() {
    assert!(load_settings(Path::new("/nonexistent/settings.toml")).is_err());
}

#[test]
fn load_or_default_falls_back_to_defaults() {
    // No custom path and no file in any probe location reachable from the
    // test environment's working directory.
    let dir = tempfile::tempdir().unwrap();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let settings = load_settings_or_default(None).unwrap();

    std::env::set_current_dir(original).unwrap();

    assert_eq!(settings.api_key, "");
    assert_eq!(settings.preferred_language, "zh-CN");
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let settings = PluginSettings {
        api_key: "round-trip-key".to_string(),
        preferred_language: "fr-FR".to_string(),
    };
    persist::save_settings(&path, &settings).unwrap();

    let loaded = load_settings(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "api_key = [not valid").unwrap();

    assert!(load_settings(&path).is_err());
}
