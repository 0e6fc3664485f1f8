//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test that missing `.env` files are silently ignored.
//! - Test that invalid `.env` files return errors without leaking secrets.
//! - Test that `DOTENV_DISABLED=1`/`true` skips dotenv loading.
//! - Test the override flag against already-set variables.

use std::fs;
use tempfile::TempDir;

use super::create_test_env_file;
use crate::env::MapEnv;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::param::Str;
use crate::schema::Schema;

fn service_schema() -> Schema {
    Schema::new("Service").field("SERVICE_VAR", Str::new())
}

#[test]
fn test_missing_dotenv_is_ok() {
    let temp_dir = TempDir::new().unwrap();

    let result = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new())
        .with_env_file(temp_dir.path().join("missing.env"))
        .with_verbose(true)
        .load();

    let config = result.expect("Missing .env file should be silently ignored");
    assert!(config.is_empty());
}

#[test]
fn test_valid_dotenv_is_merged() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_env_file(&temp_dir);

    let config = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new())
        .with_env_file(&path)
        .load()
        .unwrap();

    assert_eq!(config.get_as::<String>("SERVICE_VAR").unwrap(), "my-app");
}

#[test]
fn test_dont_override() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_env_file(&temp_dir);

    let config = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new().with("SERVICE_VAR", "booking"))
        .with_env_file(&path)
        .load()
        .unwrap();

    assert_eq!(config.get_as::<String>("SERVICE_VAR").unwrap(), "booking");
}

#[test]
fn test_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_env_file(&temp_dir);

    let config = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new().with("SERVICE_VAR", "booking"))
        .with_env_file(&path)
        .with_override_existing(true)
        .load()
        .unwrap();

    assert_eq!(config.get_as::<String>("SERVICE_VAR").unwrap(), "my-app");
}

#[test]
fn test_invalid_dotenv_returns_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    let result = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new())
        .with_env_file(&path)
        .load();

    match result {
        Err(ConfigError::DotenvParse { .. }) => {}
        Err(other) => panic!(
            "Invalid .env should return DotenvParse error, got {}",
            other
        ),
        Ok(_) => panic!("Invalid .env should return DotenvParse error, got Ok"),
    }
}

#[test]
fn test_dotenv_parse_error_does_not_leak_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    let secret = "super-secret-password-12345";
    fs::write(&path, format!("VALID=1\nBROKEN {secret}\n")).unwrap();

    let err = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new())
        .with_env_file(&path)
        .load()
        .unwrap_err();

    let message = err.to_string();
    assert!(
        !message.contains(secret),
        "Error message leaked secret: {message}"
    );
    assert!(message.contains("DOTENV_DISABLED"));
}

#[test]
fn test_dotenv_disabled_skips_loading() {
    for flag in ["1", "true"] {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_env_file(&temp_dir);

        let loader = ConfigLoader::new(service_schema())
            .with_env(MapEnv::new().with("DOTENV_DISABLED", flag))
            .with_env_file(&path);
        let config = loader.load().unwrap();

        assert!(
            !config.contains("SERVICE_VAR"),
            "DOTENV_DISABLED={flag} should skip the file"
        );
    }
}

#[test]
fn test_dotenv_disabled_other_values_still_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_env_file(&temp_dir);

    let config = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new().with("DOTENV_DISABLED", "0"))
        .with_env_file(&path)
        .load()
        .unwrap();

    assert!(config.contains("SERVICE_VAR"));
}

#[test]
fn test_load_dotenv_updates_injected_env() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_env_file(&temp_dir);

    let mut loader = ConfigLoader::new(service_schema())
        .with_env(MapEnv::new())
        .with_env_file(&path);
    loader.load_dotenv().unwrap();

    assert_eq!(loader.env().get("TEST_VAR"), Some("123"));
    assert_eq!(loader.env().get("SET_THIS_VAR"), Some("env"));
}
