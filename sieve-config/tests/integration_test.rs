//! Integration tests for sieve-config

use sieve_config::*;
use std::io::Write;

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "throw_on_failure = true").unwrap();
    writeln!(file, "verification_timeout_secs = 5").unwrap();

    let manager = ConfigManager::new();
    manager.load_file(file.path()).unwrap();

    assert!(manager.get_bool("throw_on_failure").unwrap());
    assert_eq!(manager.get::<u64>("verification_timeout_secs").unwrap(), 5);
}

#[test]
fn test_load_json_file_overrides_earlier_values() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"use_ambient_request_data": true}}"#).unwrap();

    let manager = ConfigManager::new();
    manager.set("use_ambient_request_data", false).unwrap();
    manager.load_file(file.path()).unwrap();

    assert!(manager.get_bool("use_ambient_request_data").unwrap());
}

#[test]
fn test_load_env_file_with_explicit_format() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "VERIFICATION_MAX_REDIRECTS=3").unwrap();

    let manager = ConfigManager::new();
    manager.load_file_as(file.path(), FileFormat::Env).unwrap();

    assert_eq!(manager.get::<usize>("verification_max_redirects").unwrap(), 3);
}

#[test]
fn test_unknown_extension_is_rejected() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    let manager = ConfigManager::new();

    assert!(matches!(
        manager.load_file(file.path()),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_missing_key_error() {
    let manager = ConfigManager::with_prefix(ENV_PREFIX);
    assert!(matches!(
        manager.get::<String>("nothing_here"),
        Err(ConfigError::KeyNotFound(_))
    ));
}
