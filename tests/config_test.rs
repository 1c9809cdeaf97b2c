//! Configuration loading tests

use std::io::Write;
use tempfile::NamedTempFile;

use tianxing::config::{Config, DEFAULT_BASE_URL};

#[test]
fn test_from_file_full() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[provider]
api_key = "filekey"
base_url = "https://apis.tianapi.com"
request_timeout_secs = 10

[cache]
ttl_secs = 1800

[poll]
interval_hours = 12

[logging]
level = "debug"
format = "json"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.provider.api_key, "filekey");
    assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.cache.ttl_secs, 1800);
    assert_eq!(config.poll.interval_hours, 12);
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_missing() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/tianxing.toml"));
    assert!(err.is_err());
}

#[test]
fn test_from_file_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "this is not toml [[[").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_roundtrip_through_toml() {
    let mut config = Config::default();
    config.provider.api_key = String::from("roundtrip");

    let serialized = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed.provider.api_key, "roundtrip");
    assert_eq!(parsed.cache.ttl_secs, config.cache.ttl_secs);
}
