use std::collections::HashMap;
use std::fs;

use tempfile::NamedTempFile;
use validator::Validate;

use crate::api::models::RecordType;
use crate::api::websupport::DEFAULT_API_URL;
use crate::config::{self, apply_env_overrides, Config, API_KEY_ENV, API_URL_ENV};

const CONFIG: &str = r#"
    api_key: "file_key"
    api_secret: "file_secret"
    api_url: "https://rest.example.test"
    records:
      - zone_name: "example.com"
        type: "A"
        name: "www"
        content: "1.2.3.4"
        ttl: 300
      - zone_name: "example.com"
        type: "SRV"
        name: "_sip._tcp"
        content: "sip.example.com"
        prio: 10
        port: 5060
        weight: 20
        id: "42"
"#;

// Helper function to create test config
fn create_test_config(contents: &str) -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, contents).unwrap();
    temp_file
}

#[test]
fn test_config_deserialization() {
    let config: Config = serde_yaml::from_str(CONFIG).unwrap();

    assert_eq!(config.api_key, "file_key");
    assert_eq!(config.api_secret, "file_secret");
    assert_eq!(config.api_url, "https://rest.example.test");
    assert_eq!(config.records.len(), 2);
    assert_eq!(config.records[0].record_type, RecordType::A);
    assert_eq!(config.records[0].id, None);
    assert_eq!(config.records[1].record_type, RecordType::Srv);
    assert_eq!(config.records[1].id.as_deref(), Some("42"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_config_from_file() {
    let temp_file = create_test_config(CONFIG);

    let config = config::load_config(temp_file.path()).unwrap();
    let credentials = config.credentials();

    assert!(!credentials.api_key.is_empty());
    assert!(!credentials.secret.is_empty());
    assert_eq!(config.records.len(), 2);
}

#[test]
fn test_load_config_missing_file() {
    let err = config::load_config(std::path::Path::new("/nonexistent/websupport.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to open config file"));
}

#[test]
fn test_api_url_defaults() {
    let config: Config = serde_yaml::from_str(
        r#"
            api_key: "key"
            api_secret: "secret"
        "#,
    )
    .unwrap();

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert!(config.records.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_overrides_file_values() {
    let mut config: Config = serde_yaml::from_str(CONFIG).unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        (API_KEY_ENV, "env_key"),
        (API_URL_ENV, "https://rest.websupport.sk"),
    ]);

    apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

    let credentials = config.credentials();
    assert_eq!(credentials.api_key, "env_key");
    assert_eq!(credentials.secret, "file_secret");
    assert_eq!(credentials.base_url, "https://rest.websupport.sk");
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut config: Config = serde_yaml::from_str(CONFIG).unwrap();

    apply_env_overrides(&mut config, |_| Some(String::new()));

    assert_eq!(config.api_key, "file_key");
    assert_eq!(config.api_secret, "file_secret");
}

#[test]
fn test_invalid_config() {
    let invalid_config = r#"
        api_key: "test_key"
        # missing secret
    "#;

    let config: Config = serde_yaml::from_str(invalid_config).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_nested_record() {
    let config: Config = serde_yaml::from_str(
        r#"
            api_key: "key"
            api_secret: "secret"
            records:
              - zone_name: ""
                type: "A"
                name: "www"
                content: "1.2.3.4"
        "#,
    )
    .unwrap();

    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_record_type_fails_to_parse() {
    let result: Result<Config, _> = serde_yaml::from_str(
        r#"
            api_key: "key"
            api_secret: "secret"
            records:
              - zone_name: "example.com"
                type: "CAA"
                name: "@"
                content: "0 issue letsencrypt.org"
        "#,
    );

    assert!(result.is_err());
}
