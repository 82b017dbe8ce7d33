pub mod models;

pub use models::Config;

use anyhow::{Context, Result};
use std::{borrow::Cow, fs::File, io::Read, path::Path};
use validator::Validate;

pub const API_KEY_ENV: &str = "WEBSUPPORTSK_API_KEY";
pub const API_SECRET_ENV: &str = "WEBSUPPORTSK_API_SECRET";
pub const API_URL_ENV: &str = "WEBSUPPORTSK_API_URL";

/// Loads `config_file`, applies `WEBSUPPORTSK_*` environment overrides and validates the result.
pub fn load_config(config_file: &Path) -> Result<Config> {
    let mut file = File::open(config_file)
        .with_context(|| format!("Failed to open config file: {}", config_file.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("Failed to read config file: {}", config_file.display()))?;

    let mut config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", config_file.display()))?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", config_file.display()))?;
    Ok(config)
}

/// Builds a config from the environment alone, with no declared records.
pub fn config_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
        .validate()
        .context("Invalid configuration from environment")?;
    Ok(config)
}

/// Environment values, when set and non-empty, take precedence over the file.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(key) = non_empty(API_KEY_ENV) {
        config.api_key = Cow::Owned(key);
    }
    if let Some(secret) = non_empty(API_SECRET_ENV) {
        config.api_secret = Cow::Owned(secret);
    }
    if let Some(url) = non_empty(API_URL_ENV) {
        config.api_url = Cow::Owned(url);
    }
}
