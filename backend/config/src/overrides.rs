//! Environment variable overrides, applied on top of the config file.
//!
//! Unset or empty variables leave the file value alone. The environment is
//! passed in as a map so callers decide whether it is the process env.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::schema::NutrilensConfig;

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND: &str = "NUTRILENS_BIND";
pub const ENV_MAX_UPLOAD_BYTES: &str = "NUTRILENS_MAX_UPLOAD_BYTES";
pub const ENV_VISION_API_KEY: &str = "GOOGLE_VISION_API_KEY";
pub const ENV_VISION_ACCESS_TOKEN: &str = "GOOGLE_VISION_ACCESS_TOKEN";
pub const ENV_VISION_ENDPOINT: &str = "GOOGLE_VISION_ENDPOINT";
pub const ENV_LOG_LEVEL: &str = "NUTRILENS_LOG";
pub const ENV_LOG_DIR: &str = "NUTRILENS_LOG_DIR";
pub const ENV_LOG_JSON: &str = "NUTRILENS_LOG_JSON";

/// Apply every recognized override from `env` to `config`.
pub fn apply_env_overrides(
    mut config: NutrilensConfig,
    env: &HashMap<String, String>,
) -> Result<NutrilensConfig, ConfigError> {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(port) = get(ENV_PORT) {
        config.server.port = parse_var(ENV_PORT, port)?;
    }
    if let Some(bind) = get(ENV_BIND) {
        config.server.bind_address = bind.to_string();
    }
    if let Some(limit) = get(ENV_MAX_UPLOAD_BYTES) {
        config.server.max_upload_bytes = parse_var(ENV_MAX_UPLOAD_BYTES, limit)?;
    }
    if let Some(key) = get(ENV_VISION_API_KEY) {
        config.ocr.api_key = Some(key.to_string());
    }
    if let Some(token) = get(ENV_VISION_ACCESS_TOKEN) {
        config.ocr.access_token = Some(token.to_string());
    }
    if let Some(endpoint) = get(ENV_VISION_ENDPOINT) {
        config.ocr.endpoint = endpoint.to_string();
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.level = level.to_string();
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        config.logging.dir = Some(PathBuf::from(dir));
    }
    if let Some(json) = get(ENV_LOG_JSON) {
        config.logging.json = parse_bool(ENV_LOG_JSON, json)?;
    }

    Ok(config)
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}
