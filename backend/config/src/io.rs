//! Config file discovery and loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::env::resolve_env_vars;
use crate::error::ConfigError;
use crate::schema::NutrilensConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Env var naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "NUTRILENS_CONFIG";

/// Resolve the NutriLens config directory: `<platform config dir>/nutrilens`,
/// falling back to `.nutrilens` in the working directory.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("nutrilens"))
        .unwrap_or_else(|| PathBuf::from(".nutrilens"))
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Pick the config file: explicit path, then `NUTRILENS_CONFIG`, then the
/// default location.
pub fn resolve_config_path(explicit: Option<&Path>, env: &HashMap<String, String>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = env.get(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }
    config_file_path(&config_dir())
}

/// Load and parse the config from disk, substituting `${VAR}` references.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<NutrilensConfig, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(NutrilensConfig::default());
    }

    let raw = fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config_str(&raw, env).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse a YAML config document held in memory.
pub fn parse_config_str(
    raw: &str,
    env: &HashMap<String, String>,
) -> Result<NutrilensConfig, ConfigError> {
    let to_parse_error = |source| ConfigError::Parse {
        path: PathBuf::from("<memory>"),
        source,
    };

    let value: Value = serde_yaml::from_str(raw).map_err(to_parse_error)?;
    // An empty file parses as null.
    if value.is_null() {
        return Ok(NutrilensConfig::default());
    }
    let value = resolve_env_vars(&value, env)?;
    serde_yaml::from_value(value).map_err(to_parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = parse_config_str("", &HashMap::new()).unwrap();
        assert_eq!(cfg, NutrilensConfig::default());
    }

    #[test]
    fn substitutes_before_deserializing() {
        let raw = "server:\n  bindAddress: 127.0.0.1\nocr:\n  apiKey: ${GOOGLE_VISION_API_KEY}\n";
        let cfg = parse_config_str(raw, &env(&[("GOOGLE_VISION_API_KEY", "k-123")])).unwrap();
        assert_eq!(cfg.server.bind_address, "127.0.0.1");
        assert_eq!(cfg.ocr.api_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = parse_config_str("server:\n  port: lots\n", &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("/etc/nutrilens.yaml");
        let env = env(&[(ENV_CONFIG_PATH, "/tmp/other.yaml")]);
        assert_eq!(resolve_config_path(Some(&explicit), &env), explicit);
        assert_eq!(
            resolve_config_path(None, &env),
            PathBuf::from("/tmp/other.yaml")
        );
        assert!(resolve_config_path(None, &HashMap::new()).ends_with("config.yaml"));
    }

    #[tokio::test]
    async fn missing_file_is_default() {
        let path = std::env::temp_dir().join("nutrilens-does-not-exist/config.yaml");
        let cfg = load_config(&path, &HashMap::new()).await.unwrap();
        assert_eq!(cfg, NutrilensConfig::default());
    }

    #[tokio::test]
    async fn loads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("nutrilens-config-{}.yaml", std::process::id()));
        fs::write(&path, "server:\n  port: 7070\nlogging:\n  json: true\n")
            .await
            .unwrap();
        let cfg = load_config(&path, &HashMap::new()).await.unwrap();
        let _ = fs::remove_file(&path).await;
        assert_eq!(cfg.server.port, 7070);
        assert!(cfg.logging.json);
    }
}
