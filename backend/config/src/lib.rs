//! `nutrilens-config`: NutriLens service configuration.
//!
//! Provides:
//! - Typed config schema with defaults for every field
//! - Optional YAML config file with `${ENV_VAR}` substitution
//! - Environment variable overrides (`PORT`, `GOOGLE_VISION_API_KEY`, ...)
//! - Config redaction for safe display
//! - Validation with errors and warnings

pub mod env;
pub mod error;
pub mod io;
pub mod overrides;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::resolve_env_vars;
pub use error::ConfigError;
pub use io::{config_dir, config_file_path, load_config, parse_config_str, resolve_config_path};
pub use overrides::apply_env_overrides;
pub use redact::redact;
pub use schema::{CorsConfig, LoggingConfig, NutrilensConfig, OcrConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load the config file (if any) and apply env overrides. No validation.
pub async fn load_effective(
    explicit_path: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<NutrilensConfig> {
    let path = resolve_config_path(explicit_path, env);
    let config = load_config(&path, env).await?;
    Ok(apply_env_overrides(config, env)?)
}

/// Log every warning and error in the report; fail if there are errors.
pub fn ensure_valid(config: &NutrilensConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.first() {
        bail!("configuration has {} error(s); first: {}", report.errors.len(), first);
    }
    Ok(())
}

/// Load the config file (if any), apply env overrides, and validate.
///
/// This is the main entry point for loading a config at runtime. Warnings are
/// logged; any validation error aborts.
pub async fn load_and_prepare(
    explicit_path: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<NutrilensConfig> {
    let config = load_effective(explicit_path, env).await?;
    ensure_valid(&config)?;
    Ok(config)
}
