//! Glue between the loaded configuration and the runtime pieces it drives.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use nutrilens_config::{LoggingConfig, NutrilensConfig, OcrConfig};
use nutrilens_logging::LogOptions;
use nutrilens_understanding::{DisabledOcr, GoogleVisionOcr, OcrProvider, VisionAuth};

/// Snapshot of the process environment (after `.env` has been applied).
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Resolve a config load result. When `lenient`, a failure falls back to the
/// defaults and the error is handed back for logging.
pub fn config_or_default(
    loaded: Result<NutrilensConfig>,
    lenient: bool,
) -> Result<(NutrilensConfig, Option<anyhow::Error>)> {
    match loaded {
        Ok(config) => Ok((config, None)),
        Err(e) if lenient => Ok((NutrilensConfig::default(), Some(e))),
        Err(e) => Err(e),
    }
}

pub fn log_options(logging: &LoggingConfig) -> LogOptions {
    LogOptions {
        level: logging.level.clone(),
        dir: logging.dir.clone(),
        json: logging.json,
    }
}

/// Pick the OCR provider. An API key wins over an access token; with neither,
/// the service still starts but every image request fails.
pub fn build_ocr(ocr: &OcrConfig) -> Result<Arc<dyn OcrProvider>> {
    let non_blank = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let auth = match (non_blank(&ocr.api_key), non_blank(&ocr.access_token)) {
        (Some(key), _) => VisionAuth::ApiKey(key),
        (None, Some(token)) => VisionAuth::BearerToken(token),
        (None, None) => {
            warn!("No Cloud Vision credentials configured; image processing is disabled");
            return Ok(Arc::new(DisabledOcr));
        }
    };

    let vision = GoogleVisionOcr::new(ocr.endpoint.as_str(), auth)
        .with_timeout(Duration::from_secs(ocr.timeout_secs))
        .context("Failed to build Cloud Vision client")?;
    Ok(Arc::new(vision))
}
