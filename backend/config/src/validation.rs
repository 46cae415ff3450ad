//! Config validation with user-friendly error messages.

use crate::schema::NutrilensConfig;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &NutrilensConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_cors(config, &mut report);
    validate_ocr(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &NutrilensConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.port == 0 {
        report.error("server.port", "port must be between 1 and 65535");
    }
    if server.bind_address.trim().is_empty() {
        report.error("server.bindAddress", "bind address cannot be empty");
    }
    if server.max_upload_bytes == 0 {
        report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
    }
}

fn validate_cors(config: &NutrilensConfig, report: &mut ValidationReport) {
    let cors = &config.cors;
    if cors.allowed_origin_prefixes.is_empty() && cors.allowed_origin_suffixes.is_empty() {
        report.warn("cors", "No allowed origins; browsers will be refused cross-origin access");
    }
    for (i, prefix) in cors.allowed_origin_prefixes.iter().enumerate() {
        if !prefix.starts_with("http://") && !prefix.starts_with("https://") {
            report.error(
                format!("cors.allowedOriginPrefixes[{i}]"),
                format!("'{prefix}' must start with http:// or https://"),
            );
        }
    }
    for (i, suffix) in cors.allowed_origin_suffixes.iter().enumerate() {
        if suffix.trim().is_empty() {
            report.error(
                format!("cors.allowedOriginSuffixes[{i}]"),
                "suffix cannot be empty (it would allow every origin)",
            );
        }
    }
}

fn validate_ocr(config: &NutrilensConfig, report: &mut ValidationReport) {
    let ocr = &config.ocr;
    if !ocr.endpoint.starts_with("http://") && !ocr.endpoint.starts_with("https://") {
        report.error("ocr.endpoint", format!("'{}' is not an http(s) URL", ocr.endpoint));
    }
    if ocr.timeout_secs == 0 {
        report.error("ocr.timeoutSecs", "timeoutSecs must be > 0");
    }
    if !ocr.has_credentials() {
        report.warn(
            "ocr",
            "No apiKey or accessToken configured; /process-image requests will fail",
        );
    }
}

fn validate_logging(config: &NutrilensConfig, report: &mut ValidationReport) {
    let level = config.logging.level.to_ascii_lowercase();
    // Plain levels only; full filter directives (`nutrilens=debug`) are passed through.
    if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
        report.warn(
            "logging.level",
            format!("Unknown log level '{}'; use one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> NutrilensConfig {
        let mut cfg = NutrilensConfig::default();
        cfg.ocr.api_key = Some("key".to_string());
        cfg
    }

    #[test]
    fn default_config_is_valid_but_warns_about_credentials() {
        let report = validate(&NutrilensConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.iter().any(|w| w.path == "ocr"));
    }

    #[test]
    fn configured_default_has_no_warnings() {
        let report = validate(&with_key());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn zero_port_and_limit_are_errors() {
        let mut cfg = with_key();
        cfg.server.port = 0;
        cfg.server.max_upload_bytes = 0;
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["server.port", "server.maxUploadBytes"]);
    }

    #[test]
    fn bad_endpoint_is_error() {
        let mut cfg = with_key();
        cfg.ocr.endpoint = "vision.googleapis.com".to_string();
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "ocr.endpoint");
    }

    #[test]
    fn empty_suffix_is_error() {
        let mut cfg = with_key();
        cfg.cors.allowed_origin_suffixes.push(String::new());
        let report = validate(&cfg);
        assert!(report.errors[0].path.starts_with("cors.allowedOriginSuffixes"));
    }

    #[test]
    fn unknown_log_level_warns_but_directives_pass() {
        let mut cfg = with_key();
        cfg.logging.level = "loud".to_string();
        assert_eq!(validate(&cfg).warnings.len(), 1);

        cfg.logging.level = "nutrilens_gateway=debug,info".to_string();
        assert!(validate(&cfg).warnings.is_empty());
    }
}
