//! Cross-origin policy for browser front-ends.
//!
//! Local development origins are matched by prefix, hosted front-ends by
//! domain suffix.

use axum::http::{header, request::Parts, HeaderName, HeaderValue, Method};
use nutrilens_config::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Whether `origin` passes the configured prefix/suffix rules.
/// An empty origin is never allowed.
pub fn is_allowed_origin(origin: &str, rules: &CorsConfig) -> bool {
    if origin.is_empty() {
        return false;
    }
    rules
        .allowed_origin_prefixes
        .iter()
        .any(|prefix| origin.starts_with(prefix.as_str()))
        || rules
            .allowed_origin_suffixes
            .iter()
            .any(|suffix| origin.ends_with(suffix.as_str()))
}

/// Build the CORS layer for the gateway router.
pub fn cors_layer(rules: &CorsConfig) -> CorsLayer {
    let predicate_rules = rules.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| is_allowed_origin(o, &predicate_rules))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(rules.allow_credentials)
}
