//! Config redaction: safe-to-print config snapshots with credentials masked.

use serde_json::Value;

use crate::schema::NutrilensConfig;

/// Keys whose string values are secrets.
const SENSITIVE_KEYS: &[&str] = &["apiKey", "accessToken"];

/// Serialize `config` to JSON with every credential replaced by a short hint.
pub fn redact(config: &NutrilensConfig) -> Value {
    let mut value = serde_json::to_value(config).unwrap_or(Value::Null);
    mask_recursive(&mut value);
    value
}

fn mask_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                    if let Value::String(s) = child {
                        *s = mask(s);
                    }
                } else {
                    mask_recursive(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(mask_recursive),
        _ => {}
    }
}

/// Keep the first four characters as a hint when the secret is long enough.
fn mask(secret: &str) -> String {
    match secret.get(..4) {
        Some(hint) if secret.len() > 8 => format!("{hint}***"),
        _ => "***".to_string(),
    }
}
