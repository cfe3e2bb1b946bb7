//! Settings redaction: mask secret values before they are logged or displayed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::SettingsDocument;

/// Keys holding credentials.
static SENSITIVE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(token|secret|password|api_key|apikey)").unwrap());

pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEY.is_match(key)
}

/// Mask `value` if `key` names a credential.
///
/// Keeps the first 4 characters as a hint; short or empty secrets are fully masked.
pub fn redact_value(key: &str, value: &Value) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            let hint = if s.chars().count() > 4 {
                format!("{}***", s.chars().take(4).collect::<String>())
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        other => other.clone(),
    }
}

/// Copy of `doc` with every sensitive value masked.
pub fn redact_document(doc: &SettingsDocument) -> SettingsDocument {
    doc.iter()
        .map(|(key, value)| (key.clone(), redact_value(key, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::defaults;
    use serde_json::json;

    #[test]
    fn test_masks_picture_bed_token() {
        let redacted = redact_value("picture_bed_api_token", &json!("6d207e02198a847aa98d0a2a901485a5"));
        assert_eq!(redacted, "6d20***");
    }

    #[test]
    fn test_masks_short_secrets_completely() {
        assert_eq!(redact_value("password", &json!("abc")), "***");
    }

    #[test]
    fn test_leaves_empty_and_plain_values() {
        assert_eq!(redact_value("picture_bed_api_token", &json!("")), "");
        assert_eq!(redact_value("api_port", &json!("15372")), "15372");
    }

    #[test]
    fn test_redacts_only_token_in_defaults() {
        let defaults = defaults();
        let redacted = redact_document(&defaults);
        for (key, value) in &defaults {
            if key == "picture_bed_api_token" {
                assert_ne!(&redacted[key], value);
            } else {
                assert_eq!(&redacted[key], value, "{key} should not be redacted");
            }
        }
    }
}
