//! Legacy template placeholder migration.
//!
//! Naming templates saved by older releases may still use placeholders that have
//! since been renamed. Values are rewritten on read only; the document on disk
//! keeps the old text until a caller saves the migrated form explicitly.

use std::borrow::Cow;

use serde_json::Value;
use tracing::info;

use crate::SettingsDocument;

/// A renamed template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyToken {
    pub deprecated: &'static str,
    pub current: &'static str,
}

/// Rewrite rules, applied in order.
///
/// No `current` token may contain a `deprecated` one, otherwise migration
/// would stop being idempotent.
pub static LEGACY_TOKENS: &[LegacyToken] = &[
    LegacyToken {
        deprecated: "{category}",
        current: "{categories}",
    },
    LegacyToken {
        deprecated: "{total_episode}",
        current: "{total_episodes}",
    },
];

/// Replace every deprecated placeholder in `value`.
///
/// Borrows when nothing needs rewriting.
pub fn migrate_str(value: &str) -> Cow<'_, str> {
    let mut result = Cow::Borrowed(value);
    for token in LEGACY_TOKENS {
        if result.contains(token.deprecated) {
            result = Cow::Owned(result.replace(token.deprecated, token.current));
        }
    }
    result
}

/// Migrate a setting value. Only strings are touched.
pub fn migrate_value(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let migrated = match migrate_str(&s) {
                Cow::Borrowed(_) => None,
                Cow::Owned(migrated) => Some(migrated),
            };
            match migrated {
                Some(migrated) => {
                    info!(from = %s, to = %migrated, "Updated legacy template variables");
                    Value::String(migrated)
                }
                None => Value::String(s),
            }
        }
        other => other,
    }
}

/// Migrated copy of a whole document.
pub fn migrate_document(doc: &SettingsDocument) -> SettingsDocument {
    doc.iter()
        .map(|(key, value)| (key.clone(), migrate_value(value.clone())))
        .collect()
}

/// Keys whose stored value still contains a deprecated placeholder.
pub fn legacy_keys(doc: &SettingsDocument) -> Vec<String> {
    doc.iter()
        .filter(|(_, value)| {
            value
                .as_str()
                .map(|s| matches!(migrate_str(s), Cow::Owned(_)))
                .unwrap_or(false)
        })
        .map(|(key, _)| key.clone())
        .collect()
}
