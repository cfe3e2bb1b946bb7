//! `publish-helper-settings`: settings resolution and persistence for Publish Helper.
//!
//! Provides:
//! - The default settings document used for bootstrap and reset
//! - JSON read/write of the flat settings document with atomic replace
//! - Environment variable overrides (`api_port` ← `API_PORT`)
//! - Transparent migration of renamed template placeholders on read
//! - An in-memory cache invalidated on every write
//! - Redaction of secret values for logging/display
//!
//! Callers go through [`SettingsManager`]; the store and cache are its internals
//! but stay public for tooling and tests.

pub mod cache;
pub mod defaults;
pub mod env;
pub mod error;
pub mod io;
pub mod manager;
pub mod migration;
pub mod redact;

use serde_json::{Map, Value};

/// Flat key → value mapping persisted as one JSON object.
pub type SettingsDocument = Map<String, Value>;

// Re-export most-used types at crate root.
pub use cache::SettingsCache;
pub use defaults::{default_value, defaults, is_default_key, DEFAULT_SETTINGS};
pub use env::{override_var_name, EnvSource};
pub use error::{Result, SettingsError};
pub use io::{default_settings_path, resolve_relative, SettingsStore};
pub use manager::{Resolved, SettingsManager, ValueSource};
pub use migration::{legacy_keys, migrate_document, migrate_str, migrate_value, LEGACY_TOKENS};
pub use redact::{is_sensitive_key, redact_document, redact_value};
