//! Precedence resolution for settings reads and writes.
//!
//! ## Read precedence (highest to lowest)
//!
//! 1. Environment variable named after the upper-cased key (returned verbatim)
//! 2. Settings document (served from the in-memory cache when warm)
//! 3. Caller-supplied default
//!
//! Values from (2) and (3) pass through legacy placeholder migration.
//! Every write replaces the whole document and invalidates the cache.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::SettingsCache;
use crate::defaults::defaults;
use crate::env::EnvSource;
use crate::error::{Result, SettingsError};
use crate::io::{application_home, resolve_relative, SettingsStore};
use crate::migration::{legacy_keys, migrate_document, migrate_value};
use crate::redact::redact_value;
use crate::SettingsDocument;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ValueSource {
    /// Environment variable override
    Environment(String),
    /// Settings document
    Document,
    /// Caller-supplied default
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Environment(name) => write!(f, "env:{}", name),
            ValueSource::Document => write!(f, "document"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    pub value: Value,
    pub source: ValueSource,
}

/// Reads and writes settings with environment overrides, caching and legacy
/// migration.
///
/// One instance per settings file; share it behind an `Arc`. Writes through the
/// same instance are serialized, but nothing guards against other processes
/// editing the file concurrently (last writer wins).
#[derive(Debug)]
pub struct SettingsManager {
    store: SettingsStore,
    env: EnvSource,
    base_dir: PathBuf,
    cache: Mutex<SettingsCache>,
}

impl SettingsManager {
    /// Open the settings file at `path`, creating it from defaults if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_env(path, EnvSource::Process)
    }

    /// Like [`SettingsManager::open`], resolving overrides from `env`.
    pub fn open_with_env(path: impl Into<PathBuf>, env: EnvSource) -> Result<Self> {
        let store = SettingsStore::new(path);
        store.ensure_bootstrapped()?;
        Ok(Self {
            store,
            env,
            base_dir: application_home(),
            cache: Mutex::new(SettingsCache::new()),
        })
    }

    /// Resolve relative path settings against `base_dir` instead of the
    /// application home.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn lock_cache(&self) -> MutexGuard<'_, SettingsCache> {
        // The cache holds no invariant a panicking holder could break.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve `key`, reporting where the value came from.
    ///
    /// Returns `Ok(None)` when the key is neither overridden nor stored and no
    /// default was given.
    pub fn resolve(&self, key: &str, default: Option<Value>) -> Result<Option<Resolved>> {
        if let Some((name, value)) = self.env.lookup(key) {
            debug!(key, var = %name, "Using environment variable override");
            return Ok(Some(Resolved {
                value: Value::String(value),
                source: ValueSource::Environment(name),
            }));
        }

        let stored = {
            let mut cache = self.lock_cache();
            if cache.is_populated() {
                debug!(key, "Settings cache hit");
            }
            let doc = cache.get_or_load(|| self.store.read())?;
            doc.get(key).cloned()
        };

        let resolved = match (stored, default) {
            (Some(value), _) => Resolved {
                value: migrate_value(value),
                source: ValueSource::Document,
            },
            (None, Some(value)) => Resolved {
                value: migrate_value(value),
                source: ValueSource::Default,
            },
            (None, None) => {
                debug!(key, "Setting not found");
                return Ok(None);
            }
        };

        debug!(
            key,
            value = %redact_value(key, &resolved.value),
            source = %resolved.source,
            "Retrieved setting"
        );
        Ok(Some(resolved))
    }

    /// Value of `key`, or `None` if it is not set anywhere.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.resolve(key, None)?.map(|r| r.value))
    }

    /// Value of `key`, falling back to `default`.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Result<Value> {
        let default = default.into();
        Ok(self
            .resolve(key, Some(default.clone()))?
            .map(|r| r.value)
            .unwrap_or(default))
    }

    /// Value of `key` as text. Non-string JSON values are rendered as JSON.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key)?.map(value_to_string))
    }

    /// Boolean setting; accepts `true/false`, `1/0`, `yes/no`, `on/off` in any case.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key)? {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(b),
            Some(value) => {
                let text = value_to_string(value);
                parse_bool(&text).ok_or_else(|| invalid(key, text, "a boolean"))
            }
        }
    }

    pub fn get_int(&self, key: &str, default: i64) -> Result<i64> {
        match self.get(key)? {
            None => Ok(default),
            Some(value) => {
                let text = value_to_string(value);
                text.trim()
                    .parse()
                    .map_err(|_| invalid(key, text, "an integer"))
            }
        }
    }

    pub fn get_float(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key)? {
            None => Ok(default),
            Some(value) => {
                let text = value_to_string(value);
                text.trim()
                    .parse()
                    .map_err(|_| invalid(key, text, "a number"))
            }
        }
    }

    /// Path setting; relative values are resolved against the base directory.
    pub fn get_path(&self, key: &str) -> Result<Option<PathBuf>> {
        Ok(self
            .get_string(key)?
            .filter(|s| !s.is_empty())
            .map(|s| resolve_relative(&self.base_dir, &s)))
    }

    /// Set one key and persist the document.
    ///
    /// Reads the file directly rather than the cache so edits made by other
    /// writers since the last read are kept.
    pub fn update(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let mut cache = self.lock_cache();

        let mut doc = self.store.read()?;
        let logged = redact_value(key, &value);
        doc.insert(key.to_string(), value);
        let written = self.store.write(&doc);
        cache.invalidate();
        written?;

        info!(key, value = %logged, "Updated setting");
        Ok(())
    }

    /// Snapshot of the whole document with legacy placeholders migrated.
    ///
    /// Environment overrides are not applied. The snapshot is a copy.
    pub fn get_all(&self) -> Result<SettingsDocument> {
        let mut cache = self.lock_cache();
        let doc = cache.get_or_load(|| self.store.read())?;
        Ok(migrate_document(doc))
    }

    /// Replace the whole document.
    pub fn update_all(&self, doc: SettingsDocument) -> Result<()> {
        let mut cache = self.lock_cache();
        let written = self.store.write(&doc);
        cache.invalidate();
        written?;
        info!(keys = doc.len(), "Updated all settings");
        Ok(())
    }

    /// Overwrite the document with the defaults.
    pub fn reset_to_defaults(&self) -> Result<()> {
        let mut cache = self.lock_cache();
        let written = self.store.write(&defaults());
        cache.invalidate();
        written?;
        info!(path = %self.store.path().display(), "Reset settings to defaults");
        Ok(())
    }

    /// Save the migrated form of every value still holding a legacy placeholder.
    ///
    /// Returns the rewritten keys; the file is left untouched when there are none.
    pub fn persist_migrations(&self) -> Result<Vec<String>> {
        let mut cache = self.lock_cache();
        let doc = self.store.read()?;
        let keys = legacy_keys(&doc);
        if keys.is_empty() {
            cache.set(doc);
            return Ok(keys);
        }

        let written = self.store.write(&migrate_document(&doc));
        cache.invalidate();
        written?;
        info!(keys = ?keys, "Persisted migrated template variables");
        Ok(keys)
    }

    /// Forget the cached document so the next read hits the file.
    pub fn invalidate_cache(&self) {
        self.lock_cache().invalidate();
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &str, value: String, expected: &'static str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        value,
        expected,
    }
}
