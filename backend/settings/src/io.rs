//! Settings file read/write with atomic replace.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::defaults::defaults;
use crate::error::{Result, SettingsError};
use crate::SettingsDocument;

/// Default settings file name within the static directory.
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Directory, relative to the application home, holding the settings file.
const STATIC_DIR_NAME: &str = "static";

/// Explicit settings file location.
pub const SETTINGS_FILE_ENV: &str = "PUBLISH_HELPER_SETTINGS_FILE";

/// Application home directory.
pub const HOME_ENV: &str = "PUBLISH_HELPER_HOME";

/// Resolve the settings file location.
/// Priority: `PUBLISH_HELPER_SETTINGS_FILE` > `$PUBLISH_HELPER_HOME/static/settings.json`
/// > `./static/settings.json`
pub fn default_settings_path() -> PathBuf {
    if let Ok(file) = std::env::var(SETTINGS_FILE_ENV) {
        return PathBuf::from(file);
    }
    application_home().join(STATIC_DIR_NAME).join(SETTINGS_FILE_NAME)
}

/// Application home: `PUBLISH_HELPER_HOME` or the current directory.
pub fn application_home() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        return PathBuf::from(home);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Join a path-valued setting onto `base` unless it is already absolute.
pub fn resolve_relative(base: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Durable JSON storage for one settings document.
///
/// Always reads and writes the whole document; there is no per-key persistence.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the settings file from defaults if it does not exist yet.
    ///
    /// Returns `true` when the file was created.
    pub fn ensure_bootstrapped(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.write(&defaults())?;
        info!(path = %self.path.display(), "Created settings file with defaults");
        Ok(true)
    }

    /// Read and parse the whole document.
    pub fn read(&self) -> Result<SettingsDocument> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            error!(path = %self.path.display(), error = %source, "Failed to read settings file");
            SettingsError::Read {
                path: self.path.clone(),
                source,
            }
        })?;

        let value: Value = serde_json::from_str(&raw).map_err(|source| {
            error!(path = %self.path.display(), error = %source, "Failed to parse settings file");
            SettingsError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        match value {
            Value::Object(doc) => {
                debug!(path = %self.path.display(), keys = doc.len(), "Loaded settings");
                Ok(doc)
            }
            _ => {
                error!(path = %self.path.display(), "Settings file is not a JSON object");
                Err(SettingsError::NotAnObject {
                    path: self.path.clone(),
                })
            }
        }
    }

    /// Serialize and replace the whole document.
    ///
    /// Each write goes to its own uniquely named temp file in the target
    /// directory, which is then renamed over the target. Concurrent writers
    /// never share a temp file, so the file on disk is always a complete
    /// document.
    pub fn write(&self, doc: &SettingsDocument) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|source| {
                    error!(path = %parent.display(), error = %source, "Failed to create settings directory");
                    SettingsError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
                parent
            }
            None => Path::new("."),
        };

        let json = self.to_pretty_json(doc)?;

        let written = self.temp_file_in(dir).and_then(|mut tmp| {
            tmp.write_all(&json)?;
            tmp.persist(&self.path).map_err(|e| e.error)?;
            Ok(())
        });
        if let Err(source) = written {
            error!(path = %self.path.display(), error = %source, "Failed to write settings file");
            return Err(SettingsError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), keys = doc.len(), "Saved settings");
        Ok(())
    }

    /// Temp file next to the target: `.settings.json.<random>.tmp`.
    ///
    /// Removed on drop unless persisted.
    fn temp_file_in(&self, dir: &Path) -> std::io::Result<NamedTempFile> {
        let mut prefix = OsString::from(".");
        prefix.push(
            self.path
                .file_name()
                .unwrap_or_else(|| OsStr::new(SETTINGS_FILE_NAME)),
        );
        prefix.push(".");
        tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(dir)
    }

    /// Four-space indented JSON; non-ASCII text is kept as-is.
    fn to_pretty_json(&self, doc: &SettingsDocument) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        doc.serialize(&mut ser).map_err(|source| SettingsError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        buf.push(b'\n');
        Ok(buf)
    }
}
