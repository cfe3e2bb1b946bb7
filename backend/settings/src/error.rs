use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while resolving or persisting settings.
///
/// Every variant except [`SettingsError::InvalidValue`] is a configuration
/// failure: the settings file itself could not be used. Those carry the file
/// path so callers can point the user at it.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid settings file {}: top-level value is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("Failed to create settings directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write to settings file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Setting \"{key}\" has value {value:?}, expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl SettingsError {
    /// True when the settings file could not be read, parsed or written.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, SettingsError::InvalidValue { .. })
    }

    /// Storage location involved in a configuration failure.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SettingsError::Read { path, .. }
            | SettingsError::Parse { path, .. }
            | SettingsError::NotAnObject { path }
            | SettingsError::CreateDir { path, .. }
            | SettingsError::Write { path, .. }
            | SettingsError::Serialize { path, .. } => Some(path),
            SettingsError::InvalidValue { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
