use std::path::PathBuf;

use publish_helper_settings::default_settings_path;

/// Runtime configuration for the `publish-helper` binary itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings document location
    pub settings_path: PathBuf,
    /// Log level
    pub log_level: String,
    /// Directory for rolling log files; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            settings_path: default_settings_path(),
            // `RUST_LOG`, when set, is honored by the logger itself.
            log_level: std::env::var("LOG_LEVEL")
                .map(|level| level.to_lowercase())
                .unwrap_or_else(|_| "info".to_string()),
            log_dir: std::env::var("PUBLISH_HELPER_LOG_DIR").ok().map(PathBuf::from),
        }
    }
}
