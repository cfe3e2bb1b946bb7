//! Structured Logger
//!
//! Wraps `tracing` to provide console output, an optional rolling NDJSON log
//! file, and environment-based level control (`RUST_LOG` wins over `level`).

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log files are named `publish-helper.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "publish-helper.log";

/// Initialize the global structured logger.
///
/// Console output goes to stderr so stdout stays free for command output.
/// When `log_dir` is given, JSON lines are also appended to a daily file there.
/// Calling this more than once is harmless; only the first call installs.
pub fn init_logger(log_dir: Option<&Path>, level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let mut file_error = None;
    let file_layer = log_dir.and_then(|dir| {
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .build(dir)
        {
            Ok(appender) => Some(
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false),
            ),
            Err(e) => {
                file_error = Some(format!("{}: {}", dir.display(), e));
                None
            }
        }
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Some(err) = file_error {
        tracing::warn!("File logging disabled, cannot open log directory {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_rolling_log_file() {
        let dir = TempDir::new().unwrap();
        init_logger(Some(dir.path()), "debug");
        tracing::info!(component = "test", "logger initialized");
        // A second init must not panic.
        init_logger(None, "info");

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(
            names.iter().any(|n| n.starts_with(LOG_FILE_PREFIX)),
            "no log file in {names:?}"
        );
    }
}
