//! Structured logging for Publish Helper binaries.
//!
//! Console output plus an optional daily-rolling NDJSON log file.

pub mod logger;

pub use logger::{init_logger, LOG_FILE_PREFIX};
