//! Logging system for modlog
//!
//! Provides per-module file loggers with a severity threshold, a reader for
//! the files they produce, and retention housekeeping.

mod error;
mod logger;
mod reader;
mod retention;
mod severity;

pub use error::{LoggerError, Result};
pub use logger::{
    format_entry, log_path_for, timestamp_now, Logger, BANNER_MARKER, LOGS_DIR, TIMESTAMP_FORMAT,
};
pub use reader::{filter_by_threshold, parse_line, read_log, LogLine};
pub use retention::{cleanup_old_logs_with_retention, DEFAULT_RETENTION_DAYS};
pub use severity::{ParseSeverityError, Severity};
