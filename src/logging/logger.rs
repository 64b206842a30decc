//! Per-module file logger
//!
//! Each `Logger` owns one text file under the logs directory, named after the
//! identifier it was created with. The file is truncated and stamped with a
//! banner on construction; every accepted message is appended by opening the
//! file, writing, and closing it again.

use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::error::{LoggerError, Result};
use super::severity::Severity;
use crate::config::Config;

/// Directory (relative to the working directory) that holds log files
pub const LOGS_DIR: &str = "logs";

/// Marker written on the first line of every log file
pub const BANNER_MARKER: &str = "*** starting logs ***";

/// `strftime` format of every timestamp in a log file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Derive the log file path for an identifier
///
/// Everything up to the last `/` and then the last extension are stripped,
/// so `src/app.py` becomes `<logs_dir>/app.log`. A dot only starts an
/// extension when a non-dot character precedes it, so `.bashrc` and `..`
/// keep their names and `foo/` maps to `.log`.
pub fn log_path_for(logs_dir: &Path, identifier: &str) -> PathBuf {
    let base = identifier
        .rsplit_once('/')
        .map_or(identifier, |(_, name)| name);
    let stem = match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => &base[..dot],
        _ => base,
    };
    logs_dir.join(format!("{}.log", stem))
}

/// Current local time in log format
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Render the bytes a single `write` call appends
///
/// A leading newline is replaced by a standalone timestamp line. A message
/// that ends in a newline is followed by one more standalone timestamp line
/// instead of a plain line break.
pub fn format_entry(message: &str, level: Severity, timestamp: &str) -> String {
    let mut out = String::new();

    let message = match message.strip_prefix('\n') {
        Some(rest) => {
            out.push_str(timestamp);
            out.push('\n');
            rest
        }
        None => message,
    };

    let body = format!("{}: {}", level.as_str(), message);
    out.push_str(timestamp);
    out.push_str("\t\t");
    out.push_str(&body);
    if body.ends_with('\n') {
        out.push_str(timestamp);
    }
    out.push('\n');

    out
}

/// Append-only text logger with a severity threshold
#[derive(Debug, Clone)]
pub struct Logger {
    path: PathBuf,
    threshold: Severity,
}

impl Logger {
    /// Create a logger under `./logs`
    pub fn new(identifier: &str, threshold: Severity) -> Result<Self> {
        Self::in_dir(LOGS_DIR, identifier, threshold)
    }

    /// Create a logger under the configured logs directory and threshold
    pub fn from_config(identifier: &str, config: &Config) -> Result<Self> {
        Self::in_dir(&config.logs_dir, identifier, config.default_threshold)
    }

    /// Create a logger under an explicit directory
    ///
    /// The directory is created if missing. An existing log file for the same
    /// identifier is truncated and receives a fresh banner.
    pub fn in_dir(
        logs_dir: impl AsRef<Path>,
        identifier: &str,
        threshold: Severity,
    ) -> Result<Self> {
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir).map_err(|source| LoggerError::DirectoryCreation {
            path: logs_dir.to_path_buf(),
            source,
        })?;

        let path = log_path_for(logs_dir, identifier);
        let mut file = File::create(&path).map_err(|source| LoggerError::FileOpen {
            path: path.clone(),
            source,
        })?;

        let banner = format!("{}\t\t{}\n", timestamp_now(), BANNER_MARKER);
        file.write_all(banner.as_bytes())
            .map_err(|source| LoggerError::FileWrite {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), %threshold, "Log file created");

        Ok(Self { path, threshold })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current threshold
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Replace the threshold; applies to subsequent writes
    pub fn set_threshold(&mut self, level: Severity) {
        self.threshold = level;
    }

    /// Whether a message at `level` would be written
    pub fn is_enabled(&self, level: Severity) -> bool {
        self.threshold.allows(level)
    }

    /// Append a message at `level`
    ///
    /// Messages above the threshold are dropped without touching the file.
    /// Everything one call emits goes out in a single append.
    pub fn write(&self, message: impl Display, level: Severity) -> Result<()> {
        if !self.is_enabled(level) {
            tracing::trace!(%level, threshold = %self.threshold, "Message dropped");
            return Ok(());
        }

        let entry = format_entry(&message.to_string(), level, &timestamp_now());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LoggerError::FileOpen {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(entry.as_bytes())
            .map_err(|source| LoggerError::FileWrite {
                path: self.path.clone(),
                source,
            })
    }
}
