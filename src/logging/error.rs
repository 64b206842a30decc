//! Logger error kinds

use std::io;
use std::path::{Path, PathBuf};

/// Failure while setting up or appending to a log file
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to create log directory {}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log file {}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoggerError {
    /// Path the failing operation targeted
    pub fn path(&self) -> &Path {
        match self {
            LoggerError::DirectoryCreation { path, .. }
            | LoggerError::FileOpen { path, .. }
            | LoggerError::FileWrite { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoggerError>;
