//! Severity levels
//!
//! Four ordered levels, ranked from least to most verbose. A logger's threshold
//! admits every level whose rank is at or below its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered severity of a log message
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Off = 1,
    Minimal = 2,
    Normal = 3,
    #[default]
    Debug = 4,
}

impl Severity {
    /// All levels in rank order
    pub const ALL: [Severity; 4] = [
        Severity::Off,
        Severity::Minimal,
        Severity::Normal,
        Severity::Debug,
    ];

    /// Numeric rank (1 = OFF .. 4 = DEBUG)
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Name as it appears in log lines
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "OFF",
            Severity::Minimal => "MINIMAL",
            Severity::Normal => "NORMAL",
            Severity::Debug => "DEBUG",
        }
    }

    /// Whether a message at `level` passes this threshold
    pub fn allows(self, level: Severity) -> bool {
        level <= self
    }

    /// Look up a level by its rank
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.rank() == rank)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string names no severity level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected OFF, MINIMAL, NORMAL, DEBUG or 1-4)")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            return Self::from_rank(rank).ok_or_else(|| ParseSeverityError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}
