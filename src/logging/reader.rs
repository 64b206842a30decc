//! Reading log files back
//!
//! Parses the lines a [`Logger`](super::Logger) produces so they can be shown
//! or filtered by severity.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use super::logger::{BANNER_MARKER, TIMESTAMP_FORMAT};
use super::severity::Severity;

/// Length of a `YYYY-MM-DD HH:MM:SS` timestamp
const TIMESTAMP_LEN: usize = 19;

/// One physical line of a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// First line of the file
    Banner { timestamp: NaiveDateTime },
    /// Standalone timestamp line
    Timestamp { timestamp: NaiveDateTime },
    /// `<timestamp>\t\t<LEVEL>: <text>`
    Message {
        timestamp: NaiveDateTime,
        level: Severity,
        text: String,
    },
    /// Anything else, e.g. the tail of a message with embedded newlines
    Continuation { text: String },
}

impl LogLine {
    /// Severity of a message line
    pub fn level(&self) -> Option<Severity> {
        match self {
            LogLine::Message { level, .. } => Some(*level),
            _ => None,
        }
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Parse a single line (without its trailing newline)
pub fn parse_line(line: &str) -> LogLine {
    let continuation = || LogLine::Continuation {
        text: line.to_string(),
    };

    let Some(head) = line.get(..TIMESTAMP_LEN) else {
        return continuation();
    };
    let Some(timestamp) = parse_timestamp(head) else {
        return continuation();
    };

    let rest = &line[TIMESTAMP_LEN..];
    if rest.is_empty() {
        return LogLine::Timestamp { timestamp };
    }

    let Some(body) = rest.strip_prefix("\t\t") else {
        return continuation();
    };
    if body == BANNER_MARKER {
        return LogLine::Banner { timestamp };
    }

    // Format: "LEVEL: message"
    if let Some((name, text)) = body.split_once(": ") {
        if let Some(level) = Severity::ALL.into_iter().find(|l| l.as_str() == name) {
            return LogLine::Message {
                timestamp,
                level,
                text: text.to_string(),
            };
        }
    }

    continuation()
}

/// Read and parse every line of a log file
pub fn read_log(path: &Path) -> Result<Vec<LogLine>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file {}", path.display()))?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    // Split on '\n' only so a trailing '\r' in a message survives
    let body = content.strip_suffix('\n').unwrap_or(&content);
    Ok(body.split('\n').map(parse_line).collect())
}

/// Keep the message lines a threshold admits
pub fn filter_by_threshold(lines: &[LogLine], threshold: Severity) -> Vec<&LogLine> {
    lines
        .iter()
        .filter(|line| line.level().is_some_and(|level| threshold.allows(level)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Logger;
    use tempfile::TempDir;

    fn ts() -> NaiveDateTime {
        parse_timestamp("2026-01-21 14:30:45").unwrap()
    }

    #[test]
    fn test_parse_banner() {
        let line = "2026-01-21 14:30:45\t\t*** starting logs ***";
        assert_eq!(parse_line(line), LogLine::Banner { timestamp: ts() });
    }

    #[test]
    fn test_parse_message() {
        let line = "2026-01-21 14:30:45\t\tNORMAL: Config not found: using defaults";
        assert_eq!(
            parse_line(line),
            LogLine::Message {
                timestamp: ts(),
                level: Severity::Normal,
                text: "Config not found: using defaults".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_bare_timestamp() {
        assert_eq!(
            parse_line("2026-01-21 14:30:45"),
            LogLine::Timestamp { timestamp: ts() }
        );
    }

    #[test]
    fn test_parse_empty_message() {
        let line = parse_line("2026-01-21 14:30:45\t\tOFF: ");
        assert_eq!(line.level(), Some(Severity::Off));
    }

    #[test]
    fn test_parse_continuation() {
        assert_eq!(
            parse_line("second half"),
            LogLine::Continuation {
                text: "second half".to_string()
            }
        );
        assert!(matches!(
            parse_line("2026-01-21 14:30:45\t\tWARN: unknown level"),
            LogLine::Continuation { .. }
        ));
    }

    #[test]
    fn test_read_log_written_by_logger() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::in_dir(temp_dir.path(), "app", Severity::Debug).unwrap();
        logger.write("\nstarting", Severity::Minimal).unwrap();
        logger.write("two\nlines", Severity::Normal).unwrap();
        logger.write("details", Severity::Debug).unwrap();

        let lines = read_log(logger.path()).unwrap();
        assert!(matches!(lines[0], LogLine::Banner { .. }));
        assert!(matches!(lines[1], LogLine::Timestamp { .. }));
        assert_eq!(lines[2].level(), Some(Severity::Minimal));
        assert_eq!(lines[3].level(), Some(Severity::Normal));
        assert_eq!(
            lines[4],
            LogLine::Continuation {
                text: "lines".to_string()
            }
        );
        assert_eq!(lines[5].level(), Some(Severity::Debug));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_filter_by_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::in_dir(temp_dir.path(), "filter", Severity::Debug).unwrap();
        for level in Severity::ALL {
            logger.write(level.as_str().to_lowercase(), level).unwrap();
        }

        let lines = read_log(logger.path()).unwrap();
        let kept = filter_by_threshold(&lines, Severity::Minimal);
        let levels: Vec<_> = kept.iter().filter_map(|l| l.level()).collect();
        assert_eq!(levels, vec![Severity::Off, Severity::Minimal]);
    }

    #[test]
    fn test_read_log_keeps_carriage_return() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::in_dir(temp_dir.path(), "crlf", Severity::Debug).unwrap();
        logger.write("ends with cr\r", Severity::Normal).unwrap();

        let lines = read_log(logger.path()).unwrap();
        assert_eq!(lines.len(), 2);
        match &lines[1] {
            LogLine::Message { text, .. } => assert_eq!(text, "ends with cr\r"),
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.log");
        std::fs::write(&path, "").unwrap();
        assert!(read_log(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_log(&temp_dir.path().join("missing.log")).is_err());
    }
}
