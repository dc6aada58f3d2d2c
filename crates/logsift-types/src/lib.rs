//! Shared types for logsift
//!
//! This crate contains the analysis data model produced by `logsift-analyzer`
//! and consumed by the prompt builder and the CLI.

use serde::{Deserialize, Serialize};

// ============================================================================
// Event Types
// ============================================================================

/// Log severity level recognized in a header line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl LogLevel {
    /// Parse the exact header spelling (`ERROR`, `WARN`, `INFO`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ERROR" => Some(Self::Error),
            "WARN" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First stack frame found in an event block
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopFrame {
    /// Qualified method or class name
    #[serde(rename = "where")]
    pub location: String,
    pub file: String,
    pub line: u32,
}

/// A single parsed log event: one header line plus its continuation lines
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// `YYYY-MM-DD HH:MM:SS`, kept as written
    #[serde(rename = "ts")]
    pub timestamp: String,

    pub level: LogLevel,

    pub thread: String,

    /// Dotted component or class name
    pub logger: String,

    /// Header text after ` - `
    pub message: String,

    /// Exception or error type name declared in the block
    pub exception: Option<String>,

    /// Text after `:` on the exception line
    pub exception_message: Option<String>,

    pub top_frame: Option<TopFrame>,

    /// Continuation lines joined and trimmed
    pub raw_block: Option<String>,
}

impl LogEvent {
    /// Create an event from header fields, with nothing extracted yet
    pub fn new(
        timestamp: String,
        level: LogLevel,
        thread: String,
        logger: String,
        message: String,
    ) -> Self {
        Self {
            timestamp,
            level,
            thread,
            logger,
            message,
            exception: None,
            exception_message: None,
            top_frame: None,
            raw_block: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warn
    }
}

// ============================================================================
// Analysis Types
// ============================================================================

/// One retained occurrence of an error group
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSample {
    pub ts: String,
    pub message: String,
    pub exception_message: Option<String>,
}

impl From<&LogEvent> for ErrorSample {
    fn from(event: &LogEvent) -> Self {
        Self {
            ts: event.timestamp.clone(),
            message: event.message.clone(),
            exception_message: event.exception_message.clone(),
        }
    }
}

/// ERROR events sharing the same exception and frame location
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorGroup {
    pub count: usize,
    pub exception: Option<String>,
    pub top_frame: Option<TopFrame>,
    pub logger: String,
    pub samples: Vec<ErrorSample>,
    pub first_ts: String,
    /// Timestamp of the most recently seen member, in document order
    pub last_ts: String,
}

/// Exact counts over the whole input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_events: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Structured result of analyzing a log text
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogAnalysis {
    pub summary: Summary,
    pub error_groups: Vec<ErrorGroup>,
    /// WARN events, truncated to `AnalysisLimits::max_warnings`
    pub warnings: Vec<LogEvent>,
    /// All events, truncated to `AnalysisLimits::max_events`
    pub events: Vec<LogEvent>,
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Output size caps applied by the analyzer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisLimits {
    pub max_warnings: usize,
    pub max_events: usize,
    pub max_samples_per_group: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_warnings: 10,
            max_events: 50,
            max_samples_per_group: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_is_exact() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("error"), None);
        assert_eq!(LogLevel::parse("WARNING"), None);
        assert_eq!(LogLevel::parse("DEBUG"), None);
    }

    #[test]
    fn test_event_json_keys() {
        let mut event = LogEvent::new(
            "2026-01-01 00:00:00".to_string(),
            LogLevel::Error,
            "main".to_string(),
            "a.B".to_string(),
            "boom".to_string(),
        );
        event.top_frame = Some(TopFrame {
            location: "a.B".to_string(),
            file: "B.java".to_string(),
            line: 10,
        });

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["ts"], "2026-01-01 00:00:00");
        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["top_frame"]["where"], "a.B");
        assert_eq!(value["top_frame"]["line"], 10);
        assert!(value["exception"].is_null());
        assert!(value["raw_block"].is_null());
    }

    #[test]
    fn test_analysis_top_level_keys() {
        let value = serde_json::to_value(LogAnalysis::default()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["error_groups", "events", "summary", "warnings"]);
        assert_eq!(value["summary"]["total_events"], 0);
    }

    #[test]
    fn test_limits_partial_deserialize() {
        let limits: AnalysisLimits = serde_json::from_str(r#"{"max_events": 5}"#).unwrap();
        assert_eq!(limits.max_events, 5);
        assert_eq!(limits.max_warnings, 10);
        assert_eq!(limits.max_samples_per_group, 2);
    }
}
