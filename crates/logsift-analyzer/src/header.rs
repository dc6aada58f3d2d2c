use std::sync::LazyLock;

use regex::Regex;

use logsift_types::{LogEvent, LogLevel};

/// `2026-01-01 00:00:00  ERROR [thread] com.example.Service - message`
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\s+(?P<level>ERROR|WARN|INFO)\s+\[(?P<thread>[^\]]+)\]\s+(?P<logger>[\w.$]+)\s+-\s+(?P<message>.*)$",
    )
    .expect("header pattern is valid")
});

/// Fields extracted from a line that opens a new event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub timestamp: String,
    pub level: LogLevel,
    pub thread: String,
    pub logger: String,
    pub message: String,
}

impl Header {
    /// Turn the header into an event with no block content extracted
    pub fn into_event(self) -> LogEvent {
        LogEvent::new(
            self.timestamp,
            self.level,
            self.thread,
            self.logger,
            self.message,
        )
    }
}

/// Recognizes header lines
pub struct HeaderMatcher;

impl HeaderMatcher {
    /// Parse a line as a header; `None` means it is a continuation line
    pub fn parse(line: &str) -> Option<Header> {
        let caps = HEADER_RE.captures(line)?;
        let level = LogLevel::parse(&caps["level"])?;

        Some(Header {
            timestamp: caps["ts"].to_string(),
            level,
            thread: caps["thread"].to_string(),
            logger: caps["logger"].to_string(),
            message: caps["message"].to_string(),
        })
    }
}
