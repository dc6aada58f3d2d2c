use std::sync::LazyLock;

use regex::Regex;

use logsift_types::{LogEvent, TopFrame};

use crate::block::RawBlock;

/// `java.lang.IllegalStateException: message`, matched against a trimmed line
///
/// `Exception` needs a qualifying prefix; a bare `Error` is accepted.
static EXCEPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<exc>[A-Za-z0-9._$]+Exception|[A-Za-z0-9._$]*Error)(?::\s*(?P<msg>.*))?$",
    )
    .expect("exception pattern is valid")
});

/// `    at com.acme.Service.run(Service.java:42)`
static FRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*at\s+(?P<where>[\w.$]+)\((?P<file>[^:]+):(?P<line>\d+)\)\s*$")
        .expect("frame pattern is valid")
});

/// What a block's continuation lines say about its event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub exception: Option<String>,
    pub exception_message: Option<String>,
    pub top_frame: Option<TopFrame>,
    pub raw_block: Option<String>,
}

/// Scans continuation lines for the first exception and the first stack frame
pub struct BlockExtractor;

impl BlockExtractor {
    /// Scan the lines once; the first match of each kind wins
    pub fn extract(lines: &[&str]) -> Extraction {
        let mut found = Extraction::default();

        for line in lines {
            if found.exception.is_none() {
                if let Some((exc, msg)) = Self::match_exception(line) {
                    found.exception = Some(exc);
                    found.exception_message = msg;
                }
            }
            if found.top_frame.is_none() {
                found.top_frame = Self::match_frame(line);
            }
            if found.exception.is_some() && found.top_frame.is_some() {
                break;
            }
        }

        let joined = lines.join("\n");
        let trimmed = joined.trim();
        if !trimmed.is_empty() {
            found.raw_block = Some(trimmed.to_string());
        }

        found
    }

    /// Build the finished event for a flushed block
    pub fn event_from_block(block: RawBlock<'_>) -> LogEvent {
        let found = Self::extract(&block.lines);
        let mut event = block.header.into_event();
        event.exception = found.exception;
        event.exception_message = found.exception_message;
        event.top_frame = found.top_frame;
        event.raw_block = found.raw_block;
        event
    }

    fn match_exception(line: &str) -> Option<(String, Option<String>)> {
        let caps = EXCEPTION_RE.captures(line.trim())?;
        let message = caps
            .name("msg")
            .map(|m| m.as_str().trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Some((caps["exc"].to_string(), message))
    }

    fn match_frame(line: &str) -> Option<TopFrame> {
        let caps = FRAME_RE.captures(line)?;
        // Out-of-range line numbers don't count as a frame
        let line_no = caps["line"].parse::<u32>().ok()?;
        Some(TopFrame {
            location: caps["where"].to_string(),
            file: caps["file"].to_string(),
            line: line_no,
        })
    }
}
