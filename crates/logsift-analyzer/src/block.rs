use std::sync::LazyLock;

use regex::Regex;

use crate::header::{Header, HeaderMatcher};

/// Line terminators: `\r\n`, then any single break character
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]")
        .expect("line break pattern is valid")
});

/// A header together with the continuation lines attributed to it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub header: Header,
    /// Non-blank continuation lines, untrimmed, in input order
    pub lines: Vec<&'a str>,
}

#[derive(Debug, Default)]
enum State<'a> {
    #[default]
    Idle,
    Accumulating(RawBlock<'a>),
}

/// Groups a header line with its trailing continuation lines
///
/// Feed lines in order with [`push`](Self::push); a finished block is handed
/// back whenever the next header arrives, and [`finish`](Self::finish) closes
/// the last one. Lines seen before the first header are dropped.
#[derive(Debug, Default)]
pub struct BlockAccumulator<'a> {
    state: State<'a>,
}

impl<'a> BlockAccumulator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, returning the block it closed (if any)
    pub fn push(&mut self, line: &'a str) -> Option<RawBlock<'a>> {
        if let Some(header) = HeaderMatcher::parse(line) {
            let opened = State::Accumulating(RawBlock {
                header,
                lines: Vec::new(),
            });
            return match std::mem::replace(&mut self.state, opened) {
                State::Idle => None,
                State::Accumulating(block) => Some(block),
            };
        }

        if let State::Accumulating(block) = &mut self.state {
            if !line.trim().is_empty() {
                block.lines.push(line);
            }
        }
        None
    }

    /// Close the open block at end of input
    pub fn finish(&mut self) -> Option<RawBlock<'a>> {
        match std::mem::take(&mut self.state) {
            State::Idle => None,
            State::Accumulating(block) => Some(block),
        }
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// Split a whole text into blocks, in document order
    pub fn blocks(text: &'a str) -> Vec<RawBlock<'a>> {
        let mut accumulator = Self::new();
        let mut blocks: Vec<RawBlock<'a>> = LINE_BREAK_RE
            .split(text)
            .filter_map(|line| accumulator.push(line))
            .collect();
        blocks.extend(accumulator.finish());
        blocks
    }
}
