use std::collections::HashMap;

use logsift_types::{ErrorGroup, ErrorSample, LogEvent};

/// Identity of an error group
///
/// Unset parts stay `None`, so an event without an exception never collides
/// with one whose exception text happens to look empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub exception: Option<String>,
    pub location: Option<String>,
    pub line: Option<u32>,
}

impl GroupKey {
    pub fn of(event: &LogEvent) -> Self {
        let frame = event.top_frame.as_ref();
        Self {
            exception: event.exception.clone(),
            location: frame.map(|f| f.location.clone()),
            line: frame.map(|f| f.line),
        }
    }
}

/// Merges ERROR events into counted groups, kept in first-seen order
#[derive(Debug)]
pub struct ErrorGrouper {
    groups: Vec<ErrorGroup>,
    index: HashMap<GroupKey, usize>,
    max_samples: usize,
}

impl ErrorGrouper {
    pub fn new(max_samples: usize) -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            max_samples,
        }
    }

    /// Fold one event into its group
    pub fn add(&mut self, event: &LogEvent) {
        let key = GroupKey::of(event);

        if let Some(&pos) = self.index.get(&key) {
            let group = &mut self.groups[pos];
            group.count += 1;
            group.last_ts = event.timestamp.clone();
            if group.samples.len() < self.max_samples {
                group.samples.push(ErrorSample::from(event));
            }
            return;
        }

        let mut samples = Vec::new();
        if self.max_samples > 0 {
            samples.push(ErrorSample::from(event));
        }
        self.index.insert(key, self.groups.len());
        self.groups.push(ErrorGroup {
            count: 1,
            exception: event.exception.clone(),
            top_frame: event.top_frame.clone(),
            logger: event.logger.clone(),
            samples,
            first_ts: event.timestamp.clone(),
            last_ts: event.timestamp.clone(),
        });
    }

    /// Number of distinct groups so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups in order of first occurrence
    pub fn into_groups(self) -> Vec<ErrorGroup> {
        self.groups
    }
}
