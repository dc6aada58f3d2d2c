use logsift_types::{AnalysisLimits, LogAnalysis, LogEvent, Summary};

use crate::block::BlockAccumulator;
use crate::extract::BlockExtractor;
use crate::grouping::ErrorGrouper;

/// Turns raw multi-line log text into a [`LogAnalysis`]
///
/// The analyzer holds only its limits; every call to [`analyze`](Self::analyze)
/// starts from scratch, so one instance can be shared across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAnalyzer {
    limits: AnalysisLimits,
}

impl LogAnalyzer {
    pub fn new(limits: AnalysisLimits) -> Self {
        Self { limits }
    }

    /// Parse every event in document order, without any cap
    pub fn parse_events(text: &str) -> Vec<LogEvent> {
        BlockAccumulator::blocks(text)
            .into_iter()
            .map(BlockExtractor::event_from_block)
            .collect()
    }

    /// Analyze a log text. Never fails; unrecognized input yields an empty analysis.
    pub fn analyze(&self, text: &str) -> LogAnalysis {
        tracing::debug!(chars = text.len(), "analyzing log text");

        let events = Self::parse_events(text);

        let mut grouper = ErrorGrouper::new(self.limits.max_samples_per_group);
        let mut summary = Summary {
            total_events: events.len(),
            ..Summary::default()
        };
        let mut warnings = Vec::new();

        for event in &events {
            if event.is_error() {
                summary.total_errors += 1;
                grouper.add(event);
            } else if event.is_warning() {
                summary.total_warnings += 1;
                if warnings.len() < self.limits.max_warnings {
                    warnings.push(event.clone());
                }
            }
        }

        tracing::debug!(
            events = summary.total_events,
            errors = summary.total_errors,
            warnings = summary.total_warnings,
            groups = grouper.group_count(),
            "analysis complete"
        );

        let mut events = events;
        events.truncate(self.limits.max_events);

        LogAnalysis {
            summary,
            error_groups: grouper.into_groups(),
            warnings,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_types::{LogLevel, TopFrame};

    const NPE_TWICE: &str = "\
2026-01-01 00:00:00 ERROR [t1] a.B - boom
NullPointerException: x is null
    at a.B(B.java:10)
2026-01-01 00:00:05 ERROR [t1] a.B - boom again
NullPointerException: y is null
    at a.B(B.java:10)
";

    fn warn_lines(n: usize) -> String {
        (0..n)
            .map(|i| format!("2026-01-01 00:00:{i:02} WARN [t] a.W - warning {i}\n"))
            .collect()
    }

    #[test]
    fn test_grouping_scenario() {
        let analysis = LogAnalyzer::default().analyze(NPE_TWICE);

        assert_eq!(
            analysis.summary,
            Summary {
                total_events: 2,
                total_errors: 2,
                total_warnings: 0
            }
        );
        assert_eq!(analysis.error_groups.len(), 1);

        let group = &analysis.error_groups[0];
        assert_eq!(group.count, 2);
        assert_eq!(group.exception.as_deref(), Some("NullPointerException"));
        assert_eq!(
            group.top_frame,
            Some(TopFrame {
                location: "a.B".to_string(),
                file: "B.java".to_string(),
                line: 10
            })
        );
        assert_eq!(group.logger, "a.B");
        assert_eq!(group.first_ts, "2026-01-01 00:00:00");
        assert_eq!(group.last_ts, "2026-01-01 00:00:05");
        assert_eq!(group.samples.len(), 2);
        assert_eq!(group.samples[0].message, "boom");
        assert_eq!(
            group.samples[1].exception_message.as_deref(),
            Some("y is null")
        );
    }

    #[test]
    fn test_empty_and_headerless_input() {
        let analyzer = LogAnalyzer::default();
        for text in ["", "\n\n", "no header here\n    at a.B(B.java:1)\n"] {
            let analysis = analyzer.analyze(text);
            assert_eq!(analysis, LogAnalysis::default(), "input {text:?}");
        }
    }

    #[test]
    fn test_warning_cap_keeps_exact_count() {
        let analysis = LogAnalyzer::default().analyze(&warn_lines(15));
        assert_eq!(analysis.warnings.len(), 10);
        assert_eq!(analysis.summary.total_warnings, 15);
        assert_eq!(analysis.warnings[9].message, "warning 9");
        assert!(analysis.warnings.iter().all(|e| e.level == LogLevel::Warn));
    }

    #[test]
    fn test_event_cap_keeps_exact_count() {
        let limits = AnalysisLimits {
            max_events: 3,
            ..AnalysisLimits::default()
        };
        let analysis = LogAnalyzer::new(limits).analyze(&warn_lines(8));
        assert_eq!(analysis.events.len(), 3);
        assert_eq!(analysis.summary.total_events, 8);
        assert_eq!(analysis.events[0].message, "warning 0");
        assert_eq!(analysis.events[2].message, "warning 2");
    }

    #[test]
    fn test_custom_sample_cap() {
        let limits = AnalysisLimits {
            max_samples_per_group: 1,
            ..AnalysisLimits::default()
        };
        let analysis = LogAnalyzer::new(limits).analyze(NPE_TWICE);
        assert_eq!(analysis.error_groups[0].count, 2);
        assert_eq!(analysis.error_groups[0].samples.len(), 1);
    }

    #[test]
    fn test_header_followed_by_header() {
        let text = "\
2026-01-01 00:00:00 ERROR [t] a.B - first
2026-01-01 00:00:01 ERROR [t] a.B - second
";
        let events = LogAnalyzer::parse_events(text);
        assert_eq!(events.len(), 2);
        assert!(events[0].exception.is_none());
        assert!(events[0].top_frame.is_none());
        assert!(events[0].raw_block.is_none());
    }

    #[test]
    fn test_cr_separated_headers_all_counted() {
        let text = "2026-01-01 00:00:00 ERROR [t] a.B - x\rNullPointerException: y\r\
                    2026-01-01 00:00:01 WARN [t] a.B - w";
        let analysis = LogAnalyzer::default().analyze(text);
        assert_eq!(
            analysis.summary,
            Summary {
                total_events: 2,
                total_errors: 1,
                total_warnings: 1
            }
        );
        assert_eq!(analysis.events[0].message, "x");
        assert_eq!(
            analysis.error_groups[0].exception.as_deref(),
            Some("NullPointerException")
        );
    }

    #[test]
    fn test_info_counted_only_in_events() {
        let text = "\
2026-01-01 00:00:00 INFO [t] a.B - started
2026-01-01 00:00:01 WARN [t] a.B - slow
2026-01-01 00:00:02 ERROR [t] a.B - failed
";
        let analysis = LogAnalyzer::default().analyze(text);
        assert_eq!(analysis.summary.total_events, 3);
        assert_eq!(analysis.summary.total_errors, 1);
        assert_eq!(analysis.summary.total_warnings, 1);
        assert_eq!(analysis.events.len(), 3);
        assert_eq!(analysis.warnings.len(), 1);
        assert_eq!(analysis.error_groups[0].samples[0].message, "failed");
    }

    #[test]
    fn test_groups_sum_to_error_total() {
        let text = "\
2026-01-01 00:00:00 ERROR [t] a.B - plain
2026-01-01 00:00:01 ERROR [t] a.C - io
java.io.IOException: disk full
\tat a.C.write(C.java:5)
2026-01-01 00:00:02 WARN [t] a.B - retry
2026-01-01 00:00:03 ERROR [t] a.D - plain too
2026-01-01 00:00:04 ERROR [t] a.C - io again
java.io.IOException: disk still full
\tat a.C.write(C.java:5)
";
        let analysis = LogAnalyzer::default().analyze(text);
        let total: usize = analysis.error_groups.iter().map(|g| g.count).sum();
        assert_eq!(total, analysis.summary.total_errors);
        assert_eq!(analysis.error_groups.len(), 2);
        // Fallback bucket keeps the first member's logger
        assert_eq!(analysis.error_groups[0].logger, "a.B");
        assert_eq!(analysis.error_groups[0].count, 2);
        assert_eq!(analysis.error_groups[1].count, 2);
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let analyzer = LogAnalyzer::default();
        let first = serde_json::to_string(&analyzer.analyze(NPE_TWICE)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(NPE_TWICE)).unwrap();
        assert_eq!(first, second);
    }
}
