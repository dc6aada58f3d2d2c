//! Log event extraction and error grouping for logsift
//!
//! This crate turns raw multi-line log text into a structured analysis:
//! header matching, block accumulation, exception and frame extraction,
//! and error grouping.

mod analyzer;
mod block;
mod extract;
mod grouping;
mod header;


pub use analyzer::LogAnalyzer;
pub use block::{BlockAccumulator, RawBlock};
pub use extract::{BlockExtractor, Extraction};
pub use grouping::{ErrorGrouper, GroupKey};
pub use header::{Header, HeaderMatcher};

// Re-export types used in our public API
pub use logsift_types::{
    AnalysisLimits, ErrorGroup, ErrorSample, LogAnalysis, LogEvent, LogLevel, Summary, TopFrame,
};
