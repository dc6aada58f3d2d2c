//! Collaborators around the logsift analyzer
//!
//! This crate provides log file reading, report prompt construction,
//! response cache keys, and an in-memory response cache with expiry.

mod cache;
mod cache_key;
mod prompt;
mod reader;

pub use cache::ResponseCache;
pub use cache_key::cache_key;
pub use prompt::{DEFAULT_EXCERPT_LINES, Prompt, PromptBuilder, SYSTEM_PROMPT};
pub use reader::{FsLogReader, LogSource, ReadError};

// Re-export types used in our public API
pub use logsift_types::LogAnalysis;
