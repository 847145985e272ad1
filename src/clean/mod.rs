//! Rule-based gazetteer cleaning.
//!
//! Per (language, type) pair a merged, compiled rule set removes or
//! rewrites entries, deduplicates, and reports yield statistics. Rule
//! tables, the line pipeline, and directory sweeps with filename
//! inference each live in their own module and are re-exported here.

mod dir;
mod file;
mod rules;

use thiserror::Error;

pub use dir::{clean_directory, infer_from_filename, InferredName};
pub use file::{clean_file, clean_lines, CleaningStats};
pub use rules::{PatternRuleSet, RuleSet, RULES};

/// Errors that can occur while cleaning gazetteer files.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;
