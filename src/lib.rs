//! Gazkit: multilingual gazetteer acquisition and cleaning.
//!
//! Two pipelines that share only a file format:
//!
//! - **Acquisition** ([`retrieve`]): queries a knowledge-graph SPARQL
//!   endpoint in bounded offset/limit batches and streams entity names
//!   and aliases into per (language, relation) gazetteer files.
//! - **Cleaning** ([`clean`]): streams gazetteer files through per
//!   (language, type) rule tables, removing or rewriting entries,
//!   deduplicating, and reporting yield statistics.
//!
//! # Example
//!
//! ```
//! use gazkit::{clean_lines, EntityType, LanguageCode};
//!
//! let (lines, stats) = clean_lines(
//!     LanguageCode::English,
//!     EntityType::Per,
//!     ["John Smith", "123456", "Mary (the Baker)"],
//! );
//! assert_eq!(lines, vec!["John Smith", "Mary"]);
//! assert_eq!(stats.deleted, 1);
//! assert_eq!(stats.modified, 1);
//! ```

pub mod clean;
pub mod retrieve;
mod vocab;

pub use clean::{
    clean_directory, clean_file, clean_lines, infer_from_filename, CleanError, CleanResult,
    CleaningStats, InferredName, PatternRuleSet, RuleSet, RULES,
};
pub use retrieve::{
    BatchRetriever, GazetteerWriter, PageError, QueryFacets, QueryShape, RetrievalConfig,
    RetrieveError, RetrieveResult, SparqlService, StopReason, WikidataService, DEFAULT_ENDPOINT,
};
pub use vocab::{ConceptId, EntityType, LanguageCode, RelationKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
