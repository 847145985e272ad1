//! Batch retrieval of gazetteer entries from the knowledge graph.
//!
//! Query shapes are selected from a facet triple, pages are fetched in
//! bounded offset/limit batches, and literals stream straight into per
//! (language, relation) output files.

mod batch;
mod query;
mod service;
mod writer;

use thiserror::Error;

pub use batch::{BatchRetriever, StopReason};
pub use query::{render, QueryFacets, QueryShape};
pub use service::{PageError, SparqlService, WikidataService, DEFAULT_ENDPOINT};
pub use writer::{GazetteerWriter, RetrievalConfig};

/// Errors that can occur during an acquisition run.
///
/// Per-tuple transport and parse failures are not here: they stop one
/// tuple's loop and are reported through [`StopReason`], never
/// propagated.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("no valid concept ids supplied")]
    NoConcepts,
}

/// Result type for acquisition operations.
pub type RetrieveResult<T> = Result<T, RetrieveError>;
