//! Offset/limit pagination against the query service.
//!
//! One [`BatchRetriever`] drives the page loop for a single
//! (concept, language, relation) tuple. Offsets are strictly monotonic:
//! page *i* uses offset `i * batch_size`, and offset *i + 1* is only
//! issued once page *i* came back full. Failures abort the tuple, never
//! the whole run, and nothing is retried.

use std::io::{self, Write};
use std::time::Instant;

use tracing::{info, warn};

use crate::retrieve::query::{render, QueryShape};
use crate::retrieve::service::{PageError, SparqlService};
use crate::vocab::{ConceptId, LanguageCode, RelationKind};

/// Why a tuple's pagination loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page returned fewer literals than the batch size.
    Exhausted,
    /// The configured maximum batch count was reached.
    MaxBatches,
    /// Hard stop: the service could not be reached.
    Transport,
    /// Soft stop: a response arrived but could not be interpreted.
    Parse,
}

pub struct BatchRetriever<'a, S: SparqlService> {
    service: &'a S,
    batch_size: usize,
    max_batches: usize,
}

impl<'a, S: SparqlService> BatchRetriever<'a, S> {
    pub fn new(service: &'a S, batch_size: usize, max_batches: usize) -> Self {
        Self {
            service,
            batch_size: batch_size.max(1),
            max_batches: max_batches.max(1),
        }
    }

    /// Pages through one (concept, language, relation) tuple, streaming
    /// each page's literals into `out` as they arrive.
    ///
    /// Returns the number of lines written and why the loop stopped.
    /// Service failures are logged and reported through [`StopReason`];
    /// only writing to `out` can produce an error.
    pub fn fetch_all<W: Write>(
        &self,
        concept: &ConceptId,
        language: LanguageCode,
        relation: RelationKind,
        shape: &QueryShape,
        out: &mut W,
    ) -> io::Result<(usize, StopReason)> {
        let template = shape.template();
        let mut written = 0;
        for batch in 0..self.max_batches {
            let offset = batch * self.batch_size;
            let query = render(
                template,
                concept,
                relation,
                language,
                offset,
                self.batch_size,
                shape.country(),
            );
            info!(
                batch = batch + 1,
                concept = %concept,
                lang = language.tag2(),
                rel = relation.predicate(),
                offset,
                "fetching batch"
            );
            let start = Instant::now();
            match self.service.query(&query) {
                Ok(literals) => {
                    let count = literals.len();
                    for literal in literals {
                        writeln!(out, "{literal}")?;
                    }
                    written += count;
                    info!(
                        found = count,
                        elapsed_s = start.elapsed().as_secs_f64(),
                        "batch complete"
                    );
                    if count < self.batch_size {
                        return Ok((written, StopReason::Exhausted));
                    }
                }
                Err(PageError::Transport(err)) => {
                    warn!(
                        %err,
                        concept = %concept,
                        elapsed_s = start.elapsed().as_secs_f64(),
                        "hard failure, abandoning tuple"
                    );
                    return Ok((written, StopReason::Transport));
                }
                Err(PageError::Parse(err)) => {
                    warn!(
                        %err,
                        concept = %concept,
                        elapsed_s = start.elapsed().as_secs_f64(),
                        "soft failure, abandoning tuple"
                    );
                    return Ok((written, StopReason::Parse));
                }
            }
        }
        Ok((written, StopReason::MaxBatches))
    }
}
