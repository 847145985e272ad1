//! Streams retrieved literals into per (language, relation) files.
//!
//! One output file per (language, relation) pair, named
//! `<lang3>-<TYPE>-<name|alias>-wd.txt`, written as batches arrive so
//! memory stays bounded regardless of gazetteer size. When every
//! concept for a pair has completed, an external `sort -u` deduplicates
//! the file in place; a post-process failure is logged, not fatal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::retrieve::batch::BatchRetriever;
use crate::retrieve::query::{QueryFacets, QueryShape};
use crate::retrieve::service::SparqlService;
use crate::retrieve::{RetrieveError, RetrieveResult};
use crate::vocab::{ConceptId, EntityType, LanguageCode, RelationKind};

/// Configuration for one acquisition run.
///
/// Defaults mirror the public-endpoint-friendly settings: all supported
/// languages, names and aliases, pages of 50 000, at most 10 pages per
/// concept, subtype expansion and source-page requirement on.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub entity_type: EntityType,
    pub languages: Vec<LanguageCode>,
    pub relations: Vec<RelationKind>,
    pub batch_size: usize,
    pub max_batches: usize,
    pub shape: QueryShape,
    pub out_dir: PathBuf,
}

impl RetrievalConfig {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            languages: LanguageCode::ALL.to_vec(),
            relations: RelationKind::ALL.to_vec(),
            batch_size: 50_000,
            max_batches: 10,
            shape: QueryShape::Instances(QueryFacets {
                subtypes: true,
                require_wiki: true,
                country: None,
            }),
            out_dir: PathBuf::from("."),
        }
    }

    pub fn with_languages(mut self, languages: Vec<LanguageCode>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_relations(mut self, relations: Vec<RelationKind>) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_max_batches(mut self, max_batches: usize) -> Self {
        self.max_batches = max_batches.max(1);
        self
    }

    pub fn with_shape(mut self, shape: QueryShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Output path for one (language, relation) pair.
    pub fn output_path(&self, language: LanguageCode, relation: RelationKind) -> PathBuf {
        self.out_dir.join(format!(
            "{}-{}-{}-wd.txt",
            language.tag3(),
            self.entity_type.tag(),
            relation.file_tag()
        ))
    }
}

/// Drives a full acquisition run over every configured
/// (language, relation) pair and concept.
pub struct GazetteerWriter<'a, S: SparqlService> {
    service: &'a S,
    config: RetrievalConfig,
}

impl<'a, S: SparqlService> GazetteerWriter<'a, S> {
    pub fn new(service: &'a S, config: RetrievalConfig) -> Self {
        Self { service, config }
    }

    /// Runs the acquisition and returns the paths written.
    ///
    /// Per-tuple service failures abort only that tuple (the retriever
    /// logs them); an I/O failure on an output file is fatal for the
    /// run, since every remaining tuple would hit the same file system.
    pub fn run(&self, concepts: &[ConceptId]) -> RetrieveResult<Vec<PathBuf>> {
        if concepts.is_empty() {
            return Err(RetrieveError::NoConcepts);
        }
        let retriever =
            BatchRetriever::new(self.service, self.config.batch_size, self.config.max_batches);
        let mut paths = Vec::new();
        for &language in &self.config.languages {
            for &relation in &self.config.relations {
                let path = self.config.output_path(language, relation);
                let mut out = BufWriter::new(File::create(&path)?);
                let mut total = 0;
                for concept in concepts {
                    let (written, reason) = retriever.fetch_all(
                        concept,
                        language,
                        relation,
                        &self.config.shape,
                        &mut out,
                    )?;
                    total += written;
                    info!(concept = %concept, written, ?reason, "tuple complete");
                }
                out.flush()?;
                drop(out);
                info!(file = %path.display(), total, "gazetteer written");
                sort_unique(&path);
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

/// External stable sort with in-place duplicate removal.
///
/// The unsorted file remains the deliverable if this fails.
fn sort_unique(path: &Path) {
    info!(file = %path.display(), "sorting and removing duplicates");
    match Command::new("sort").arg("-u").arg("-o").arg(path).arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!(file = %path.display(), %status, "sort exited with failure"),
        Err(err) => warn!(file = %path.display(), %err, "could not run sort"),
    }
}
