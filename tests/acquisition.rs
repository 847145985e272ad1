//! Acquisition runs against a scripted query service.
//!
//! The external `sort -u` post-process runs for real here, so output
//! files come back sorted and deduplicated.

use std::fs;

use gazkit::{
    ConceptId, EntityType, GazetteerWriter, LanguageCode, PageError, RelationKind,
    RetrievalConfig, RetrieveError, SparqlService,
};
use tempfile::tempdir;

/// Answers queries by inspecting the rendered SPARQL text.
struct CannedService;

impl SparqlService for CannedService {
    fn query(&self, query: &str) -> Result<Vec<String>, PageError> {
        if query.contains("wd:Q666 ") {
            return Err(PageError::Transport("connection refused".into()));
        }
        if query.contains("rdfs:label") {
            Ok(vec!["Beta".into(), "Alpha".into(), "Beta".into()])
        } else {
            Ok(vec!["zeta".into()])
        }
    }
}

fn concept(token: &str) -> ConceptId {
    ConceptId::parse(token).unwrap()
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// === Scenario: one run produces one sorted, deduplicated file per (language, relation) ===
#[test]
fn run_writes_sorted_deduplicated_files() {
    let dir = tempdir().unwrap();
    let config = RetrievalConfig::new(EntityType::Per)
        .with_languages(vec![LanguageCode::English])
        .with_batch_size(10)
        .with_out_dir(dir.path());
    let service = CannedService;
    let writer = GazetteerWriter::new(&service, config);

    let paths = writer.run(&[concept("Q5:human")]).unwrap();

    assert_eq!(paths.len(), 2);
    assert_eq!(
        paths[0].file_name().unwrap().to_string_lossy(),
        "eng-PER-name-wd.txt"
    );
    assert_eq!(
        paths[1].file_name().unwrap().to_string_lossy(),
        "eng-PER-alias-wd.txt"
    );
    // `sort -u` collapsed the duplicate "Beta" and ordered the rest.
    assert_eq!(read_lines(&paths[0]), vec!["Alpha", "Beta"]);
    assert_eq!(read_lines(&paths[1]), vec!["zeta"]);
}

// === Scenario: a failing concept aborts only its own tuple ===
#[test]
fn failed_concept_does_not_block_the_rest() {
    let dir = tempdir().unwrap();
    let config = RetrievalConfig::new(EntityType::Org)
        .with_languages(vec![LanguageCode::Russian])
        .with_relations(vec![RelationKind::Name])
        .with_batch_size(10)
        .with_out_dir(dir.path());
    let service = CannedService;
    let writer = GazetteerWriter::new(&service, config);

    let paths = writer.run(&[concept("Q666"), concept("Q5")]).unwrap();

    assert_eq!(paths.len(), 1);
    // Q666's transport failure contributed nothing; Q5 still landed.
    assert_eq!(read_lines(&paths[0]), vec!["Alpha", "Beta"]);
}

#[test]
fn run_without_concepts_is_rejected() {
    let dir = tempdir().unwrap();
    let config = RetrievalConfig::new(EntityType::Per).with_out_dir(dir.path());
    let service = CannedService;
    let writer = GazetteerWriter::new(&service, config);

    match writer.run(&[]) {
        Err(RetrieveError::NoConcepts) => {}
        other => panic!("expected NoConcepts, got {other:?}"),
    }
}

#[test]
fn file_names_follow_the_inference_convention() {
    let dir = tempdir().unwrap();
    let config = RetrievalConfig::new(EntityType::Gpe)
        .with_languages(vec![LanguageCode::Mandarin])
        .with_relations(vec![RelationKind::Alias])
        .with_batch_size(10)
        .with_out_dir(dir.path());
    let service = CannedService;
    let writer = GazetteerWriter::new(&service, config);

    let paths = writer.run(&[concept("Q6256")]).unwrap();

    let name = paths[0].file_name().unwrap().to_string_lossy().into_owned();
    let inferred = gazkit::infer_from_filename(&name).unwrap();
    assert_eq!(inferred.language, LanguageCode::Mandarin);
    assert_eq!(inferred.entity_type, EntityType::Gpe);
    assert_eq!(inferred.relation, RelationKind::Alias);
}
