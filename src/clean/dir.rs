//! Directory-mode cleaning with filename-convention inference.
//!
//! Gazetteer files are named `<lang3>-<TYPE>-<name|alias>-...`; the
//! first three hyphen fields are mandatory and validated against the
//! closed vocabularies. Files that fail inference are skipped with a
//! diagnostic, never fatal to the batch.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::clean::file::{clean_file, CleaningStats};
use crate::clean::CleanResult;
use crate::vocab::{EntityType, LanguageCode, RelationKind};

/// (language, type, relation) inferred from a gazetteer file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredName {
    pub language: LanguageCode,
    pub entity_type: EntityType,
    pub relation: RelationKind,
}

/// Pure parser for the gazetteer naming convention.
///
/// Requires at least three hyphen fields: a 3-letter language tag, a
/// type tag, and a relation tag (`name` or `alias`). Anything after the
/// third field is ignored.
pub fn infer_from_filename(name: &str) -> Option<InferredName> {
    let mut fields = name.split('-');
    let language = LanguageCode::from_tag3(fields.next()?)?;
    let entity_type = EntityType::from_tag(fields.next()?)?;
    let relation = RelationKind::from_tag(fields.next()?)?;
    Some(InferredName {
        language,
        entity_type,
        relation,
    })
}

/// Cleans every recognized gazetteer file in `indir`, writing cleaned
/// versions under the same names in `outdir`.
///
/// Creates `outdir` if absent. Unrecognized names and per-file failures
/// are logged and skipped; the rest of the batch proceeds. Returns the
/// stats of every file cleaned.
pub fn clean_directory(indir: &Path, outdir: &Path) -> CleanResult<Vec<CleaningStats>> {
    fs::create_dir_all(outdir)?;
    let mut cleaned = Vec::new();
    for entry in fs::read_dir(indir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let Some(inferred) = infer_from_filename(&name) else {
            warn!(file = %name, "unrecognized gazetteer file name, skipping");
            continue;
        };
        let dest = outdir.join(name.as_ref());
        match clean_file(inferred.language, inferred.entity_type, &path, &dest) {
            Ok(stats) => cleaned.push(stats),
            Err(err) => warn!(file = %name, %err, "failed to clean file, continuing"),
        }
    }
    Ok(cleaned)
}
