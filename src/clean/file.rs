//! Line-by-line gazetteer cleaning.
//!
//! Each input line is rewritten by the remove patterns, matched against
//! the deletion rules on a lowercased copy, whitespace-collapsed, and
//! deduplicated against the exact lines already emitted for this file.
//! Input order is preserved; the first occurrence of a duplicate wins.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::clean::rules::{RuleSet, RULES};
use crate::clean::CleanResult;
use crate::vocab::{EntityType, LanguageCode};

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(" +").unwrap());

/// Per-file cleaning counters. Reporting only; never drives control
/// flow. Duplicates are dropped silently and counted nowhere.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleaningStats {
    pub lines_in: usize,
    pub deleted: usize,
    pub modified: usize,
    pub emitted: usize,
}

impl CleaningStats {
    /// Share of input lines deleted, as a percentage. Callers must not
    /// report this for a zero-line input.
    pub fn deleted_pct(&self) -> f64 {
        100.0 * self.deleted as f64 / self.lines_in as f64
    }

    /// Share of input lines modified, as a percentage.
    pub fn modified_pct(&self) -> f64 {
        100.0 * self.modified as f64 / self.lines_in as f64
    }
}

/// Applies one (language, type) rule set to successive lines.
struct LineCleaner {
    rules: &'static RuleSet,
    seen: HashSet<String>,
    stats: CleaningStats,
}

impl LineCleaner {
    fn new(language: LanguageCode, entity_type: EntityType) -> Self {
        Self {
            rules: RULES.rules_for(language, entity_type),
            seen: HashSet::new(),
            stats: CleaningStats::default(),
        }
    }

    /// Returns the surviving line, or `None` if it was deleted or is a
    /// duplicate of an already-emitted line.
    fn push(&mut self, line: &str) -> Option<String> {
        self.stats.lines_in += 1;
        let mut text = line.to_string();
        let mut modified = false;
        for pattern in &self.rules.remove_patterns {
            if pattern.is_match(&text) {
                text = pattern.replace_all(&text, "").into_owned();
                modified = true;
            }
        }
        let lowered = text.trim().to_lowercase();
        // Patterns are only consulted when no bad substring matched.
        let delete = lowered.is_empty()
            || self.rules.bad_substrings.iter().any(|s| lowered.contains(s))
            || self.rules.bad_patterns.iter().any(|p| p.is_match(&lowered));
        if delete {
            self.stats.deleted += 1;
            return None;
        }
        let text = SPACE_RUNS.replace_all(&text, " ").trim().to_string();
        if !self.seen.insert(text.clone()) {
            return None;
        }
        if modified {
            self.stats.modified += 1;
        }
        self.stats.emitted += 1;
        Some(text)
    }
}

/// Cleans an in-memory sequence of lines, returning the surviving lines
/// in input order together with the counters.
pub fn clean_lines<I, S>(
    language: LanguageCode,
    entity_type: EntityType,
    lines: I,
) -> (Vec<String>, CleaningStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaner = LineCleaner::new(language, entity_type);
    let mut out = Vec::new();
    for line in lines {
        if let Some(kept) = cleaner.push(line.as_ref()) {
            out.push(kept);
        }
    }
    (out, cleaner.stats)
}

/// Streams `input` through the rules for (language, type) into
/// `output`, one surviving line at a time.
///
/// An I/O failure is fatal for this file only; a directory batch
/// continues with its siblings.
pub fn clean_file(
    language: LanguageCode,
    entity_type: EntityType,
    input: &Path,
    output: &Path,
) -> CleanResult<CleaningStats> {
    info!(file = %input.display(), lang = %language, entity_type = %entity_type, "cleaning gazetteer");
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);
    let mut cleaner = LineCleaner::new(language, entity_type);
    for line in reader.lines() {
        let line = line?;
        if let Some(kept) = cleaner.push(&line) {
            writeln!(writer, "{kept}")?;
        }
    }
    writer.flush()?;
    let stats = cleaner.stats;
    // Percentages are undefined for an empty input.
    if stats.lines_in > 0 {
        info!(
            file = %input.display(),
            deleted = stats.deleted,
            deleted_pct = stats.deleted_pct(),
            modified = stats.modified,
            modified_pct = stats.modified_pct(),
            total = stats.lines_in,
            "gazetteer cleaned"
        );
    } else {
        info!(file = %input.display(), "gazetteer input was empty");
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_eng_per(lines: &[&str]) -> (Vec<String>, CleaningStats) {
        clean_lines(LanguageCode::English, EntityType::Per, lines.iter().copied())
    }

    // === Scenario: digit-only lines die for every language and type ===
    #[test]
    fn digit_only_lines_are_always_deleted() {
        for language in LanguageCode::ALL {
            for entity_type in EntityType::ALL {
                let (out, stats) = clean_lines(language, entity_type, ["123456"]);
                assert!(out.is_empty(), "{language}/{entity_type} kept a digit-only line");
                assert_eq!(stats.deleted, 1);
            }
        }
    }

    // === Scenario: parenthetical stripping for every type except CHEM ===
    #[test]
    fn parentheticals_are_stripped_except_for_chem() {
        for entity_type in EntityType::ALL {
            let (out, stats) =
                clean_lines(LanguageCode::Russian, entity_type, ["John (Doe)"]);
            if entity_type.keeps_parentheticals() {
                assert_eq!(out, vec!["John (Doe)"]);
                assert_eq!(stats.modified, 0);
            } else {
                assert_eq!(out, vec!["John"], "{entity_type} did not strip parens");
                assert_eq!(stats.modified, 1);
            }
        }
    }

    #[test]
    fn unbalanced_trailing_paren_is_removed() {
        let (out, _) = clean_eng_per(&["Anna Maria (unfinished"]);
        assert_eq!(out, vec!["Anna Maria"]);
    }

    // === Scenario: dedup is exact and first-occurrence wins ===
    #[test]
    fn duplicates_keep_first_occurrence_only() {
        let (out, stats) = clean_eng_per(&["Alice", "Bob", "Alice", "alice"]);
        assert_eq!(out, vec!["Alice", "Bob", "alice"]);
        // Dropped duplicates are neither deleted nor modified.
        assert_eq!(stats.deleted, 0);
        assert_eq!(stats.modified, 0);
        assert_eq!(stats.emitted, 3);
        assert_eq!(stats.lines_in, 4);
    }

    #[test]
    fn duplicate_after_rewrite_is_not_counted_modified() {
        // Second line rewrites to "Mary", which was already emitted.
        let (out, stats) = clean_eng_per(&["Mary", "Mary (the Baker)"]);
        assert_eq!(out, vec!["Mary"]);
        assert_eq!(stats.modified, 0);
        assert_eq!(stats.emitted, 1);
    }

    #[test]
    fn bad_substrings_short_circuit_before_patterns() {
        // " of " is an eng/PER bad substring; the line dies regardless
        // of any pattern.
        let (out, stats) = clean_eng_per(&["Duke of Wellington"]);
        assert!(out.is_empty());
        assert_eq!(stats.deleted, 1);
    }

    #[test]
    fn lines_emptied_by_rewriting_are_deleted() {
        let (out, stats) = clean_eng_per(&["(everything in parens)", "   "]);
        assert!(out.is_empty());
        assert_eq!(stats.deleted, 2);
        assert_eq!(stats.modified, 0);
    }

    #[test]
    fn space_runs_collapse_to_one() {
        let (out, _) = clean_eng_per(&["John    Ronald   Reuel   Tolkien"]);
        assert_eq!(out, vec!["John Ronald Reuel Tolkien"]);
    }

    #[test]
    fn eng_org_year_pattern_deletes() {
        let (out, _) = clean_lines(
            LanguageCode::English,
            EntityType::Org,
            ["Expo 2020", "Acme Corporation"],
        );
        assert_eq!(out, vec!["Acme Corporation"]);
    }

    // === Scenario: the spec's end-to-end PER/eng example ===
    #[test]
    fn end_to_end_per_eng_example() {
        let (out, stats) =
            clean_eng_per(&["John Smith", "123456", "Mary (the Baker)", "john smith"]);
        assert_eq!(out, vec!["John Smith", "Mary", "john smith"]);
        assert_eq!(stats.lines_in, 4);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.emitted, 3);
    }

    // === Scenario: cleaning its own output changes nothing ===
    #[test]
    fn cleaning_is_idempotent() {
        let input = [
            "John Smith",
            "123456",
            "Mary (the Baker)",
            "john smith",
            "Duke of Wellington",
            "A  B   C",
            "A B C",
        ];
        let (first, _) = clean_eng_per(&input);
        let (second, stats) =
            clean_lines(LanguageCode::English, EntityType::Per, first.iter());
        assert_eq!(first, second);
        assert_eq!(stats.deleted, 0);
        assert_eq!(stats.modified, 0);
        assert_eq!(stats.emitted, first.len());
    }

    #[test]
    fn percentages_use_original_line_count() {
        let (_, stats) = clean_eng_per(&["123456", "John Smith", "John Smith", "John Smith"]);
        // 4 lines in, 1 deleted, dedup leaves 1 emitted.
        assert_eq!(stats.lines_in, 4);
        assert!((stats.deleted_pct() - 25.0).abs() < f64::EPSILON);
        assert!((stats.modified_pct() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_line_input_produces_zero_stats() {
        let (out, stats) = clean_eng_per(&[]);
        assert!(out.is_empty());
        assert_eq!(stats, CleaningStats::default());
    }
}
