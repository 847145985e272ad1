//! Cleaning rule tables, merged and compiled once at startup.
//!
//! Three rule families per (language, type) pair:
//!
//! - *remove patterns*: regexes whose matches are excised from the
//!   original-case line;
//! - *bad substrings*: literals whose presence in the lowercased copy
//!   deletes the line;
//! - *bad patterns*: regexes checked against the lowercased copy when
//!   no bad substring matched.
//!
//! Universal rules apply to every language: digit-only lines are always
//! deleted, and parenthetical content (including an unbalanced trailing
//! `(...`) is removed for every type except CHEM, whose names carry
//! formulas in parentheses. Language-specific tables are merged in by
//! per-key concatenation, so both the universal and the specific rules
//! fire. Russian and Mandarin define no specific rules; that is
//! legitimate, not missing.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocab::{EntityType, LanguageCode};

/// Compiled cleaning rules for one (language, type) pair.
#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    pub remove_patterns: Vec<Regex>,
    pub bad_substrings: Vec<String>,
    pub bad_patterns: Vec<Regex>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.remove_patterns.is_empty()
            && self.bad_substrings.is_empty()
            && self.bad_patterns.is_empty()
    }
}

/// Process-wide rule tables; compiled on first access.
///
/// A malformed pattern panics here, at startup, never per line.
pub static RULES: Lazy<PatternRuleSet> = Lazy::new(PatternRuleSet::build);

/// All compiled rules, keyed by (language, type).
pub struct PatternRuleSet {
    table: HashMap<(LanguageCode, EntityType), RuleSet>,
    empty: RuleSet,
}

impl PatternRuleSet {
    /// Pure, total lookup: every supported pair yields a well-formed
    /// (possibly empty) rule set.
    pub fn rules_for(&self, language: LanguageCode, entity_type: EntityType) -> &RuleSet {
        self.table
            .get(&(language, entity_type))
            .unwrap_or(&self.empty)
    }

    fn build() -> Self {
        let universal = universal_rules();
        let mut table = HashMap::new();
        for language in LanguageCode::ALL {
            let specific = specific_rules(language);
            for entity_type in EntityType::ALL {
                table.insert(
                    (language, entity_type),
                    merge_and_compile(&universal, &specific, entity_type),
                );
            }
        }
        Self {
            table,
            empty: RuleSet::default(),
        }
    }
}

/// Uncompiled rule source for one language (or the universal layer),
/// keyed by entity type.
#[derive(Default)]
struct RawRules {
    remove_patterns: HashMap<EntityType, Vec<&'static str>>,
    bad_substrings: HashMap<EntityType, Vec<&'static str>>,
    bad_patterns: HashMap<EntityType, Vec<&'static str>>,
}

type RawTable = HashMap<EntityType, Vec<&'static str>>;

fn universal_rules() -> RawRules {
    let mut rules = RawRules::default();
    for t in EntityType::ALL {
        // kill any name that's all digits
        rules.bad_patterns.insert(t, vec![r"^\d+$"]);
        if !t.keeps_parentheticals() {
            // remove any substring in parens, balanced or trailing
            rules.remove_patterns.insert(t, vec![r"\(.*\)", r"\(.*$"]);
        }
    }
    rules
}

fn specific_rules(language: LanguageCode) -> RawRules {
    match language {
        LanguageCode::English => english_rules(),
        // No language-specific rules yet; universal rules alone apply.
        LanguageCode::Russian | LanguageCode::Mandarin => RawRules::default(),
    }
}

fn english_rules() -> RawRules {
    use EntityType::*;
    let mut rules = RawRules::default();
    rules.bad_substrings = HashMap::from([
        (Per, vec![" of ", " the ", "/"]),
        (Org, vec!["season"]),
        (Gpe, vec!["local electoral", " for ", "/", "ward no"]),
        (Fac, vec!["barn "]),
        (Fnam, vec!["фамилия", "значения", " of"]),
        (Lang, vec!["ISO"]),
        (Chem, vec!["/", "(", " of ", " the "]),
    ]);
    rules.bad_patterns = HashMap::from([(Org, vec![r"\d\d\d\d"]), (Chem, vec![r"\(.\)"])]);
    rules
}

/// Per-key concatenation of the specific and universal layers, then
/// regex compilation. Both layers apply; neither overrides the other.
fn merge_and_compile(universal: &RawRules, specific: &RawRules, entity_type: EntityType) -> RuleSet {
    let concat = |a: &RawTable, b: &RawTable| -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(v) = a.get(&entity_type) {
            out.extend(v);
        }
        if let Some(v) = b.get(&entity_type) {
            out.extend(v);
        }
        out
    };
    let compile = |patterns: Vec<&'static str>| -> Vec<Regex> {
        patterns
            .into_iter()
            .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid cleaning pattern {p:?}: {e}")))
            .collect()
    };
    RuleSet {
        remove_patterns: compile(concat(&specific.remove_patterns, &universal.remove_patterns)),
        bad_substrings: concat(&specific.bad_substrings, &universal.bad_substrings)
            .into_iter()
            .map(str::to_string)
            .collect(),
        bad_patterns: compile(concat(&specific.bad_patterns, &universal.bad_patterns)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: the lookup is total over every supported pair ===
    #[test]
    fn rules_for_is_total() {
        for language in LanguageCode::ALL {
            for entity_type in EntityType::ALL {
                let rules = RULES.rules_for(language, entity_type);
                // Digit-only deletion is always on.
                assert!(
                    rules.bad_patterns.iter().any(|p| p.as_str() == r"^\d+$"),
                    "missing digit rule for {language}/{entity_type}"
                );
                assert!(!rules.is_empty());
            }
        }
    }

    #[test]
    fn chem_is_exempt_from_parenthetical_stripping() {
        for language in LanguageCode::ALL {
            let chem = RULES.rules_for(language, EntityType::Chem);
            assert!(chem.remove_patterns.is_empty());
            let per = RULES.rules_for(language, EntityType::Per);
            assert_eq!(per.remove_patterns.len(), 2);
        }
    }

    // === Scenario: merging concatenates, never overrides ===
    #[test]
    fn english_specific_rules_are_appended_to_universal() {
        let org = RULES.rules_for(LanguageCode::English, EntityType::Org);
        // Specific year pattern and the universal digit pattern coexist.
        assert!(org.bad_patterns.iter().any(|p| p.as_str() == r"\d\d\d\d"));
        assert!(org.bad_patterns.iter().any(|p| p.as_str() == r"^\d+$"));
        assert!(org.bad_substrings.contains(&"season".to_string()));
    }

    #[test]
    fn cross_languages_carry_only_universal_rules() {
        for language in [LanguageCode::Russian, LanguageCode::Mandarin] {
            let per = RULES.rules_for(language, EntityType::Per);
            assert!(per.bad_substrings.is_empty());
            assert_eq!(per.bad_patterns.len(), 1);
            assert_eq!(per.remove_patterns.len(), 2);
        }
    }

    #[test]
    fn english_chem_blocks_any_parenthesis_by_substring() {
        let chem = RULES.rules_for(LanguageCode::English, EntityType::Chem);
        assert!(chem.bad_substrings.contains(&"(".to_string()));
        assert!(chem.bad_patterns.iter().any(|p| p.as_str() == r"\(.\)"));
    }
}
