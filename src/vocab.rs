//! Closed vocabularies shared by the acquisition and cleaning pipelines.
//!
//! Languages, entity types and relation kinds are fixed sets defined at
//! startup and never extended at runtime. The knowledge graph's own type
//! system is never consulted; `EntityType` is purely a lookup key.

use std::fmt;

/// Supported gazetteer languages.
///
/// Each language has a canonical 3-letter tag used in file names and a
/// 2-letter tag used inside queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageCode {
    English,
    Russian,
    Mandarin,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 3] = [
        LanguageCode::English,
        LanguageCode::Russian,
        LanguageCode::Mandarin,
    ];

    /// 3-letter tag, e.g. `eng`. Used in gazetteer file names.
    pub fn tag3(&self) -> &'static str {
        match self {
            LanguageCode::English => "eng",
            LanguageCode::Russian => "rus",
            LanguageCode::Mandarin => "cmn",
        }
    }

    /// 2-letter tag, e.g. `en`. Used inside SPARQL queries.
    pub fn tag2(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Russian => "ru",
            LanguageCode::Mandarin => "zh",
        }
    }

    pub fn from_tag3(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.tag3() == tag)
    }

    pub fn from_tag2(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.tag2() == tag)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag3())
    }
}

/// Semantic entity categories a gazetteer can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Air,
    Airc,
    Chem,
    Comm,
    Comp,
    Evnt,
    Fac,
    Fnam,
    Gnam,
    Govt,
    Gpe,
    Lang,
    Loc,
    Mil,
    Money,
    Norp,
    Org,
    Per,
    Pol,
    Title,
    Veh,
}

impl EntityType {
    pub const ALL: [EntityType; 21] = [
        EntityType::Air,
        EntityType::Airc,
        EntityType::Chem,
        EntityType::Comm,
        EntityType::Comp,
        EntityType::Evnt,
        EntityType::Fac,
        EntityType::Fnam,
        EntityType::Gnam,
        EntityType::Govt,
        EntityType::Gpe,
        EntityType::Lang,
        EntityType::Loc,
        EntityType::Mil,
        EntityType::Money,
        EntityType::Norp,
        EntityType::Org,
        EntityType::Per,
        EntityType::Pol,
        EntityType::Title,
        EntityType::Veh,
    ];

    /// Upper-case tag used in file names, e.g. `PER`.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityType::Air => "AIR",
            EntityType::Airc => "AIRC",
            EntityType::Chem => "CHEM",
            EntityType::Comm => "COMM",
            EntityType::Comp => "COMP",
            EntityType::Evnt => "EVNT",
            EntityType::Fac => "FAC",
            EntityType::Fnam => "FNAM",
            EntityType::Gnam => "GNAM",
            EntityType::Govt => "GOVT",
            EntityType::Gpe => "GPE",
            EntityType::Lang => "LANG",
            EntityType::Loc => "LOC",
            EntityType::Mil => "MIL",
            EntityType::Money => "MONEY",
            EntityType::Norp => "NORP",
            EntityType::Org => "ORG",
            EntityType::Per => "PER",
            EntityType::Pol => "POL",
            EntityType::Title => "TITLE",
            EntityType::Veh => "VEH",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.tag() == tag)
    }

    /// Chemical names keep their parenthetical formulas; every other
    /// type has parenthetical content stripped.
    pub fn keeps_parentheticals(&self) -> bool {
        matches!(self, EntityType::Chem)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether a retrieved literal is a canonical name or an alternate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Name,
    Alias,
}

impl RelationKind {
    pub const ALL: [RelationKind; 2] = [RelationKind::Name, RelationKind::Alias];

    /// Knowledge-graph predicate for this relation.
    pub fn predicate(&self) -> &'static str {
        match self {
            RelationKind::Name => "rdfs:label",
            RelationKind::Alias => "skos:altLabel",
        }
    }

    /// Short tag used in output file names.
    pub fn file_tag(&self) -> &'static str {
        match self {
            RelationKind::Name => "name",
            RelationKind::Alias => "alias",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.file_tag() == tag)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_tag())
    }
}

/// Opaque knowledge-graph identifier, optionally paired with a
/// human-readable label for logging. Never dereferenced internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptId {
    pub qid: String,
    pub label: Option<String>,
}

impl ConceptId {
    /// Parses a concept token of the form `Q5` or `Q5:human`.
    ///
    /// Tokens that do not start with `Q` are rejected.
    pub fn parse(token: &str) -> Option<Self> {
        if !token.starts_with('Q') {
            return None;
        }
        match token.split_once(':') {
            Some((qid, label)) => Some(ConceptId {
                qid: qid.to_string(),
                label: Some(label.to_string()),
            }),
            None => Some(ConceptId {
                qid: token.to_string(),
                label: None,
            }),
        }
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", self.qid, label),
            None => f.write_str(&self.qid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags_round_trip() {
        for lang in LanguageCode::ALL {
            assert_eq!(LanguageCode::from_tag3(lang.tag3()), Some(lang));
            assert_eq!(LanguageCode::from_tag2(lang.tag2()), Some(lang));
        }
        assert_eq!(LanguageCode::from_tag3("deu"), None);
        assert_eq!(LanguageCode::from_tag2("de"), None);
    }

    #[test]
    fn entity_type_tags_round_trip() {
        for t in EntityType::ALL {
            assert_eq!(EntityType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(EntityType::from_tag("NOPE"), None);
        // Tags are upper-case only
        assert_eq!(EntityType::from_tag("per"), None);
    }

    #[test]
    fn only_chem_keeps_parentheticals() {
        for t in EntityType::ALL {
            assert_eq!(t.keeps_parentheticals(), t == EntityType::Chem);
        }
    }

    #[test]
    fn relation_predicates() {
        assert_eq!(RelationKind::Name.predicate(), "rdfs:label");
        assert_eq!(RelationKind::Alias.predicate(), "skos:altLabel");
        assert_eq!(RelationKind::from_tag("alias"), Some(RelationKind::Alias));
        assert_eq!(RelationKind::from_tag("aliases"), None);
    }

    #[test]
    fn concept_id_parsing() {
        let plain = ConceptId::parse("Q5").unwrap();
        assert_eq!(plain.qid, "Q5");
        assert_eq!(plain.label, None);
        assert_eq!(plain.to_string(), "Q5");

        let labelled = ConceptId::parse("Q5:human").unwrap();
        assert_eq!(labelled.qid, "Q5");
        assert_eq!(labelled.label.as_deref(), Some("human"));
        assert_eq!(labelled.to_string(), "Q5 (human)");

        assert_eq!(ConceptId::parse("5Q"), None);
        assert_eq!(ConceptId::parse("wd:Q5"), None);
    }
}
