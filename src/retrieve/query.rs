//! SPARQL query shapes for gazetteer retrieval.
//!
//! Three independent boolean facets (subtype expansion, source-page
//! requirement, country restriction) select exactly one of eight
//! instance templates. A ninth template retrieves subclass vocabulary
//! terms for concept gazetteers. Queries are kept minimal so the public
//! endpoint can serve large offsets.
//!
//! Placeholders: `{CLASS}` concept Q-id, `{REL}` relation predicate,
//! `{LANG}` 2-letter language tag, `{CTY}` country Q-id, `{OFF}`/`{LIM}`
//! paging. Rendering is straight substitution with no validation; the
//! caller is responsible for injection-safe identifiers.

use crate::vocab::{ConceptId, LanguageCode, RelationKind};

const SUB_WIKI_CTY: &str = r#"SELECT ?n { wd:{CLASS} ^wdt:P279*/^wdt:P31 ?x. ?x wdt:P17 wd:{CTY}; {REL} ?n. FILTER(lang(?n) = "{LANG}") ?wiki schema:about ?name; schema:isPartOf <https://{LANG}.wikipedia.org/>.} OFFSET {OFF} LIMIT {LIM}"#;
const SUB_WIKI_NOCTY: &str = r#"SELECT ?n { wd:{CLASS} ^wdt:P279*/^wdt:P31 ?name. ?name {REL} ?n. FILTER(lang(?n) = "{LANG}") ?wiki schema:about ?name; schema:isPartOf <https://{LANG}.wikipedia.org/>.} OFFSET {OFF} LIMIT {LIM}"#;
const SUB_NOWIKI_CTY: &str = r#"SELECT DISTINCT ?n { wd:{CLASS} ^wdt:P279*/^wdt:P31 ?x. ?x wdt:P17 wd:{CTY}; {REL} ?n FILTER(lang(?n) = "{LANG}")} OFFSET {OFF} LIMIT {LIM}"#;
const SUB_NOWIKI_NOCTY: &str = r#"SELECT DISTINCT ?n { wd:{CLASS} ^wdt:P279*/^wdt:P31/{REL} ?n FILTER(lang(?n) = "{LANG}")} OFFSET {OFF} LIMIT {LIM}"#;
const NOSUB_WIKI_CTY: &str = r#"SELECT ?n { wd:{CLASS} ^wdt:P31 ?x; wdt:P17 wd:{CTY}. ?name {REL} ?n. FILTER(lang(?n) = "{LANG}") ?wiki schema:about ?name; schema:isPartOf <https://{LANG}.wikipedia.org/>.} OFFSET {OFF} LIMIT {LIM}"#;
const NOSUB_WIKI_NOCTY: &str = r#"SELECT ?n { wd:{CLASS} ^wdt:P31 ?name. ?name {REL} ?n. FILTER(lang(?n) = "{LANG}") ?wiki schema:about ?name; schema:isPartOf <https://{LANG}.wikipedia.org/>.} OFFSET {OFF} LIMIT {LIM}"#;
const NOSUB_NOWIKI_CTY: &str = r#"SELECT DISTINCT ?n { wd:{CLASS} ^wdt:P31 ?x. ?x wdt:P17 wd:{CTY}; {REL} ?n FILTER(lang(?n) = "{LANG}")} OFFSET {OFF} LIMIT {LIM}"#;
const NOSUB_NOWIKI_NOCTY: &str = r#"SELECT DISTINCT ?n { wd:{CLASS} ^wdt:P31/{REL} ?n FILTER(lang(?n) = "{LANG}")} OFFSET {OFF} LIMIT {LIM}"#;

/// Labels of subclasses rather than instance names. Used for concept
/// vocabularies (e.g. all kinds of aircraft) where instances are not
/// wanted.
const SUBCLASS_TERMS: &str = r#"SELECT DISTINCT ?n { wd:{CLASS} ^wdt:P279+ ?x. ?x {REL} ?n FILTER(lang(?n) = "{LANG}")} OFFSET {OFF} LIMIT {LIM}"#;

/// The three independent facets that select an instance query shape.
#[derive(Debug, Clone, Default)]
pub struct QueryFacets {
    /// Expand `P279` subclass chains below the concept.
    pub subtypes: bool,
    /// Require a source page in the target language's wiki.
    pub require_wiki: bool,
    /// Restrict to entities whose `P17` country matches this Q-id.
    pub country: Option<String>,
}

impl QueryFacets {
    /// Selects the template for this facet combination.
    ///
    /// Total over all eight cases; there is no fallthrough.
    pub fn template(&self) -> &'static str {
        match (self.subtypes, self.require_wiki, self.country.is_some()) {
            (true, true, true) => SUB_WIKI_CTY,
            (true, true, false) => SUB_WIKI_NOCTY,
            (true, false, true) => SUB_NOWIKI_CTY,
            (true, false, false) => SUB_NOWIKI_NOCTY,
            (false, true, true) => NOSUB_WIKI_CTY,
            (false, true, false) => NOSUB_WIKI_NOCTY,
            (false, false, true) => NOSUB_NOWIKI_CTY,
            (false, false, false) => NOSUB_NOWIKI_NOCTY,
        }
    }
}

/// Which vocabulary a retrieval run targets.
#[derive(Debug, Clone)]
pub enum QueryShape {
    /// Instances of the concept, shaped by the facet triple.
    Instances(QueryFacets),
    /// Labels of the concept's subclasses.
    SubclassTerms,
}

impl QueryShape {
    pub fn template(&self) -> &'static str {
        match self {
            QueryShape::Instances(facets) => facets.template(),
            QueryShape::SubclassTerms => SUBCLASS_TERMS,
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            QueryShape::Instances(facets) => facets.country.as_deref(),
            QueryShape::SubclassTerms => None,
        }
    }
}

/// Renders a template by placeholder substitution.
pub fn render(
    template: &str,
    concept: &ConceptId,
    relation: RelationKind,
    language: LanguageCode,
    offset: usize,
    limit: usize,
    country: Option<&str>,
) -> String {
    template
        .replace("{CLASS}", &concept.qid)
        .replace("{REL}", relation.predicate())
        .replace("{LANG}", language.tag2())
        .replace("{OFF}", &offset.to_string())
        .replace("{LIM}", &limit.to_string())
        .replace("{CTY}", country.unwrap_or(""))
}
