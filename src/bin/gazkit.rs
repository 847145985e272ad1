//! Gazkit CLI — gazetteer acquisition and cleaning.
//!
//! Usage:
//!   gazkit fetch --ids Q5:human --entity-type PER --batches 3 --no-subtypes
//!   gazkit clean eng PER lists/eng-PER-name-wd.txt cleaned/eng-PER-name-wd.txt
//!   gazkit clean-dir lists cleaned

use clap::{Parser, Subcommand};
use gazkit::{
    clean_directory, clean_file, ConceptId, EntityType, GazetteerWriter, LanguageCode,
    QueryFacets, QueryShape, RelationKind, RetrievalConfig, WikidataService, DEFAULT_ENDPOINT,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gazkit",
    version,
    about = "Multilingual gazetteer acquisition and cleaning"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch names and aliases for concepts from the knowledge graph
    Fetch {
        /// Concept ids, e.g. Q5 or Q5:human
        #[arg(long, num_args = 1.., required = true)]
        ids: Vec<String>,
        /// Entity type tag used in output file names, e.g. PER
        #[arg(long)]
        entity_type: String,
        /// 3-letter language tags (default: all supported)
        #[arg(long, num_args = 1..)]
        langs: Vec<String>,
        /// Literals per page
        #[arg(long, default_value_t = 50_000)]
        batch_size: usize,
        /// Maximum pages per concept
        #[arg(long, default_value_t = 10)]
        batches: usize,
        /// Query the immediate class only, no subclass expansion
        #[arg(long)]
        no_subtypes: bool,
        /// Do not require a source page in the language's wiki
        #[arg(long)]
        no_wiki: bool,
        /// Restrict to entities with this country Q-id
        #[arg(long)]
        country: Option<String>,
        /// Skip canonical names
        #[arg(long)]
        no_names: bool,
        /// Skip aliases
        #[arg(long)]
        no_aliases: bool,
        /// Retrieve subclass vocabulary terms instead of instances
        #[arg(long)]
        concepts: bool,
        /// SPARQL endpoint URL
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Clean one gazetteer file
    Clean {
        /// 3-letter language tag, e.g. eng
        language: String,
        /// Entity type tag, e.g. PER
        entity_type: String,
        /// Input gazetteer file
        input: PathBuf,
        /// Cleaned output file
        output: PathBuf,
    },
    /// Clean every recognized gazetteer file in a directory
    CleanDir {
        /// Directory of gazetteer files
        indir: PathBuf,
        /// Destination directory (created if absent)
        outdir: PathBuf,
    },
}

fn parse_language(tag: &str) -> Result<LanguageCode, i32> {
    LanguageCode::from_tag3(tag).ok_or_else(|| {
        eprintln!("error: unknown language '{}' (expected eng, rus or cmn)", tag);
        2
    })
}

fn parse_entity_type(tag: &str) -> Result<EntityType, i32> {
    EntityType::from_tag(tag).ok_or_else(|| {
        eprintln!("error: unknown entity type '{}' (expected e.g. PER, ORG, GPE)", tag);
        2
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_fetch(
    ids: &[String],
    entity_type: &str,
    langs: &[String],
    batch_size: usize,
    batches: usize,
    no_subtypes: bool,
    no_wiki: bool,
    country: Option<String>,
    no_names: bool,
    no_aliases: bool,
    concepts: bool,
    endpoint: &str,
    out_dir: PathBuf,
) -> i32 {
    let entity_type = match parse_entity_type(entity_type) {
        Ok(t) => t,
        Err(code) => return code,
    };
    let languages = if langs.is_empty() {
        LanguageCode::ALL.to_vec()
    } else {
        let mut parsed = Vec::new();
        for tag in langs {
            match parse_language(tag) {
                Ok(lang) => parsed.push(lang),
                Err(code) => return code,
            }
        }
        parsed
    };
    let mut relations = Vec::new();
    if !no_names {
        relations.push(RelationKind::Name);
    }
    if !no_aliases {
        relations.push(RelationKind::Alias);
    }
    if relations.is_empty() {
        eprintln!("error: --no-names and --no-aliases together leave nothing to fetch");
        return 2;
    }
    let concept_ids: Vec<ConceptId> = ids
        .iter()
        .filter_map(|token| {
            let parsed = ConceptId::parse(token);
            if parsed.is_none() {
                eprintln!("warning: ignoring concept id '{}' (expected Q... or Q...:label)", token);
            }
            parsed
        })
        .collect();
    let shape = if concepts {
        QueryShape::SubclassTerms
    } else {
        QueryShape::Instances(QueryFacets {
            subtypes: !no_subtypes,
            require_wiki: !no_wiki,
            country,
        })
    };
    let config = RetrievalConfig::new(entity_type)
        .with_languages(languages)
        .with_relations(relations)
        .with_batch_size(batch_size)
        .with_max_batches(batches)
        .with_shape(shape)
        .with_out_dir(out_dir);
    let service = match WikidataService::new(endpoint) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match GazetteerWriter::new(&service, config).run(&concept_ids) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_clean(language: &str, entity_type: &str, input: &PathBuf, output: &PathBuf) -> i32 {
    let language = match parse_language(language) {
        Ok(l) => l,
        Err(code) => return code,
    };
    let entity_type = match parse_entity_type(entity_type) {
        Ok(t) => t,
        Err(code) => return code,
    };
    match clean_file(language, entity_type, input, output) {
        Ok(stats) => {
            println!(
                "{}: kept {} of {} lines ({} deleted, {} modified)",
                output.display(),
                stats.emitted,
                stats.lines_in,
                stats.deleted,
                stats.modified
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_clean_dir(indir: &PathBuf, outdir: &PathBuf) -> i32 {
    match clean_directory(indir, outdir) {
        Ok(cleaned) => {
            println!("Cleaned {} gazetteer file(s) into {}", cleaned.len(), outdir.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Fetch {
            ids,
            entity_type,
            langs,
            batch_size,
            batches,
            no_subtypes,
            no_wiki,
            country,
            no_names,
            no_aliases,
            concepts,
            endpoint,
            out_dir,
        } => cmd_fetch(
            &ids,
            &entity_type,
            &langs,
            batch_size,
            batches,
            no_subtypes,
            no_wiki,
            country,
            no_names,
            no_aliases,
            concepts,
            &endpoint,
            out_dir,
        ),
        Commands::Clean {
            language,
            entity_type,
            input,
            output,
        } => cmd_clean(&language, &entity_type, &input, &output),
        Commands::CleanDir { indir, outdir } => cmd_clean_dir(&indir, &outdir),
    };
    std::process::exit(code);
}
