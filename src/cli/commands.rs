//! CLI command definitions for the catalog guardrail agent
//!
//! Provides Clap-based command definitions for answering user queries with
//! safety gating, checking marketing drafts against the catalog, and
//! listing the loaded catalog.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::output::{CatalogOutput, EvaluationOutput, OutputFormat};
use super::ExitCode;
use crate::catalog::CatalogStore;
use crate::engine::GuardrailEngine;
use crate::error::{GuardError, Result};
use crate::lexicon::Lexicon;
use crate::response;
use crate::retrieval::{KeywordRetriever, Retriever};

/// Default catalog shipped with the crate.
const DEFAULT_CATALOG: &str = "data/products_catalog.csv";

/// Catalog Guardrail Agent CLI
///
/// Cross-reference free text against the product catalog and enforce
/// safety and factual-accuracy guardrails before content is surfaced.
#[derive(Parser, Debug)]
#[command(name = "catalog-guard")]
#[command(about = "Catalog Guardrail Agent - Check content against product facts", long_about = None)]
#[command(version)]
pub struct GuardCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: GuardCommands,
}

/// Available guardrail commands
#[derive(Subcommand, Debug)]
pub enum GuardCommands {
    /// Answer a user query with safety gating
    ///
    /// Retrieves the product the query refers to, cross-references the
    /// query against the product's contraindications, and renders either
    /// a blocked or a passed response.
    Ask {
        /// The user query text
        #[arg(short = 'Q', long)]
        query: String,

        /// Path to the product catalog CSV
        #[arg(short, long, default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        /// Path to a YAML lexicon file (built-in defaults if omitted)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,

        /// Output format for results
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Check a marketing draft against catalog facts
    ///
    /// Runs the fact and safety-claim guardrails for the named product
    /// and reports every issue found.
    Check {
        /// The draft text to check
        #[arg(short, long, conflicts_with = "draft_file")]
        draft: Option<String>,

        /// Read the draft text from a file
        #[arg(long, conflicts_with = "draft")]
        draft_file: Option<PathBuf>,

        /// Product id the draft is about
        #[arg(short, long)]
        product: String,

        /// Path to the product catalog CSV
        #[arg(short, long, default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        /// Path to a YAML lexicon file (built-in defaults if omitted)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,

        /// Output format for results
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// List the products in the catalog
    Catalog {
        /// Path to the product catalog CSV
        #[arg(short, long, default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        /// Output format for results
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },
}

fn load_lexicon(path: Option<PathBuf>) -> Result<Lexicon> {
    match path {
        Some(path) => Lexicon::from_yaml_file(path),
        None => Ok(Lexicon::default()),
    }
}

/// Execute the ask command (query path)
pub fn execute_ask(
    query: &str,
    catalog_path: PathBuf,
    lexicon_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    if query.trim().is_empty() {
        return Err(GuardError::invalid_input("query must not be empty"));
    }

    let catalog = CatalogStore::load(&catalog_path)?;
    let engine = GuardrailEngine::new(load_lexicon(lexicon_path)?);
    let retriever = KeywordRetriever::default();

    let output = match retriever.retrieve(query, &catalog) {
        Some(product) => {
            let issues = engine.evaluate_query(query, product);
            let response = response::compose_answer(product, &issues);
            EvaluationOutput::new(Some(product), issues, response)
        }
        None => EvaluationOutput::new(None, Vec::new(), response::compose_no_match()),
    };

    let decision = output.decision;
    output.render(format)?;
    Ok(decision.into())
}

/// Execute the check command (draft path)
pub fn execute_check(
    draft: Option<String>,
    draft_file: Option<PathBuf>,
    product_id: &str,
    catalog_path: PathBuf,
    lexicon_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let draft = match (draft, draft_file) {
        (Some(text), None) => text,
        (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
            GuardError::invalid_input(format!("cannot read draft file {}: {}", path.display(), e))
        })?,
        _ => {
            return Err(GuardError::invalid_input(
                "provide exactly one of --draft or --draft-file",
            ))
        }
    };

    let catalog = CatalogStore::load(&catalog_path)?;
    let engine = GuardrailEngine::new(load_lexicon(lexicon_path)?);

    match engine.evaluate_draft_by_id(&draft, product_id, &catalog) {
        Ok(issues) => {
            // Id was just validated by evaluate_draft_by_id.
            let product = catalog
                .get(product_id)
                .ok_or_else(|| GuardError::internal("product vanished after lookup"))?;
            let response = response::compose_draft_review(product, &issues);
            let output = EvaluationOutput::new(Some(product), issues, response);
            let decision = output.decision;
            output.render(format)?;
            Ok(decision.into())
        }
        Err(GuardError::ProductNotFound(id)) => {
            // Recoverable: render a no-match response, never crash.
            let mut response = response::compose_no_match();
            response.text = format!("Product '{}' is not in the catalog.", id);
            let output = EvaluationOutput::new(None, Vec::new(), response);
            output.render(format)?;
            Ok(ExitCode::NoMatch)
        }
        Err(err) => Err(err),
    }
}

/// Execute the catalog command
pub fn execute_catalog(catalog_path: PathBuf, format: OutputFormat) -> Result<ExitCode> {
    let catalog = CatalogStore::load(&catalog_path)?;
    let output = CatalogOutput::from_store(&catalog);
    output.render(format)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        GuardCli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask() {
        let cli = GuardCli::try_parse_from([
            "catalog-guard",
            "ask",
            "--query",
            "Is Ashwagandha good for stress?",
        ])
        .unwrap();
        assert!(matches!(cli.command, GuardCommands::Ask { .. }));
    }

    #[test]
    fn test_parse_check_conflicting_drafts_rejected() {
        let result = GuardCli::try_parse_from([
            "catalog-guard",
            "check",
            "--draft",
            "text",
            "--draft-file",
            "draft.txt",
            "--product",
            "KA-P002",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_ask_empty_query() {
        let result = execute_ask(
            "  ",
            PathBuf::from(DEFAULT_CATALOG),
            None,
            OutputFormat::Json,
        );
        assert!(matches!(result, Err(GuardError::InvalidInput(_))));
    }

    #[test]
    fn test_execute_check_requires_a_draft() {
        let result = execute_check(
            None,
            None,
            "KA-P002",
            PathBuf::from(DEFAULT_CATALOG),
            None,
            OutputFormat::Json,
        );
        assert!(matches!(result, Err(GuardError::InvalidInput(_))));
    }
}
