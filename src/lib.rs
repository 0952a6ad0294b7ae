//! Catalog Guardrail Agent
//!
//! Cross-references free-text content (user queries or marketing drafts)
//! against a structured catalog of product records, and enforces safety
//! and factual-accuracy guardrails before text is surfaced to a user.
//!
//! ## Architecture
//!
//! 1. **Catalog** (`catalog`): immutable, in-memory index of product
//!    records loaded from CSV, with one normalization point for
//!    loosely-typed cells.
//!
//! 2. **Lexicon** (`lexicon`): configurable phrase sets for claim and risk
//!    detection; configuration, never literals inside rule logic.
//!
//! 3. **Matcher** (`matcher`): case-insensitive, whitespace-normalized
//!    substring containment. Purely lexical.
//!
//! 4. **Engine** (`engine`): ordered registry of independent guardrail
//!    rules; draft-phase rules check marketing copy, query-phase rules
//!    gate answers. A faulty rule never prevents the others from running.
//!
//! 5. **Retrieval** (`retrieval`): pluggable query-to-product matching
//!    strategy behind a trait; the engine never depends on how retrieval
//!    happened.
//!
//! 6. **Response gate** (`response`): maps the issue list to a
//!    blocked/passed decision and renders the user-facing message.
//!
//! ## Example
//!
//! ```rust
//! use catalog_guard::{
//!     catalog::{AnimalProducts, CatalogStore, ProductRecord},
//!     engine::GuardrailEngine,
//!     lexicon::Lexicon,
//!     response::{decide, Decision},
//! };
//!
//! let catalog = CatalogStore::from_records(vec![ProductRecord {
//!     product_id: "KA-P002".to_string(),
//!     name: "Ashwagandha Stress Balance Tablets".to_string(),
//!     contraindications_short: Some("Caution in thyroid disorders".to_string()),
//!     contains_animal_products: AnimalProducts::No,
//!     target_concerns: "stress resilience".to_string(),
//!     key_herbs: "ashwagandha root extract".to_string(),
//! }])
//! .unwrap();
//!
//! let engine = GuardrailEngine::new(Lexicon::default());
//! let issues = engine
//!     .evaluate_query_by_id("Can I take this with thyroid issues?", "KA-P002", &catalog)
//!     .unwrap();
//! assert_eq!(decide(&issues), Decision::Blocked);
//! ```

pub mod catalog;
pub mod cli;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod response;
pub mod retrieval;

pub use catalog::{AnimalProducts, CatalogStore, ProductRecord};
pub use engine::rules::{Issue, IssueKind, Rule, RulePhase};
pub use engine::GuardrailEngine;
pub use error::{GuardError, Result};
pub use lexicon::Lexicon;
pub use response::{decide, Decision, ResponseMessage};
pub use retrieval::{KeywordRetriever, Retriever};

pub use cli::{ExitCode, GuardCli, OutputFormat};

/// Agent version (from Cargo.toml)
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Agent identifier
pub const AGENT_ID: &str = "catalog-guard-agent";

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
pub fn run_cli(cli: GuardCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                GuardError::CatalogLoad(_) => ExitCode::FileError,
                GuardError::ProductNotFound(_) => ExitCode::NoMatch,
                GuardError::InvalidInput(_) => ExitCode::InvalidInput,
                _ => ExitCode::InternalError,
            }
        }
    }
}
