//! CLI module for the catalog guardrail agent
//!
//! Provides command-line entry points for the two guardrail flows (query
//! answering and draft checking) plus catalog inspection.

pub mod commands;
pub mod output;

pub use commands::{GuardCli, GuardCommands};
pub use output::OutputFormat;

use crate::error::GuardError;
use crate::response::Decision;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Guardrails passed
    Success = 0,
    /// Guardrails blocked the content
    Blocked = 1,
    /// No product matched (retrieval) or product id unknown
    NoMatch = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// Catalog or lexicon file not found or malformed
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<Decision> for ExitCode {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Passed => ExitCode::Success,
            Decision::Blocked => ExitCode::Blocked,
            Decision::NoMatch => ExitCode::NoMatch,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: GuardCli) -> Result<ExitCode, GuardError> {
    match cli.command {
        GuardCommands::Ask {
            query,
            catalog,
            lexicon,
            format,
        } => commands::execute_ask(&query, catalog, lexicon, format.unwrap_or_default()),
        GuardCommands::Check {
            draft,
            draft_file,
            product,
            catalog,
            lexicon,
            format,
        } => commands::execute_check(
            draft,
            draft_file,
            &product,
            catalog,
            lexicon,
            format.unwrap_or_default(),
        ),
        GuardCommands::Catalog { catalog, format } => {
            commands::execute_catalog(catalog, format.unwrap_or_default())
        }
    }
}
