//! Catalog Guardrail Agent CLI
//!
//! Command-line interface for the catalog guardrail agent.
//!
//! # Usage
//!
//! ```bash
//! # Answer a user query with safety gating
//! catalog-guard ask --query "Can I take Ashwagandha if I have thyroid issues?"
//!
//! # Check a marketing draft against catalog facts
//! catalog-guard check --draft "It is 100% vegan and safe for everyone" --product KA-P002
//!
//! # List the loaded catalog
//! catalog-guard catalog --format json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Guardrails passed
//! - 1: Guardrails blocked the content
//! - 2: No product matched
//! - 3: Invalid input or arguments
//! - 4: Catalog or lexicon file not found or malformed
//! - 10: Internal error

use catalog_guard::{run_cli, GuardCli};
use clap::Parser;

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let cli = GuardCli::parse();

    // Run the CLI and exit with appropriate code
    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
