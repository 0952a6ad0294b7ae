//! Output formatting for the catalog guardrail CLI
//!
//! Provides structured output in JSON, YAML, and human-readable table
//! formats with decision-based coloring.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, ProductRecord};
use crate::engine::rules::Issue;
use crate::error::{GuardError, Result};
use crate::response::{Decision, ResponseMessage};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format for configuration output
    Yaml,
}

/// Rendered result of one guardrail evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationOutput {
    /// Final decision
    pub decision: Decision,
    /// Product the text was evaluated against, if one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Issues found by the guardrail rules
    pub issues: Vec<IssueOutput>,
    /// The user-facing response message
    pub response: String,
}

/// Individual issue output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueOutput {
    pub kind: String,
    pub rule_id: String,
    pub message: String,
    pub matched_terms: Vec<String>,
}

impl IssueOutput {
    fn from_issue(issue: &Issue) -> Self {
        IssueOutput {
            kind: issue.kind.to_string(),
            rule_id: issue.rule_id.clone(),
            message: issue.message.clone(),
            matched_terms: issue.matched_terms.iter().cloned().collect(),
        }
    }
}

impl EvaluationOutput {
    /// Build output from the evaluation pieces
    pub fn new(
        product: Option<&ProductRecord>,
        issues: Vec<Issue>,
        response: ResponseMessage,
    ) -> Self {
        EvaluationOutput {
            decision: response.decision,
            product_id: product.map(|p| p.product_id.clone()),
            product_name: product.map(|p| p.name.clone()),
            issues: issues.iter().map(IssueOutput::from_issue).collect(),
            response: response.text,
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => {
                self.render_table();
                Ok(())
            }
        }
    }

    fn render_table(&self) {
        let decision = match self.decision {
            Decision::Passed => "PASSED".green().bold(),
            Decision::Blocked => "BLOCKED".red().bold(),
            Decision::NoMatch => "NO_MATCH".yellow().bold(),
        };
        println!("Guardrail decision: {}", decision);

        if let (Some(id), Some(name)) = (&self.product_id, &self.product_name) {
            println!("Product: {} - {}", id, name);
        }

        if !self.issues.is_empty() {
            println!("\nIssues:");
            for issue in &self.issues {
                let kind = match issue.kind.as_str() {
                    "fact_error" => issue.kind.yellow(),
                    _ => issue.kind.red(),
                };
                println!("  [{}] {} ({})", kind, issue.message, issue.rule_id);
                if !issue.matched_terms.is_empty() {
                    println!("      matched: {}", issue.matched_terms.join(", "));
                }
            }
        }

        println!("\nResponse: {}", self.response);
    }
}

/// Rendered catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOutput {
    pub products: Vec<CatalogRow>,
}

/// One catalog row for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRow {
    pub product_id: String,
    pub name: String,
    pub contains_animal_products: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contraindications_short: Option<String>,
}

impl CatalogOutput {
    /// Build the listing from a loaded store
    pub fn from_store(catalog: &CatalogStore) -> Self {
        CatalogOutput {
            products: catalog
                .all()
                .map(|p| CatalogRow {
                    product_id: p.product_id.clone(),
                    name: p.name.clone(),
                    contains_animal_products: p.contains_animal_products.to_string(),
                    contraindications_short: p.contraindications_short.clone(),
                })
                .collect(),
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => {
                self.render_table();
                Ok(())
            }
        }
    }

    fn render_table(&self) {
        println!("{} product(s) in catalog", self.products.len());
        for row in &self.products {
            let contra = row
                .contraindications_short
                .as_deref()
                .unwrap_or("none recorded");
            println!(
                "  {} - {} (animal products: {}; contraindications: {})",
                row.product_id.bold(),
                row.name,
                row.contains_animal_products,
                contra
            );
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| GuardError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn render_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml =
        serde_yaml::to_string(value).map_err(|e| GuardError::Serialization(e.to_string()))?;
    println!("{}", yaml);
    Ok(())
}
