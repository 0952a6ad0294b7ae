//! Rule framework for guardrail evaluation
//!
//! This module provides the core abstractions for defining and executing
//! guardrail rules against free text and a product record. Rules are pure:
//! the same input always produces the same issues, and no rule mutates the
//! catalog, the lexicon, or any other shared state.

pub mod risk_overlap;
pub mod safety_claim;
pub mod vegan;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::ProductRecord;
use crate::error::Result;
use crate::lexicon::Lexicon;

/// Kinds of issues a guardrail rule can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Text contradicts a catalog fact
    FactError,
    /// Text makes a claim the catalog's safety data falsifies
    SafetyError,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::FactError => write!(f, "fact_error"),
            IssueKind::SafetyError => write!(f, "safety_error"),
        }
    }
}

/// Which evaluation entry point a rule participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePhase {
    /// Marketing-copy checking (`evaluate_draft`)
    Draft,
    /// Pre-answer gating of a user query (`evaluate_query`)
    Query,
}

impl fmt::Display for RulePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulePhase::Draft => write!(f, "draft"),
            RulePhase::Query => write!(f, "query"),
        }
    }
}

/// A single finding emitted by a guardrail rule.
///
/// Issues are data, never errors: they accumulate across rules and the
/// decision gate maps the accumulated list to a block/pass outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Identifier of the rule that produced this issue
    pub rule_id: String,
    /// Kind of finding
    pub kind: IssueKind,
    /// Human-readable explanation
    pub message: String,
    /// The lexicon terms that triggered the finding, in sorted order
    pub matched_terms: BTreeSet<String>,
}

impl Issue {
    /// Create a new issue
    pub fn new(rule_id: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Issue {
            rule_id: rule_id.into(),
            kind,
            message: message.into(),
            matched_terms: BTreeSet::new(),
        }
    }

    /// Attach the terms that triggered the finding
    pub fn with_matched_terms(mut self, terms: BTreeSet<String>) -> Self {
        self.matched_terms = terms;
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.rule_id, self.message)
    }
}

/// Input handed to every rule: the text under evaluation and the catalog
/// record it is being checked against.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// The draft or query text
    pub text: &'a str,
    /// The product the text refers to
    pub product: &'a ProductRecord,
}

/// Trait for implementing guardrail rules
///
/// Rules are deterministic, pure checks producing issues without modifying
/// anything. Each rule covers a single aspect; rules never depend on each
/// other, so evaluation order only affects display order of issues.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &str;

    /// Human-readable name for this rule
    fn name(&self) -> &str;

    /// Description of what this rule checks
    fn description(&self) -> &str;

    /// Which entry point this rule participates in
    fn phase(&self) -> RulePhase;

    /// Evaluate the rule against the input.
    ///
    /// Returns the issues found (empty if the check passes). An `Err` is an
    /// internal rule fault; the engine downgrades it to "no issue" with a
    /// warning so one faulty rule cannot prevent the others from running.
    fn evaluate(&self, input: &RuleInput<'_>, lexicon: &Lexicon) -> Result<Vec<Issue>>;
}

/// A boxed rule for dynamic dispatch
pub type BoxedRule = Box<dyn Rule>;
