//! Guardrail evaluation engine
//!
//! Orchestrates rule evaluation against (text, product) pairs. The engine
//! owns an ordered registry of independent rules; order only affects how
//! issues are displayed, never whether the result blocks.

pub mod rules;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::{CatalogStore, ProductRecord};
use crate::error::{GuardError, Result};
use crate::lexicon::Lexicon;
use rules::{BoxedRule, Issue, Rule, RuleInput, RulePhase};

/// The core guardrail engine: a lexicon plus a rule registry.
pub struct GuardrailEngine {
    lexicon: Lexicon,
    rules: Vec<Arc<dyn Rule>>,
}

impl GuardrailEngine {
    /// Create an engine with the default rules registered.
    pub fn new(lexicon: Lexicon) -> Self {
        let mut engine = Self::empty(lexicon);
        engine.register_default_rules();
        engine
    }

    /// Create an empty engine (no rules); callers register their own.
    pub fn empty(lexicon: Lexicon) -> Self {
        GuardrailEngine {
            lexicon,
            rules: Vec::new(),
        }
    }

    fn register_default_rules(&mut self) {
        // Draft-phase rules
        self.register(Arc::new(rules::vegan::VeganComplianceRule::new()));
        self.register(Arc::new(rules::safety_claim::AbsoluteSafetyRule::new()));

        // Query-phase rules
        self.register(Arc::new(rules::risk_overlap::RiskCrossReferenceRule::new()));
    }

    /// Register a guardrail rule.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Register a boxed rule.
    pub fn register_boxed(&mut self, rule: BoxedRule) {
        self.rules.push(Arc::from(rule));
    }

    /// Get all registered rules.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// The lexicon this engine evaluates against.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run draft-phase rules (fact and marketing-copy checking).
    pub fn evaluate_draft(&self, text: &str, product: &ProductRecord) -> Vec<Issue> {
        self.run_phase(RulePhase::Draft, text, product)
    }

    /// Run query-phase rules (pre-answer safety gating).
    pub fn evaluate_query(&self, query: &str, product: &ProductRecord) -> Vec<Issue> {
        self.run_phase(RulePhase::Query, query, product)
    }

    /// Draft evaluation by product id; fails with
    /// [`GuardError::ProductNotFound`] when the id is unknown.
    pub fn evaluate_draft_by_id(
        &self,
        text: &str,
        product_id: &str,
        catalog: &CatalogStore,
    ) -> Result<Vec<Issue>> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| GuardError::product_not_found(product_id))?;
        Ok(self.evaluate_draft(text, product))
    }

    /// Query evaluation by product id; fails with
    /// [`GuardError::ProductNotFound`] when the id is unknown.
    pub fn evaluate_query_by_id(
        &self,
        query: &str,
        product_id: &str,
        catalog: &CatalogStore,
    ) -> Result<Vec<Issue>> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| GuardError::product_not_found(product_id))?;
        Ok(self.evaluate_query(query, product))
    }

    /// Run every rule registered for `phase` and concatenate the issues.
    ///
    /// This method is deterministic: identical inputs always produce an
    /// identical issue list. A rule fault is downgraded to "no issue" plus
    /// a warning so the remaining rules still run.
    fn run_phase(&self, phase: RulePhase, text: &str, product: &ProductRecord) -> Vec<Issue> {
        let input = RuleInput { text, product };
        let mut issues = Vec::new();

        for rule in self.rules.iter().filter(|r| r.phase() == phase) {
            match rule.evaluate(&input, &self.lexicon) {
                Ok(found) => {
                    debug!(
                        rule = rule.id(),
                        product = %product.product_id,
                        issues = found.len(),
                        "rule evaluated"
                    );
                    issues.extend(found);
                }
                Err(err) => {
                    warn!(
                        rule = rule.id(),
                        product = %product.product_id,
                        error = %err,
                        "rule fault, contributing no issues"
                    );
                }
            }
        }

        issues
    }
}
