//! Risk cross-reference rule
//!
//! Gates answers to user queries: a risk keyword is actionable only when it
//! appears in BOTH the query and the product's contraindications. A query
//! mentioning "pregnancy" is irrelevant to a product whose contraindications
//! mention only "thyroid".

use crate::error::Result;
use crate::lexicon::Lexicon;

use super::{Issue, IssueKind, Rule, RuleInput, RulePhase};
use crate::matcher;

/// Rule cross-referencing query risk terms with product contraindications.
pub struct RiskCrossReferenceRule;

impl RiskCrossReferenceRule {
    pub fn new() -> Self {
        RiskCrossReferenceRule
    }
}

impl Default for RiskCrossReferenceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RiskCrossReferenceRule {
    fn id(&self) -> &str {
        "risk_cross_reference"
    }

    fn name(&self) -> &str {
        "Risk Cross-Reference"
    }

    fn description(&self) -> &str {
        "Blocks answers when a risk keyword appears in both the query and the contraindications"
    }

    fn phase(&self) -> RulePhase {
        RulePhase::Query
    }

    fn evaluate(&self, input: &RuleInput<'_>, lexicon: &Lexicon) -> Result<Vec<Issue>> {
        let Some(contraindications) = input.product.contraindications_short.as_deref() else {
            return Ok(Vec::new());
        };

        let overlap = matcher::matches_both(input.text, contraindications, &lexicon.risk_keywords);
        if overlap.is_empty() {
            return Ok(Vec::new());
        }

        let terms: Vec<_> = overlap.iter().cloned().collect();
        let issue = Issue::new(
            self.id(),
            IssueKind::SafetyError,
            format!(
                "Query mentions condition(s) listed as precautions for this product: {}.",
                terms.join(", ")
            ),
        )
        .with_matched_terms(overlap);

        Ok(vec![issue])
    }
}
