//! Absolute-safety rule
//!
//! Flags drafts that assert unconditional safety ("safe for everyone",
//! "no side effects") for a product whose catalog record lists any real
//! contraindication. The claim is falsified by the mere existence of a
//! recorded contraindication; no keyword overlap is required.

use crate::error::Result;
use crate::lexicon::Lexicon;

use super::{Issue, IssueKind, Rule, RuleInput, RulePhase};
use crate::matcher;

/// Contraindication texts at or below this length (after trimming) are
/// treated as placeholders rather than real entries.
pub const CONTRAINDICATION_MIN_LEN: usize = 5;

/// Returns the contraindication text when the record carries a real one.
fn real_contraindications(product: &crate::catalog::ProductRecord) -> Option<&str> {
    product
        .contraindications_short
        .as_deref()
        .map(str::trim)
        .filter(|c| c.len() > CONTRAINDICATION_MIN_LEN)
}

/// Rule checking absolute-safety claims against recorded contraindications.
pub struct AbsoluteSafetyRule;

impl AbsoluteSafetyRule {
    pub fn new() -> Self {
        AbsoluteSafetyRule
    }
}

impl Default for AbsoluteSafetyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AbsoluteSafetyRule {
    fn id(&self) -> &str {
        "absolute_safety"
    }

    fn name(&self) -> &str {
        "Absolute Safety Claim"
    }

    fn description(&self) -> &str {
        "Flags unconditional safety claims for products with recorded contraindications"
    }

    fn phase(&self) -> RulePhase {
        RulePhase::Draft
    }

    fn evaluate(&self, input: &RuleInput<'_>, lexicon: &Lexicon) -> Result<Vec<Issue>> {
        let matched = matcher::contains_any(input.text, &lexicon.absolute_safety_claims);
        if matched.is_empty() {
            return Ok(Vec::new());
        }

        let Some(contraindications) = real_contraindications(input.product) else {
            return Ok(Vec::new());
        };

        let issue = Issue::new(
            self.id(),
            IssueKind::SafetyError,
            format!(
                "Draft claims unconditional safety, but catalog lists contraindications: \
                 \"{}\".",
                contraindications
            ),
        )
        .with_matched_terms(matched);

        Ok(vec![issue])
    }
}
