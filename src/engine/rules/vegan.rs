//! Vegan-compliance rule
//!
//! Flags drafts that claim a product is vegan or plant-based when the
//! catalog cannot confirm it. `Unknown` animal-product status blocks an
//! unqualified vegan claim just like `Yes` does: the claim is only
//! publishable when the catalog positively records `No`.

use crate::catalog::AnimalProducts;
use crate::error::Result;
use crate::lexicon::Lexicon;

use super::{Issue, IssueKind, Rule, RuleInput, RulePhase};
use crate::matcher;

/// Rule checking vegan/plant-based claims against the catalog.
pub struct VeganComplianceRule;

impl VeganComplianceRule {
    pub fn new() -> Self {
        VeganComplianceRule
    }
}

impl Default for VeganComplianceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for VeganComplianceRule {
    fn id(&self) -> &str {
        "vegan_compliance"
    }

    fn name(&self) -> &str {
        "Vegan Compliance"
    }

    fn description(&self) -> &str {
        "Flags vegan/plant-based claims the catalog's animal-product field does not confirm"
    }

    fn phase(&self) -> RulePhase {
        RulePhase::Draft
    }

    fn evaluate(&self, input: &RuleInput<'_>, lexicon: &Lexicon) -> Result<Vec<Issue>> {
        let matched = matcher::contains_any(input.text, &lexicon.vegan_claims);
        if matched.is_empty() {
            return Ok(Vec::new());
        }

        if input.product.contains_animal_products == AnimalProducts::No {
            return Ok(Vec::new());
        }

        let issue = Issue::new(
            self.id(),
            IssueKind::FactError,
            format!(
                "Draft claims product is vegan/plant-based, but catalog \
                 `contains_animal_products` is '{}'.",
                input.product.contains_animal_products
            ),
        )
        .with_matched_terms(matched);

        Ok(vec![issue])
    }
}
