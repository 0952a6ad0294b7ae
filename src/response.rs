//! Decision gate and response composition
//!
//! Maps an accumulated issue list to a block/pass decision and renders the
//! canned user-facing message for each outcome. The decision policy is
//! deliberately flat: any issue blocks, regardless of kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ProductRecord;
use crate::engine::rules::Issue;

/// Outcome of a guardrail evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// At least one issue was found; the content must not be surfaced
    Blocked,
    /// No issues; the content may be surfaced
    Passed,
    /// Retrieval found no product, so guardrails never ran
    NoMatch,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Blocked => write!(f, "BLOCKED"),
            Decision::Passed => write!(f, "PASSED"),
            Decision::NoMatch => write!(f, "NO_MATCH"),
        }
    }
}

/// Derive the decision from an issue list. Purely a function of emptiness.
pub fn decide(issues: &[Issue]) -> Decision {
    if issues.is_empty() {
        Decision::Passed
    } else {
        Decision::Blocked
    }
}

/// A rendered user-facing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub decision: Decision,
    pub text: String,
}

/// Compose the answer for the query path.
pub fn compose_answer(product: &ProductRecord, issues: &[Issue]) -> ResponseMessage {
    let decision = decide(issues);
    let text = match decision {
        Decision::Blocked => {
            let terms: Vec<String> = issues
                .iter()
                .flat_map(|i| i.matched_terms.iter().cloned())
                .collect();
            format!(
                "I cannot recommend `{}` specifically because you mentioned conditions ({}) \
                 that are listed as precautions for this product. Please consult your physician.",
                product.name,
                terms.join(", ")
            )
        }
        _ => format!(
            "Based on the product details, `{}` can help with {}. It contains {}.",
            product.name, product.target_concerns, product.key_herbs
        ),
    };
    ResponseMessage { decision, text }
}

/// Compose the review summary for the draft path.
pub fn compose_draft_review(product: &ProductRecord, issues: &[Issue]) -> ResponseMessage {
    let decision = decide(issues);
    let text = match decision {
        Decision::Blocked => {
            let mut lines = vec![format!(
                "Draft for `{}` is blocked ({} issue(s)):",
                product.name,
                issues.len()
            )];
            for issue in issues {
                lines.push(format!("  - {}", issue));
            }
            lines.join("\n")
        }
        _ => format!("Draft for `{}` passed all guardrail checks.", product.name),
    };
    ResponseMessage { decision, text }
}

/// Compose the fallback for the retrieval path when no product matched.
pub fn compose_no_match() -> ResponseMessage {
    ResponseMessage {
        decision: Decision::NoMatch,
        text: "I couldn't find a specific product match, but in general Ayurveda offers many \
               options. Could you name the product you are asking about?"
            .to_string(),
    }
}
