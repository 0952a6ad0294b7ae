//! Guardrail lexicon
//!
//! The phrase sets the rules match against are configuration, not code.
//! The built-in defaults mirror the taxonomy the rules were written for,
//! but a deployment can swap them out via [`Lexicon::from_yaml_file`]
//! without touching any rule logic.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Named phrase sets used for claim and risk detection.
///
/// All phrases are stored lowercase; matching is case-insensitive substring
/// containment (see [`crate::matcher`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Terms denoting a medical condition that may interact with a product
    pub risk_keywords: Vec<String>,
    /// Phrases asserting a product is free of animal ingredients
    pub vegan_claims: Vec<String>,
    /// Phrases asserting unconditional safety
    pub absolute_safety_claims: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            risk_keywords: to_strings(&[
                "pregnancy",
                "thyroid",
                "surgery",
                "liver",
                "kidney",
                "autoimmune",
            ]),
            vegan_claims: to_strings(&[
                "vegan",
                "plant-based",
                "100% plant",
                "no animal products",
            ]),
            absolute_safety_claims: to_strings(&[
                "safe for everyone",
                "no side effects",
                "completely safe",
                "everyone can take this",
            ]),
        }
    }
}

impl Lexicon {
    /// Load a lexicon from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let lexicon: Lexicon = serde_yaml::from_str(&content)?;
        Ok(lexicon.lowercased())
    }

    /// Return a copy with every phrase lowercased and trimmed.
    fn lowercased(self) -> Self {
        let lower = |v: Vec<String>| {
            v.into_iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect()
        };
        Lexicon {
            risk_keywords: lower(self.risk_keywords),
            vegan_claims: lower(self.vegan_claims),
            absolute_safety_claims: lower(self.absolute_safety_claims),
        }
    }
}

fn to_strings(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_lowercase() {
        let lexicon = Lexicon::default();
        for phrase in lexicon
            .risk_keywords
            .iter()
            .chain(&lexicon.vegan_claims)
            .chain(&lexicon.absolute_safety_claims)
        {
            assert_eq!(phrase, &phrase.to_lowercase());
        }
    }

    #[test]
    fn test_defaults_cover_core_taxonomy() {
        let lexicon = Lexicon::default();
        assert!(lexicon.risk_keywords.contains(&"thyroid".to_string()));
        assert!(lexicon.risk_keywords.contains(&"pregnancy".to_string()));
        assert!(lexicon.vegan_claims.contains(&"vegan".to_string()));
        assert!(lexicon
            .absolute_safety_claims
            .contains(&"safe for everyone".to_string()));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "risk_keywords: [\"Pregnancy\", \" GLUTEN \"]\nvegan_claims: [\"vegan\"]\nabsolute_safety_claims: [\"risk-free\"]"
        )
        .unwrap();

        let lexicon = Lexicon::from_yaml_file(file.path()).unwrap();
        assert_eq!(lexicon.risk_keywords, vec!["pregnancy", "gluten"]);
        assert_eq!(lexicon.absolute_safety_claims, vec!["risk-free"]);
    }

    #[test]
    fn test_from_yaml_file_missing() {
        assert!(Lexicon::from_yaml_file("/nonexistent/lexicon.yaml").is_err());
    }
}
