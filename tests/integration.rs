//! Integration tests for the catalog guardrail agent
//!
//! Exercises the full flow against the bundled catalog fixture: retrieval,
//! query gating, draft checking, decision and response composition, plus
//! property tests for idempotence and risk-overlap behavior.

use std::path::PathBuf;

use catalog_guard::{
    catalog::{AnimalProducts, CatalogStore, ProductRecord},
    decide,
    engine::GuardrailEngine,
    response::{self, Decision},
    retrieval::{KeywordRetriever, Retriever},
    GuardError, IssueKind, Lexicon,
};
use proptest::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/products_catalog.csv")
}

fn load_fixture() -> CatalogStore {
    CatalogStore::load(fixture_path()).expect("bundled catalog must load")
}

fn engine() -> GuardrailEngine {
    GuardrailEngine::new(Lexicon::default())
}

#[test]
fn fixture_catalog_loads_and_normalizes() {
    let catalog = load_fixture();
    assert_eq!(catalog.len(), 5);

    let tulsi = catalog.get("KA-P001").unwrap();
    assert_eq!(tulsi.contraindications_short, None);
    assert_eq!(tulsi.contains_animal_products, AnimalProducts::No);

    let chyawanprash = catalog.get("KA-P004").unwrap();
    assert_eq!(chyawanprash.contains_animal_products, AnimalProducts::Yes);
}

#[test]
fn thyroid_query_against_ashwagandha_is_blocked() {
    let catalog = load_fixture();
    let engine = engine();
    let retriever = KeywordRetriever::default();

    let query = "Can I take Ashwagandha if I have thyroid issues?";
    let product = retriever.retrieve(query, &catalog).expect("retrieval hit");
    assert_eq!(product.product_id, "KA-P002");

    let issues = engine.evaluate_query(query, product);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::SafetyError);
    let terms: Vec<_> = issues[0].matched_terms.iter().cloned().collect();
    assert_eq!(terms, vec!["thyroid"]);
    assert_eq!(decide(&issues), Decision::Blocked);

    let answer = response::compose_answer(product, &issues);
    assert!(answer.text.contains("thyroid"));
    assert!(answer.text.contains("consult your physician"));
}

#[test]
fn stress_relief_query_passes_and_interpolates_catalog_fields() {
    let catalog = load_fixture();
    let engine = engine();
    let retriever = KeywordRetriever::default();

    let query = "I am looking for something for stress relief. Is Ashwagandha good?";
    let product = retriever.retrieve(query, &catalog).expect("retrieval hit");

    let issues = engine.evaluate_query(query, product);
    assert!(issues.is_empty());
    assert_eq!(decide(&issues), Decision::Passed);

    let answer = response::compose_answer(product, &issues);
    assert_eq!(answer.decision, Decision::Passed);
    assert!(answer.text.contains(&product.target_concerns));
    assert!(answer.text.contains(&product.key_herbs));
}

#[test]
fn unmatched_query_renders_no_match_fallback() {
    let catalog = load_fixture();
    let retriever = KeywordRetriever::default();

    assert!(retriever
        .retrieve("What helps with digestion?", &catalog)
        .is_none());

    let fallback = response::compose_no_match();
    assert_eq!(fallback.decision, Decision::NoMatch);
}

#[test]
fn vegan_claim_on_animal_product_is_a_fact_error() {
    let catalog = load_fixture();
    let engine = engine();

    let draft = "Chyawanprash Classic Jam is 100% vegan and full of goodness.";
    let issues = engine
        .evaluate_draft_by_id(draft, "KA-P004", &catalog)
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::FactError);
    assert!(issues[0].message.contains("Yes"));
    assert_eq!(decide(&issues), Decision::Blocked);
}

#[test]
fn unsafe_ashwagandha_draft_collects_safety_issue() {
    let catalog = load_fixture();
    let engine = engine();

    let draft = "Discover the magic of KA-P002! This Ashwagandha supplement is a miracle \
                 cure for all your stress. It is completely safe for everyone to use, \
                 including pregnant women. It is also 100% vegan.";
    let issues = engine
        .evaluate_draft_by_id(draft, "KA-P002", &catalog)
        .unwrap();

    // Vegan claim passes (catalog records No); absolute safety blocks.
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "absolute_safety");
    assert!(issues[0]
        .message
        .contains("Caution in thyroid disorders; avoid during pregnancy"));
}

#[test]
fn careful_draft_passes_all_guardrails() {
    let catalog = load_fixture();
    let engine = engine();

    let draft = "Ashwagandha Stress Balance Tablets (KA-P002) are traditionally used to \
                 support stress resilience. Please consult your doctor if you are pregnant \
                 or have thyroid conditions.";
    let issues = engine
        .evaluate_draft_by_id(draft, "KA-P002", &catalog)
        .unwrap();

    assert!(issues.is_empty());
    let review = response::compose_draft_review(catalog.get("KA-P002").unwrap(), &issues);
    assert_eq!(review.decision, Decision::Passed);
}

#[test]
fn unknown_product_id_is_a_structured_error() {
    let catalog = load_fixture();
    let engine = engine();

    let result = engine.evaluate_draft_by_id("any draft", "KA-P999", &catalog);
    match result {
        Err(GuardError::ProductNotFound(id)) => assert_eq!(id, "KA-P999"),
        other => panic!("expected ProductNotFound, got {:?}", other),
    }
}

#[test]
fn draft_review_lists_both_issue_kinds() {
    let catalog = load_fixture();
    let engine = engine();

    // KA-P004 has both a Yes animal flag and real contraindications.
    let draft = "Our classic jam is plant-based and has no side effects at all.";
    let issues = engine
        .evaluate_draft_by_id(draft, "KA-P004", &catalog)
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert!(issues.iter().any(|i| i.kind == IssueKind::FactError));
    assert!(issues.iter().any(|i| i.kind == IssueKind::SafetyError));

    let review = response::compose_draft_review(catalog.get("KA-P004").unwrap(), &issues);
    assert_eq!(review.decision, Decision::Blocked);
    assert!(review.text.contains("2 issue(s)"));
}

fn test_product(contraindications: &str) -> ProductRecord {
    ProductRecord {
        product_id: "TEST-1".to_string(),
        name: "Test Product".to_string(),
        contraindications_short: Some(contraindications.to_string()),
        contains_animal_products: AnimalProducts::No,
        target_concerns: "testing".to_string(),
        key_herbs: "test herb".to_string(),
    }
}

proptest! {
    /// A risk keyword present in both the query and the contraindications
    /// always blocks, and the issue names that keyword.
    #[test]
    fn risk_overlap_always_blocks(
        keyword_idx in 0usize..6,
        query_prefix in "[a-z ]{0,30}",
        contra_suffix in "[a-z ]{0,30}",
    ) {
        let lexicon = Lexicon::default();
        let keyword = lexicon.risk_keywords[keyword_idx].clone();

        let query = format!("{} I have a {} condition", query_prefix, keyword);
        let product = test_product(&format!("Caution in {} cases {}", keyword, contra_suffix));

        let engine = GuardrailEngine::new(lexicon);
        let issues = engine.evaluate_query(&query, &product);

        prop_assert!(!issues.is_empty());
        prop_assert!(issues[0].matched_terms.contains(&keyword));
        prop_assert_eq!(decide(&issues), Decision::Blocked);
    }

    /// Evaluating the same input twice yields the same issue list: there is
    /// no hidden mutable state in the engine.
    #[test]
    fn evaluation_is_idempotent(text in "\\PC{0,120}") {
        let engine = GuardrailEngine::new(Lexicon::default());
        let product = test_product("Caution in thyroid disorders; avoid during pregnancy");

        let q1 = engine.evaluate_query(&text, &product);
        let q2 = engine.evaluate_query(&text, &product);
        prop_assert_eq!(q1, q2);

        let d1 = engine.evaluate_draft(&text, &product);
        let d2 = engine.evaluate_draft(&text, &product);
        prop_assert_eq!(d1, d2);
    }

    /// decide() is purely a function of emptiness.
    #[test]
    fn decide_depends_only_on_emptiness(n_issues in 0usize..4) {
        let issues: Vec<_> = (0..n_issues)
            .map(|i| catalog_guard::Issue::new(
                format!("rule_{}", i),
                IssueKind::SafetyError,
                "finding",
            ))
            .collect();

        let expected = if n_issues == 0 { Decision::Passed } else { Decision::Blocked };
        prop_assert_eq!(decide(&issues), expected);
    }
}
