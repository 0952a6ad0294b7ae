//! Query-to-product retrieval
//!
//! The guardrail engine never depends on how a product was retrieved, so
//! retrieval sits behind a trait. The shipped implementation is a keyword
//! map; a search- or embedding-based retriever can replace it without
//! touching the evaluator.

use std::collections::BTreeMap;

use crate::catalog::{CatalogStore, ProductRecord};
use crate::matcher;

/// Strategy for mapping a free-text query to a catalog product.
pub trait Retriever: Send + Sync {
    /// Return the product the query refers to, if any.
    fn retrieve<'a>(&self, query: &str, catalog: &'a CatalogStore) -> Option<&'a ProductRecord>;
}

/// Keyword-based retriever: the first keyword found in the query wins.
///
/// Keys are lowercase keywords, values are product ids. A BTreeMap keeps
/// lookup order stable when a query matches several keywords.
pub struct KeywordRetriever {
    keyword_to_product: BTreeMap<String, String>,
}

impl KeywordRetriever {
    /// Create a retriever from keyword→product-id pairs.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        KeywordRetriever {
            keyword_to_product: pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }
}

impl Default for KeywordRetriever {
    fn default() -> Self {
        KeywordRetriever::new([("ashwagandha", "KA-P002")])
    }
}

impl Retriever for KeywordRetriever {
    fn retrieve<'a>(&self, query: &str, catalog: &'a CatalogStore) -> Option<&'a ProductRecord> {
        let normalized = matcher::normalize(query);
        self.keyword_to_product
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword.as_str()))
            .and_then(|(_, product_id)| catalog.get(product_id))
    }
}
