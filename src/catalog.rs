//! Product catalog store
//!
//! Loads the tabular product catalog into an immutable, in-memory index.
//! All normalization of loosely-typed cells (blank, `nan`, unexpected enum
//! values) happens here, in one place, at load time. After construction the
//! store is read-only for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{GuardError, Result};

/// Columns the catalog source must provide, in any order.
const REQUIRED_COLUMNS: [&str; 6] = [
    "product_id",
    "name",
    "contraindications_short",
    "contains_animal_products",
    "target_concerns",
    "key_herbs",
];

/// Whether a product contains animal-derived ingredients.
///
/// Anything the source cannot express as a clear yes/no normalizes to
/// `Unknown`, which the vegan-compliance rule treats as "cannot confirm
/// vegan".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalProducts {
    Yes,
    No,
    Unknown,
}

impl AnimalProducts {
    /// Parse a raw catalog cell. Blank or unrecognized values are `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => AnimalProducts::Yes,
            "no" | "n" | "false" => AnimalProducts::No,
            _ => AnimalProducts::Unknown,
        }
    }
}

impl fmt::Display for AnimalProducts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalProducts::Yes => write!(f, "Yes"),
            AnimalProducts::No => write!(f, "No"),
            AnimalProducts::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One row of the product catalog, fully normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique primary key, non-empty
    pub product_id: String,
    /// Display name
    pub name: String,
    /// Recorded contraindications; `None` means none known
    pub contraindications_short: Option<String>,
    /// Animal-ingredient status
    pub contains_animal_products: AnimalProducts,
    /// Free-text concerns the product targets (used in passed responses)
    pub target_concerns: String,
    /// Free-text ingredient list (used in passed responses)
    pub key_herbs: String,
}

/// Raw CSV row before normalization. Kept private so `ProductRecord` is the
/// only shape the rest of the crate sees.
#[derive(Debug, Deserialize)]
struct RawRow {
    product_id: String,
    name: String,
    #[serde(default)]
    contraindications_short: String,
    #[serde(default)]
    contains_animal_products: String,
    #[serde(default)]
    target_concerns: String,
    #[serde(default)]
    key_herbs: String,
}

/// Collapse a raw cell to `None` when it carries no value.
///
/// Tabular exports commonly render missing cells as empty strings or the
/// literal `nan`; both collapse to absence here.
fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ProductRecord {
    fn from_raw(raw: RawRow) -> Result<Self> {
        let product_id = raw.product_id.trim().to_string();
        if product_id.is_empty() {
            return Err(GuardError::catalog_load("row with empty product_id"));
        }
        Ok(ProductRecord {
            product_id,
            name: raw.name.trim().to_string(),
            contraindications_short: normalize_cell(&raw.contraindications_short),
            contains_animal_products: AnimalProducts::parse(&raw.contains_animal_products),
            target_concerns: normalize_cell(&raw.target_concerns).unwrap_or_default(),
            key_herbs: normalize_cell(&raw.key_herbs).unwrap_or_default(),
        })
    }
}

/// Immutable, process-wide index of product records keyed by product id.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    records: HashMap<String, ProductRecord>,
    /// Ids in source order, for stable iteration
    order: Vec<String>,
}

impl CatalogStore {
    /// Load the catalog from a CSV file.
    ///
    /// Fails with [`GuardError::CatalogLoad`] if the file is missing, a
    /// required column is absent, a row cannot be parsed, or a `product_id`
    /// is empty or duplicated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GuardError::catalog_load(format!(
                "catalog file not found: {}",
                path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(GuardError::catalog_load(format!(
                    "missing required column '{}'",
                    column
                )));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<RawRow>() {
            records.push(ProductRecord::from_raw(row?)?);
        }

        let store = Self::from_records(records)?;
        info!(
            products = store.len(),
            path = %path.display(),
            "catalog loaded"
        );
        Ok(store)
    }

    /// Build a store from already-normalized records.
    ///
    /// Used by tests and by callers that source the catalog elsewhere.
    pub fn from_records(records: Vec<ProductRecord>) -> Result<Self> {
        let mut map = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());
        for record in records {
            let id = record.product_id.clone();
            if map.insert(id.clone(), record).is_some() {
                return Err(GuardError::catalog_load(format!(
                    "duplicate product_id '{}'",
                    id
                )));
            }
            order.push(id);
        }
        Ok(CatalogStore { records: map, order })
    }

    /// Look up a product by id. Absence is a normal outcome, not an error.
    pub fn get(&self, product_id: &str) -> Option<&ProductRecord> {
        let found = self.records.get(product_id);
        debug!(product_id, found = found.is_some(), "catalog lookup");
        found
    }

    /// Iterate all records in source order.
    pub fn all(&self) -> impl Iterator<Item = &ProductRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: &str, animal: AnimalProducts, contra: Option<&str>) -> ProductRecord {
        ProductRecord {
            product_id: id.to_string(),
            name: format!("Product {}", id),
            contraindications_short: contra.map(str::to_string),
            contains_animal_products: animal,
            target_concerns: "stress".to_string(),
            key_herbs: "ashwagandha root".to_string(),
        }
    }

    #[test]
    fn test_animal_products_parse() {
        assert_eq!(AnimalProducts::parse("Yes"), AnimalProducts::Yes);
        assert_eq!(AnimalProducts::parse(" no "), AnimalProducts::No);
        assert_eq!(AnimalProducts::parse(""), AnimalProducts::Unknown);
        assert_eq!(AnimalProducts::parse("nan"), AnimalProducts::Unknown);
        assert_eq!(AnimalProducts::parse("maybe"), AnimalProducts::Unknown);
    }

    #[test]
    fn test_normalize_cell_collapses_missing() {
        assert_eq!(normalize_cell("  "), None);
        assert_eq!(normalize_cell("nan"), None);
        assert_eq!(normalize_cell("NaN"), None);
        assert_eq!(normalize_cell(" thyroid "), Some("thyroid".to_string()));
    }

    #[test]
    fn test_get_and_all() {
        let store = CatalogStore::from_records(vec![
            record("KA-P001", AnimalProducts::No, None),
            record("KA-P002", AnimalProducts::No, Some("Caution in thyroid disorders")),
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("KA-P002").is_some());
        assert!(store.get("KA-P099").is_none());

        let ids: Vec<_> = store.all().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, vec!["KA-P001", "KA-P002"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = CatalogStore::from_records(vec![
            record("KA-P001", AnimalProducts::No, None),
            record("KA-P001", AnimalProducts::Yes, None),
        ]);
        assert!(matches!(result, Err(GuardError::CatalogLoad(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CatalogStore::load("/nonexistent/products.csv");
        assert!(matches!(result, Err(GuardError::CatalogLoad(_))));
    }

    #[test]
    fn test_load_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "product_id,name").unwrap();
        writeln!(file, "KA-P001,Test").unwrap();

        let result = CatalogStore::load(file.path());
        match result {
            Err(GuardError::CatalogLoad(msg)) => {
                assert!(msg.contains("missing required column"))
            }
            other => panic!("expected CatalogLoad error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_normalizes_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "product_id,name,contraindications_short,contains_animal_products,target_concerns,key_herbs"
        )
        .unwrap();
        writeln!(file, "KA-P001,Tulsi Tea,nan,No,calm,tulsi").unwrap();
        writeln!(file, "KA-P002,Ashwagandha,Caution in thyroid disorders,maybe,stress,ashwagandha").unwrap();

        let store = CatalogStore::load(file.path()).unwrap();
        let p1 = store.get("KA-P001").unwrap();
        assert_eq!(p1.contraindications_short, None);
        assert_eq!(p1.contains_animal_products, AnimalProducts::No);

        let p2 = store.get("KA-P002").unwrap();
        assert!(p2.contraindications_short.is_some());
        assert_eq!(p2.contains_animal_products, AnimalProducts::Unknown);
    }
}
