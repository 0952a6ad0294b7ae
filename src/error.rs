//! Error types for the catalog guardrail engine
//!
//! Provides structured error types for catalog loading, lookup, and I/O
//! operations. Guardrail findings are never errors: a rule that detects a
//! problem returns [`Issue`](crate::engine::rules::Issue) values as data.

use thiserror::Error;

/// Main error type for guardrail operations
#[derive(Error, Debug)]
pub enum GuardError {
    /// Catalog source missing or malformed (fatal for the process)
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// A product id was not present in the catalog (recoverable)
    #[error("Product '{0}' not found in catalog")]
    ProductNotFound(String),

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GuardError {
    /// Create a catalog load error
    pub fn catalog_load(msg: impl Into<String>) -> Self {
        GuardError::CatalogLoad(msg.into())
    }

    /// Create a product-not-found error
    pub fn product_not_found(product_id: impl Into<String>) -> Self {
        GuardError::ProductNotFound(product_id.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GuardError::InvalidInput(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        GuardError::Internal(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GuardError::CatalogLoad(_)
                | GuardError::ProductNotFound(_)
                | GuardError::InvalidInput(_)
        )
    }
}

impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::CatalogLoad(err.to_string())
    }
}

impl From<csv::Error> for GuardError {
    fn from(err: csv::Error) -> Self {
        GuardError::CatalogLoad(format!("CSV error: {}", err))
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for GuardError {
    fn from(err: serde_yaml::Error) -> Self {
        GuardError::Serialization(format!("YAML error: {}", err))
    }
}

/// Result type alias for guardrail operations
pub type Result<T> = std::result::Result<T, GuardError>;
