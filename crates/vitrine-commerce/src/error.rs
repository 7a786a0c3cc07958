//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The facet engine itself never fails: absent catalogs, unmatched names
/// and stale selections all degrade to empty results. These errors cover
/// the edges around it (catalog loading, product pages, shipping quotes).
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Postal code could not be used for a shipping estimate.
    #[error("Invalid postal code: {0:?}")]
    InvalidPostalCode(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Selected color/capacity combination cannot be purchased.
    #[error("Variation unavailable: {color} / {capacity}")]
    VariationUnavailable { color: String, capacity: String },

    /// Price band index outside the fixed table.
    #[error("Invalid price band index: {0}")]
    InvalidPriceBand(usize),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<regex::Error> for CommerceError {
    fn from(e: regex::Error) -> Self {
        CommerceError::ValidationError(e.to_string())
    }
}
