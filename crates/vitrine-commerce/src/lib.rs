//! Storefront domain types and the search facet engine for Vitrine.
//!
//! This crate provides the pieces behind a used and refurbished smartphone
//! storefront:
//!
//! - **Catalog**: Products, condition sections, color/capacity variations
//! - **Search**: Facet derivation, filter selection and evaluation, sorting
//! - **Checkout**: Shipping quotes by CEP
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_commerce::prelude::*;
//!
//! let products: Vec<Product> = serde_json::from_str(&catalog_json)?;
//!
//! let mut engine = SearchEngine::new();
//! engine.set_products(Some(products));
//! engine.set_params(SearchParams::from_query_string("q=iphone&sort=price_asc"));
//!
//! // Show the picker, then apply what the shopper clicked
//! for group in engine.facet_groups() {
//!     println!("{}: {} options", group.title, group.options.len());
//! }
//! engine.toggle(SelectedValue::Model("IPHONE 13".to_string()));
//! engine.toggle(SelectedValue::PriceBand(1));
//!
//! for product in engine.results() {
//!     println!("{} {}", product.name, product.price_money(Currency::BRL));
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        condition_sections, CartLine, ConditionSection, Product, ProductVariations, StockStatus,
        VariantSelection, Variation,
    };

    // Checkout
    pub use crate::checkout::{ShippingEstimator, ShippingQuote};

    // Search
    pub use crate::search::{
        best_sellers, AvailableFacets, FacetExtractor, FacetKind, FilterSelection, SearchEngine,
        SearchParams, SearchResults, SearchStatus, SelectedValue, SmartphoneExtractor, SortOption,
    };
}
